//! Additive synthesis with ADSR envelope shaping.
//!
//! Each note renders as a stack of five harmonics at fixed relative
//! amplitudes, shaped by the instrument's attack-decay-sustain-release
//! envelope. Chords average their constituent pitches so stacking
//! voices never grows the amplitude unbounded.

use std::f64::consts::TAU;

use crate::music::Note;

/// Relative amplitudes of the fundamental and its four overtones.
const HARMONIC_AMPLITUDES: [f64; 5] = [1.0, 0.5, 0.25, 0.125, 0.0625];

/// ADSR envelope parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeProfile {
    /// Attack time (seconds)
    pub attack_s: f64,
    /// Decay time (seconds)
    pub decay_s: f64,
    /// Sustain level (fraction of peak, 0-1)
    pub sustain_level: f64,
    /// Release time (seconds)
    pub release_s: f64,
}

/// Closed catalog of instrument envelope profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument {
    Piano,
    Strings,
    Synth,
    Organ,
    Bell,
}

impl Instrument {
    pub fn envelope(self) -> EnvelopeProfile {
        match self {
            Instrument::Piano => EnvelopeProfile {
                attack_s: 0.01,
                decay_s: 0.10,
                sustain_level: 0.70,
                release_s: 0.30,
            },
            Instrument::Strings => EnvelopeProfile {
                attack_s: 0.30,
                decay_s: 0.20,
                sustain_level: 0.80,
                release_s: 0.50,
            },
            Instrument::Synth => EnvelopeProfile {
                attack_s: 0.05,
                decay_s: 0.10,
                sustain_level: 0.60,
                release_s: 0.20,
            },
            Instrument::Organ => EnvelopeProfile {
                attack_s: 0.05,
                decay_s: 0.00,
                sustain_level: 0.90,
                release_s: 0.10,
            },
            Instrument::Bell => EnvelopeProfile {
                attack_s: 0.01,
                decay_s: 0.50,
                sustain_level: 0.30,
                release_s: 0.80,
            },
        }
    }

    /// Parse an instrument name as supplied on the command line
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "piano" => Some(Instrument::Piano),
            "strings" => Some(Instrument::Strings),
            "synth" => Some(Instrument::Synth),
            "organ" => Some(Instrument::Organ),
            "bell" => Some(Instrument::Bell),
            _ => None,
        }
    }
}

/// Convert a semitone pitch index to frequency (A4 = pitch 69 = 440 Hz)
pub fn pitch_to_frequency(pitch: i32) -> f64 {
    440.0 * 2.0_f64.powf((pitch - 69) as f64 / 12.0)
}

/// Renders note tracks into sample buffers
pub struct EnvelopeSynthesizer {
    sample_rate: u32,
}

impl EnvelopeSynthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// Render one track. Each note occupies exactly
    /// round(beat_duration · sample_rate) samples; the full buffer is
    /// the concatenation over all beats. An empty track renders as an
    /// empty buffer.
    pub fn synthesize(
        &self,
        track: &[Note],
        beat_duration_s: f64,
        envelope: &EnvelopeProfile,
        volume: f64,
        octave_shift_semitones: i32,
    ) -> Vec<f64> {
        let samples_per_beat = (beat_duration_s * self.sample_rate as f64).round() as usize;
        if samples_per_beat == 0 || track.is_empty() {
            return Vec::new();
        }

        let gain = envelope_gains(envelope, samples_per_beat, self.sample_rate);
        let mut buffer = Vec::with_capacity(track.len() * samples_per_beat);

        for note in track {
            match &note.chord {
                Some(pitches) if !pitches.is_empty() => {
                    // Average the voices instead of summing so chord
                    // size never changes the output level.
                    let mut beat = vec![0.0_f64; samples_per_beat];
                    for &pitch in pitches {
                        let freq = pitch_to_frequency(pitch + octave_shift_semitones);
                        accumulate_tone(&mut beat, freq, self.sample_rate);
                    }
                    let scale = volume / pitches.len() as f64;
                    for (i, sample) in beat.iter().enumerate() {
                        buffer.push(sample * gain[i] * scale);
                    }
                }
                _ => {
                    let freq = pitch_to_frequency(note.pitch + octave_shift_semitones);
                    let mut beat = vec![0.0_f64; samples_per_beat];
                    accumulate_tone(&mut beat, freq, self.sample_rate);
                    for (i, sample) in beat.iter().enumerate() {
                        buffer.push(sample * gain[i] * volume);
                    }
                }
            }
        }

        buffer
    }
}

/// Add the five-harmonic tone for `freq` into `beat`. Harmonics at or
/// above Nyquist are skipped to avoid aliasing.
fn accumulate_tone(beat: &mut [f64], freq: f64, sample_rate: u32) {
    let nyquist = sample_rate as f64 / 2.0;
    for (h, &amp) in HARMONIC_AMPLITUDES.iter().enumerate() {
        let harmonic_freq = freq * (h + 1) as f64;
        if harmonic_freq >= nyquist {
            break;
        }
        let step = TAU * harmonic_freq / sample_rate as f64;
        for (i, sample) in beat.iter_mut().enumerate() {
            *sample += amp * (step * i as f64).sin();
        }
    }
}

/// Precompute the per-sample ADSR gain curve for one beat.
///
/// Segment lengths come from the profile's times at the given sample
/// rate. If attack + decay + release would exceed the note, all three
/// are rescaled proportionally; whatever remains in the middle is held
/// at the sustain level.
fn envelope_gains(profile: &EnvelopeProfile, samples: usize, sample_rate: u32) -> Vec<f64> {
    let sr = sample_rate as f64;
    let mut attack = (profile.attack_s.max(0.0) * sr).round() as usize;
    let mut decay = (profile.decay_s.max(0.0) * sr).round() as usize;
    let mut release = (profile.release_s.max(0.0) * sr).round() as usize;

    let total = attack + decay + release;
    if total > samples && total > 0 {
        let scale = samples as f64 / total as f64;
        attack = (attack as f64 * scale).floor() as usize;
        decay = (decay as f64 * scale).floor() as usize;
        release = samples - attack - decay;
    }
    let sustain_len = samples - attack - decay - release;
    let sustain = profile.sustain_level.clamp(0.0, 1.0);

    let mut gains = Vec::with_capacity(samples);
    for i in 0..attack {
        gains.push(i as f64 / attack as f64);
    }
    for i in 0..decay {
        let t = (i + 1) as f64 / decay as f64;
        gains.push(1.0 + (sustain - 1.0) * t);
    }
    for _ in 0..sustain_len {
        gains.push(sustain);
    }
    for i in 0..release {
        let t = (i + 1) as f64 / release as f64;
        gains.push(sustain * (1.0 - t));
    }
    gains
}

/// Weighted sample-wise sum of the three rendered tracks. Buffers of
/// unequal length are treated as silence past their end.
pub fn mix(melody: &[f64], harmony: &[f64], bass: &[f64], weights: &crate::params::MixWeights) -> Vec<f64> {
    let len = melody.len().max(harmony.len()).max(bass.len());
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let m = melody.get(i).copied().unwrap_or(0.0) * weights.melody;
        let h = harmony.get(i).copied().unwrap_or(0.0) * weights.harmony;
        let b = bass.get(i).copied().unwrap_or(0.0) * weights.bass;
        out.push(m + h + b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{MixWeights, SAMPLE_RATE};

    #[test]
    fn test_pitch_to_frequency_reference_points() {
        assert!((pitch_to_frequency(69) - 440.0).abs() < 1e-9);
        assert!((pitch_to_frequency(57) - 220.0).abs() < 1e-9);
        assert!((pitch_to_frequency(60) - 261.6255653).abs() < 1e-6);
    }

    #[test]
    fn test_note_buffer_length() {
        let synth = EnvelopeSynthesizer::new(SAMPLE_RATE);
        let env = Instrument::Piano.envelope();
        let buf = synth.synthesize(&[Note::single(69)], 1.0, &env, 1.0, 0);
        assert_eq!(buf.len(), 44_100);

        let track = vec![Note::single(60), Note::single(64), Note::single(67)];
        let buf = synth.synthesize(&track, 0.25, &env, 1.0, 0);
        assert_eq!(buf.len(), 3 * 11_025);
    }

    #[test]
    fn test_single_note_is_non_silent_and_bounded() {
        let synth = EnvelopeSynthesizer::new(SAMPLE_RATE);
        let env = Instrument::Piano.envelope();
        let buf = synth.synthesize(&[Note::single(69)], 1.0, &env, 1.0, 0);
        let peak = buf.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
        assert!(peak > 0.1, "peak was {peak}");
        // Five harmonics can sum to at most 1.9375 before the envelope.
        assert!(peak < 2.0);
    }

    #[test]
    fn test_envelope_starts_and_ends_at_zero() {
        let synth = EnvelopeSynthesizer::new(SAMPLE_RATE);
        let env = Instrument::Piano.envelope();
        let buf = synth.synthesize(&[Note::single(69)], 1.0, &env, 1.0, 0);
        assert_eq!(buf[0], 0.0);
        assert!(buf[buf.len() - 1].abs() < 1e-3);
    }

    #[test]
    fn test_short_note_clips_envelope_segments() {
        // Bell has 1.31 s of attack+decay+release; a 0.1 s note forces
        // proportional rescaling rather than overflow.
        let synth = EnvelopeSynthesizer::new(SAMPLE_RATE);
        let env = Instrument::Bell.envelope();
        let buf = synth.synthesize(&[Note::single(60)], 0.1, &env, 1.0, 0);
        assert_eq!(buf.len(), 4_410);
        assert!(buf.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_chord_averages_voices() {
        let synth = EnvelopeSynthesizer::new(SAMPLE_RATE);
        let env = Instrument::Organ.envelope();
        let single = synth.synthesize(&[Note::single(60)], 0.5, &env, 1.0, 0);
        let stacked = synth.synthesize(
            &[Note::chord(60, vec![60, 60, 60])],
            0.5,
            &env,
            1.0,
            0,
        );
        // Three identical voices averaged equal one voice.
        for (a, b) in single.iter().zip(&stacked) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_octave_shift_doubles_frequency() {
        let synth = EnvelopeSynthesizer::new(SAMPLE_RATE);
        let env = Instrument::Organ.envelope();
        let shifted = synth.synthesize(&[Note::single(57)], 0.5, &env, 1.0, 12);
        let direct = synth.synthesize(&[Note::single(69)], 0.5, &env, 1.0, 0);
        for (a, b) in shifted.iter().zip(&direct) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_track_renders_empty_buffer() {
        let synth = EnvelopeSynthesizer::new(SAMPLE_RATE);
        let env = Instrument::Piano.envelope();
        assert!(synth.synthesize(&[], 1.0, &env, 1.0, 0).is_empty());
    }

    #[test]
    fn test_mix_applies_track_weights() {
        let weights = MixWeights::default();
        let out = mix(&[1.0, 1.0], &[1.0], &[1.0, 1.0, 1.0], &weights);
        assert_eq!(out.len(), 3);
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((out[1] - 0.7).abs() < 1e-12);
        assert!((out[2] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_instrument_parse() {
        assert_eq!(Instrument::parse("piano"), Some(Instrument::Piano));
        assert_eq!(Instrument::parse("BELL"), Some(Instrument::Bell));
        assert_eq!(Instrument::parse("theremin"), None);
    }
}
