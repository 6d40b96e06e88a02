//! Algorithmic composition: melody, harmony, and bass tracks.
//!
//! The melody is a bounded random walk over scale degrees; harmony
//! holds triads from a chord progression; bass alternates root and
//! fifth. All randomness flows through the injected RNG, so a fixed
//! seed reproduces the whole composition.

use rand::Rng;

use super::{Composition, Note, Scale};
use crate::synth::Instrument;

/// Probability per beat that the melody steps to another degree.
const STEP_PROBABILITY: f64 = 0.7;

/// Probability of an extra octave jump on top of a step.
const OCTAVE_JUMP_PROBABILITY: f64 = 0.1;

/// Melody pitch clamp range (semitones, C3..C6).
const PITCH_MIN: i32 = 48;
const PITCH_MAX: i32 = 84;

/// Degree offsets the melodic walk may take in one beat.
const WALK_STEPS: [i32; 4] = [-2, -1, 1, 2];

/// Generates three-track compositions from a scale and progression
pub struct Composer;

impl Composer {
    pub fn new() -> Self {
        Self
    }

    /// Compose melody, harmony, and bass tracks of equal beat count.
    ///
    /// The beat count is floor(duration / beat_duration), at least 1.
    /// An empty progression is treated as a single tonic chord.
    /// Deterministic for a fixed RNG seed.
    pub fn compose<R: Rng>(
        &self,
        base_pitch: i32,
        scale: Scale,
        progression: &[i32],
        tempo_bpm: f64,
        duration_s: f64,
        instrument: Instrument,
        rng: &mut R,
    ) -> Composition {
        let tempo_bpm = if tempo_bpm.is_finite() && tempo_bpm > 0.0 {
            tempo_bpm
        } else {
            120.0
        };
        let beat_duration = 60.0 / tempo_bpm;
        let beats = ((duration_s / beat_duration).floor() as usize).max(1);

        let progression: Vec<i32> = if progression.is_empty() {
            vec![0]
        } else {
            progression.to_vec()
        };

        let melody = self.compose_melody(base_pitch, scale, beats, rng);
        let harmony = self.compose_harmony(base_pitch, scale, &progression, beats);
        let bass = self.compose_bass(base_pitch, scale, &progression, beats);

        Composition {
            melody,
            harmony,
            bass,
            tempo_bpm,
            instrument,
        }
    }

    /// Bounded random walk over scale degrees. Each beat steps with
    /// probability 0.7, occasionally adds an octave jump, and clamps
    /// the resulting pitch into the singable range.
    fn compose_melody<R: Rng>(
        &self,
        base_pitch: i32,
        scale: Scale,
        beats: usize,
        rng: &mut R,
    ) -> Vec<Note> {
        let mut degree = 0i32;
        let mut octave_shift = 0i32;
        let mut track = Vec::with_capacity(beats);

        for _ in 0..beats {
            if rng.gen::<f64>() < STEP_PROBABILITY {
                degree += WALK_STEPS[rng.gen_range(0..WALK_STEPS.len())];
                if rng.gen::<f64>() < OCTAVE_JUMP_PROBABILITY {
                    octave_shift += if rng.gen_bool(0.5) { 12 } else { -12 };
                }
            }

            let pitch = scale.degree_to_pitch(base_pitch, degree) + octave_shift;
            let clamped = pitch.clamp(PITCH_MIN, PITCH_MAX);
            // Walk state follows the clamp so the melody does not
            // drift ever further out of range.
            if pitch != clamped {
                octave_shift -= pitch - clamped;
            }
            track.push(Note::single(clamped));
        }

        track
    }

    /// One triad per progression entry, held for beats/len beats
    /// (minimum 1), repeating the progression to cover every beat.
    fn compose_harmony(
        &self,
        base_pitch: i32,
        scale: Scale,
        progression: &[i32],
        beats: usize,
    ) -> Vec<Note> {
        let hold = (beats / progression.len()).max(1);
        let mut track = Vec::with_capacity(beats);

        for beat in 0..beats {
            let entry = (beat / hold) % progression.len();
            let degree = progression[entry];
            let root = scale.degree_to_pitch(base_pitch, degree);
            let third = scale.degree_to_pitch(base_pitch, degree + 2);
            let fifth = scale.degree_to_pitch(base_pitch, degree + 4);
            track.push(Note::chord(root, vec![root, third, fifth]));
        }

        track
    }

    /// Chord root two octaves down on even beats, the fifth on odd
    /// beats.
    fn compose_bass(
        &self,
        base_pitch: i32,
        scale: Scale,
        progression: &[i32],
        beats: usize,
    ) -> Vec<Note> {
        let hold = (beats / progression.len()).max(1);
        let mut track = Vec::with_capacity(beats);

        for beat in 0..beats {
            let entry = (beat / hold) % progression.len();
            let degree = progression[entry];
            let pitch = if beat % 2 == 0 {
                scale.degree_to_pitch(base_pitch, degree) - 24
            } else {
                scale.degree_to_pitch(base_pitch, degree + 4) - 24
            };
            track.push(Note::single(pitch));
        }

        track
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}
