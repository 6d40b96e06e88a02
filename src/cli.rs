//! Command-line argument parsing.

use clap::Parser;

use crate::music::Scale;
use crate::synth::Instrument;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "cymatica")]
#[command(about = "Frequency pattern analysis and algorithmic music synthesis", long_about = None)]
pub struct Args {
    /// Driving frequency to analyze (Hz)
    #[arg(long, value_name = "HZ", default_value = "432.0")]
    pub frequency: f64,

    /// Bessel order for pattern generation
    #[arg(long, value_name = "N", default_value = "2")]
    pub order: u32,

    /// Number of harmonic layers in the ladder
    #[arg(long, value_name = "COUNT", default_value = "5")]
    pub layers: usize,

    /// RNG seed for reproducible ladders and melodies
    #[arg(long, value_name = "SEED", default_value = "42")]
    pub seed: u64,

    /// Render a composition to this WAV path instead of analyzing
    #[arg(long, value_name = "PATH")]
    pub render: Option<String>,

    /// Base pitch for composition (semitones, middle C = 60)
    #[arg(long, value_name = "PITCH", default_value = "60")]
    pub base_note: i32,

    /// Scale: major, minor, pentatonic, blues, chromatic, whole-tone,
    /// harmonic-minor
    #[arg(long, value_name = "SCALE", default_value = "major")]
    pub scale: String,

    /// Chord progression as comma-separated scale degrees
    #[arg(long, value_name = "DEGREES", default_value = "0,5,6,4")]
    pub progression: String,

    /// Tempo (beats per minute)
    #[arg(long, value_name = "BPM", default_value = "120.0")]
    pub tempo: f64,

    /// Composition duration (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "8.0")]
    pub duration: f64,

    /// Instrument: piano, strings, synth, organ, bell
    #[arg(long, value_name = "NAME", default_value = "piano")]
    pub instrument: String,

    /// Reverb decay in [0, 1); 0 disables reverb
    #[arg(long, value_name = "DECAY", default_value = "0.0")]
    pub reverb: f64,

    /// Low-pass cutoff (Hz), applied to the final mix when set
    #[arg(long, value_name = "HZ")]
    pub lowpass: Option<f64>,

    /// High-pass cutoff (Hz), applied to the final mix when set
    #[arg(long, value_name = "HZ")]
    pub highpass: Option<f64>,
}

impl Args {
    /// Parse the scale name, warning and falling back to major on an
    /// unknown name
    pub fn parse_scale(&self) -> Scale {
        match Scale::parse(&self.scale) {
            Some(scale) => scale,
            None => {
                eprintln!("Warning: Unknown scale '{}', using major", self.scale);
                Scale::Major
            }
        }
    }

    /// Parse the instrument name, warning and falling back to piano on
    /// an unknown name
    pub fn parse_instrument(&self) -> Instrument {
        match Instrument::parse(&self.instrument) {
            Some(instrument) => instrument,
            None => {
                eprintln!(
                    "Warning: Unknown instrument '{}', using piano",
                    self.instrument
                );
                Instrument::Piano
            }
        }
    }

    /// Parse the progression string, skipping entries that are not
    /// integers
    pub fn parse_progression(&self) -> Vec<i32> {
        let degrees: Vec<i32> = self
            .progression
            .split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect();
        if degrees.is_empty() {
            eprintln!(
                "Warning: No valid degrees in progression '{}', using tonic",
                self.progression
            );
            vec![0]
        } else {
            degrees
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(progression: &str, scale: &str, instrument: &str) -> Args {
        Args::parse_from([
            "cymatica",
            "--progression",
            progression,
            "--scale",
            scale,
            "--instrument",
            instrument,
        ])
    }

    #[test]
    fn test_parse_progression() {
        let args = args_with("0, 5,6 ,4", "major", "piano");
        assert_eq!(args.parse_progression(), vec![0, 5, 6, 4]);
    }

    #[test]
    fn test_parse_progression_skips_garbage() {
        let args = args_with("0,x,3", "major", "piano");
        assert_eq!(args.parse_progression(), vec![0, 3]);
    }

    #[test]
    fn test_parse_progression_empty_falls_back_to_tonic() {
        let args = args_with(",,", "major", "piano");
        assert_eq!(args.parse_progression(), vec![0]);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let args = args_with("0", "phrygian", "kazoo");
        assert_eq!(args.parse_scale(), Scale::Major);
        assert_eq!(args.parse_instrument(), Instrument::Piano);
    }
}
