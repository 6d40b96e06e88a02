//! Musical vocabulary: scales, notes, and compositions.
//!
//! Pitches are semitone indices (MIDI numbering, middle C = 60).
//! Scales are closed interval tables; every valid scale is known at
//! compile time, so there is no open-ended lookup to fail at runtime.

pub mod composer;

pub use composer::Composer;

use crate::synth::Instrument;

/// Scale interval catalog (semitone offsets within one octave)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Major,
    Minor,
    Pentatonic,
    Blues,
    Chromatic,
    WholeTone,
    HarmonicMinor,
}

impl Scale {
    /// Semitone offsets of the scale degrees within one octave
    pub fn intervals(self) -> &'static [i32] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Pentatonic => &[0, 2, 4, 7, 9],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
            Scale::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            Scale::WholeTone => &[0, 2, 4, 6, 8, 10],
            Scale::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
        }
    }

    /// Pitch of an arbitrary scale degree relative to a base pitch.
    /// Degrees outside one octave wrap with an octave carry, so degree
    /// -1 of C major is the B below the base.
    pub fn degree_to_pitch(self, base_pitch: i32, degree: i32) -> i32 {
        let intervals = self.intervals();
        let len = intervals.len() as i32;
        let octave = degree.div_euclid(len);
        let idx = degree.rem_euclid(len) as usize;
        base_pitch + octave * 12 + intervals[idx]
    }

    /// Parse a scale name as supplied on the command line
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "major" => Some(Scale::Major),
            "minor" => Some(Scale::Minor),
            "pentatonic" => Some(Scale::Pentatonic),
            "blues" => Some(Scale::Blues),
            "chromatic" => Some(Scale::Chromatic),
            "wholetone" | "whole-tone" => Some(Scale::WholeTone),
            "harmonicminor" | "harmonic-minor" => Some(Scale::HarmonicMinor),
            _ => None,
        }
    }
}

/// One beat of one track: a pitch, optionally thickened into a chord
/// of simultaneous pitches
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Semitone pitch index (MIDI numbering)
    pub pitch: i32,
    /// Simultaneous pitches when this beat carries a chord
    pub chord: Option<Vec<i32>>,
}

impl Note {
    pub fn single(pitch: i32) -> Self {
        Self { pitch, chord: None }
    }

    pub fn chord(root: i32, pitches: Vec<i32>) -> Self {
        Self {
            pitch: root,
            chord: Some(pitches),
        }
    }
}

/// Three parallel tracks of equal beat count plus the performance
/// parameters needed to render them
#[derive(Debug, Clone)]
pub struct Composition {
    pub melody: Vec<Note>,
    pub harmony: Vec<Note>,
    pub bass: Vec<Note>,
    /// Tempo in beats per minute
    pub tempo_bpm: f64,
    /// Envelope profile the tracks should be rendered with
    pub instrument: Instrument,
}

impl Composition {
    /// Duration of one beat in seconds
    pub fn beat_duration_s(&self) -> f64 {
        60.0 / self.tempo_bpm
    }

    pub fn beat_count(&self) -> usize {
        self.melody.len()
    }
}
