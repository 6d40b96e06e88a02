//! Cymatica - frequency-domain analysis and synthesis core
//!
//! A driving frequency becomes a 2D interference pattern (Bessel
//! radial modes), scalar quality metrics, and a harmonic ladder whose
//! coupling structure can be classified; a base note, scale, and
//! progression become a rendered three-track composition written out
//! as a WAV file.

pub mod bessel;
pub mod cli;
pub mod coupling;
pub mod effects;
pub mod harmonics;
pub mod metrics;
pub mod music;
pub mod params;
pub mod pattern;
pub mod synth;
pub mod writer;
