//! WAV container output.
//!
//! Serializes a normalized sample buffer to mono 16-bit signed PCM.
//! Normalization is the caller's step (via `normalize`); the writer
//! itself only clamps and quantizes, and never mutates its input.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

/// Scale a buffer so its peak |value| is 1.0. A silent buffer (peak 0)
/// is returned unchanged.
pub fn normalize(buffer: &[f64]) -> Vec<f64> {
    let peak = buffer.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
    if peak > 0.0 && peak.is_finite() {
        buffer.iter().map(|s| s / peak).collect()
    } else {
        buffer.to_vec()
    }
}

/// Write a buffer to `path` as mono 16-bit PCM at `sample_rate`.
///
/// Fails only on filesystem or container errors; those surface to the
/// caller rather than being swallowed.
pub fn write_wav<P: AsRef<Path>>(
    path: P,
    buffer: &[f64],
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in buffer {
        let v = (sample.clamp(-1.0, 1.0) * i16::MAX as f64) as i16;
        writer.write_sample(v)?;
    }
    writer.finalize()
}
