//! Buffer-level effects: filtering and reverb.
//!
//! The filters are 4th-order Butterworth responses built from two
//! cascaded biquad sections. The reverb is a single-tap delay, which
//! is all the source material calls for. All three functions are pure:
//! they never mutate their input and always return a fresh buffer.

use biquad::{Biquad, Coefficients, DirectForm1, ToHertz, Type};

/// Section Q values for a 4th-order Butterworth cascade.
const BUTTERWORTH_4TH_Q: [f64; 2] = [0.541_196_100_146_197, 1.306_562_964_876_377];

/// 4th-order Butterworth low-pass at `cutoff_hz`.
///
/// A cutoff outside (0, Nyquist) cannot produce a stable filter; the
/// buffer passes through unchanged in that case.
pub fn lowpass(buffer: &[f64], cutoff_hz: f64, sample_rate: u32) -> Vec<f64> {
    filter(buffer, cutoff_hz, sample_rate, false)
}

/// 4th-order Butterworth high-pass at `cutoff_hz`. Same degenerate
/// cutoff handling as `lowpass`.
pub fn highpass(buffer: &[f64], cutoff_hz: f64, sample_rate: u32) -> Vec<f64> {
    filter(buffer, cutoff_hz, sample_rate, true)
}

fn filter(buffer: &[f64], cutoff_hz: f64, sample_rate: u32, highpass: bool) -> Vec<f64> {
    let nyquist = sample_rate as f64 / 2.0;
    if !(cutoff_hz > 0.0 && cutoff_hz < nyquist) || buffer.is_empty() {
        return buffer.to_vec();
    }

    let mut out = buffer.to_vec();
    for q in BUTTERWORTH_4TH_Q {
        let kind = if highpass { Type::HighPass } else { Type::LowPass };
        let coeffs = match Coefficients::<f64>::from_params(
            kind,
            (sample_rate as f64).hz(),
            cutoff_hz.hz(),
            q,
        ) {
            Ok(c) => c,
            Err(_) => return out,
        };
        let mut section = DirectForm1::<f64>::new(coeffs);
        for sample in out.iter_mut() {
            *sample = section.run(*sample);
        }
    }
    out
}

/// Single-tap delay reverb: out[i] = in[i] + decay · in[i − delay].
///
/// Decay is clamped to [0, 1); a zero or out-of-range delay returns
/// the input unchanged.
pub fn reverb(buffer: &[f64], decay: f64, delay_s: f64, sample_rate: u32) -> Vec<f64> {
    let delay_samples = (delay_s * sample_rate as f64).round() as usize;
    if delay_samples == 0 || delay_samples >= buffer.len() || !(delay_s > 0.0) {
        return buffer.to_vec();
    }
    let decay = if decay.is_finite() {
        decay.clamp(0.0, 0.999)
    } else {
        0.0
    };

    let mut out = buffer.to_vec();
    for i in delay_samples..out.len() {
        out[i] += decay * buffer[i - delay_samples];
    }
    out
}
