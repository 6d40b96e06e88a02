//! Harmonic ladder generation.
//!
//! A base frequency expands into an ordered ladder of harmonics. The
//! expansion strategy depends on which band the base falls in: low
//! bases get noisy integer multiples (fragmented regime), high bases
//! get near-noiseless golden-ratio scaling (coherent regime), and the
//! 13-30 Hz band blends linearly between the two. The band boundaries
//! and noise bounds are deliberate model choices; changing them
//! changes the downstream coupling classification.

use rand::Rng;

use crate::params::PHI;

/// Floor applied after perturbation so every ladder entry stays
/// strictly positive.
const MIN_FREQUENCY_HZ: f64 = 1e-3;

/// Ordered sequence of harmonic frequencies (Hz). Index 0 is the
/// base-derived frequency; all entries are > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicLadder(Vec<f64>);

impl HarmonicLadder {
    /// Full-precision frequencies
    pub fn frequencies(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Frequencies rounded to 2 decimal places for display. Internal
    /// values keep full precision.
    pub fn display_values(&self) -> Vec<f64> {
        self.0.iter().map(|f| (f * 100.0).round() / 100.0).collect()
    }

    /// Build directly from frequencies. Non-positive entries are
    /// floored; intended for tests and external callers that already
    /// hold a ladder.
    pub fn from_frequencies(freqs: Vec<f64>) -> Self {
        Self(
            freqs
                .into_iter()
                .map(|f| if f > MIN_FREQUENCY_HZ { f } else { MIN_FREQUENCY_HZ })
                .collect(),
        )
    }
}

/// Frequency band a base falls in, which selects the expansion
/// strategy and its noise bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// base < 8 Hz: noisy integer multiples
    Fragmented,
    /// 8 ≤ base < 13 Hz: golden-ratio scaling, moderate noise
    Transitional,
    /// 13 ≤ base < 30 Hz: integer/golden blend
    Blended,
    /// base ≥ 30 Hz: golden-ratio scaling, minimal noise
    Coherent,
}

impl Band {
    /// Band selection is a pure function of the base frequency; lower
    /// edges are inclusive.
    pub fn of(base_hz: f64) -> Self {
        if base_hz < 8.0 {
            Band::Fragmented
        } else if base_hz < 13.0 {
            Band::Transitional
        } else if base_hz < 30.0 {
            Band::Blended
        } else {
            Band::Coherent
        }
    }

    /// Noise bound parameters (fixed part, u-scaled part) for this
    /// band. The effective bound per harmonic is fixed + scale·u for a
    /// fresh u in [0, 1).
    fn noise_bounds(self) -> (f64, f64) {
        match self {
            Band::Fragmented => (0.25, 0.15),
            Band::Transitional => (0.12, 0.05),
            Band::Blended => (0.08, 0.04),
            Band::Coherent => (0.02, 0.02),
        }
    }
}

/// Expands base frequencies into harmonic ladders
pub struct HarmonicSeriesGenerator;

impl HarmonicSeriesGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a ladder of `layer_count` harmonics from `base_hz`.
    ///
    /// Deterministic for a fixed RNG seed. A non-positive or
    /// non-finite base, or a zero layer count, yields an empty ladder;
    /// the coupling analyzer treats that as insufficient data.
    pub fn generate<R: Rng>(
        &self,
        base_hz: f64,
        layer_count: usize,
        rng: &mut R,
    ) -> HarmonicLadder {
        if !(base_hz.is_finite() && base_hz > 0.0) || layer_count == 0 {
            return HarmonicLadder(Vec::new());
        }

        let band = Band::of(base_hz);
        let (fixed, scale) = band.noise_bounds();

        let mut ladder = Vec::with_capacity(layer_count);
        for i in 0..layer_count {
            let ideal = match band {
                Band::Fragmented => base_hz * (i + 1) as f64,
                Band::Transitional | Band::Coherent => base_hz * PHI.powi(i as i32),
                Band::Blended => {
                    let weight = (base_hz - 13.0) / 17.0;
                    let integer = base_hz * (i + 1) as f64;
                    let golden = base_hz * PHI.powi(i as i32);
                    integer * (1.0 - weight) + golden * weight
                }
            };

            // Fresh bound per harmonic, then a signed offset within it.
            let u: f64 = rng.gen();
            let bound = fixed + scale * u;
            let offset = rng.gen_range(-bound..bound);

            ladder.push((ideal * (1.0 + offset)).max(MIN_FREQUENCY_HZ));
        }

        HarmonicLadder(ladder)
    }
}

impl Default for HarmonicSeriesGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_band_selection_edges() {
        assert_eq!(Band::of(0.5), Band::Fragmented);
        assert_eq!(Band::of(7.99), Band::Fragmented);
        assert_eq!(Band::of(8.0), Band::Transitional);
        assert_eq!(Band::of(12.99), Band::Transitional);
        assert_eq!(Band::of(13.0), Band::Blended);
        assert_eq!(Band::of(29.99), Band::Blended);
        assert_eq!(Band::of(30.0), Band::Coherent);
        assert_eq!(Band::of(432.0), Band::Coherent);
    }

    #[test]
    fn test_ladder_length_and_positivity() {
        let gen = HarmonicSeriesGenerator::new();
        let mut rng = SmallRng::seed_from_u64(7);
        for &base in &[0.5, 4.0, 10.0, 20.0, 40.0, 432.0] {
            let ladder = gen.generate(base, 7, &mut rng);
            assert_eq!(ladder.len(), 7);
            assert!(ladder.frequencies().iter().all(|&f| f > 0.0));
        }
    }

    #[test]
    fn test_same_seed_reproduces_ladder() {
        let gen = HarmonicSeriesGenerator::new();
        let a = gen.generate(14.2, 6, &mut SmallRng::seed_from_u64(99));
        let b = gen.generate(14.2, 6, &mut SmallRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_coherent_band_tracks_golden_ratio() {
        // Noise in the coherent band is at most ±4%, so consecutive
        // ratios stay near φ.
        let gen = HarmonicSeriesGenerator::new();
        let mut rng = SmallRng::seed_from_u64(3);
        let ladder = gen.generate(40.0, 5, &mut rng);
        let freqs = ladder.frequencies();
        for pair in freqs.windows(2) {
            let ratio = pair[1] / pair[0];
            assert!((ratio - PHI).abs() < 0.15, "ratio was {ratio}");
        }
    }

    #[test]
    fn test_fragmented_band_starts_near_base() {
        let gen = HarmonicSeriesGenerator::new();
        let mut rng = SmallRng::seed_from_u64(11);
        let ladder = gen.generate(4.0, 4, &mut rng);
        let first = ladder.frequencies()[0];
        // Perturbation is at most ±40% of the ideal.
        assert!(first > 4.0 * 0.6 && first < 4.0 * 1.4);
    }

    #[test]
    fn test_degenerate_input_yields_empty_ladder() {
        let gen = HarmonicSeriesGenerator::new();
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(gen.generate(0.0, 5, &mut rng).is_empty());
        assert!(gen.generate(-3.0, 5, &mut rng).is_empty());
        assert!(gen.generate(f64::NAN, 5, &mut rng).is_empty());
        assert!(gen.generate(10.0, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_display_rounds_to_two_decimals() {
        let ladder = HarmonicLadder::from_frequencies(vec![10.004, 16.185]);
        assert_eq!(ladder.display_values(), vec![10.0, 16.19]);
        // Full precision is retained internally.
        assert_eq!(ladder.frequencies()[0], 10.004);
    }
}
