//! Cross-frequency coupling analysis.
//!
//! Ladder coupling scores how regularly consecutive harmonics relate
//! through the spread of their ratios, then classifies the ladder.
//! The phase-amplitude estimate is a deliberate simplification: it
//! operates on two scalar frequencies through a hand-tuned ratio
//! heuristic, not on real phase/amplitude time series, and downstream
//! consumers depend on its exact numeric output.

use crate::harmonics::HarmonicLadder;

/// Classification of a harmonic ladder's coupling structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouplingKind {
    /// Mean consecutive ratio near the golden ratio
    PhiResonance,
    /// Every consecutive ratio near 2 (octave stacking)
    HarmonicDoubling,
    /// Tight ratio spread without a recognized shape
    StrongCoherent,
    /// Moderate ratio spread
    Moderate,
    /// Wide ratio spread
    WeakFragmented,
    /// Fewer than two harmonics; nothing to relate
    InsufficientData,
}

/// Ratio statistics and classification for one ladder
#[derive(Debug, Clone)]
pub struct CouplingResult {
    /// Coupling strength in [0, 1]
    pub strength: f64,
    pub kind: CouplingKind,
    /// Consecutive ratios ladder[i+1] / ladder[i]
    pub ratios: Vec<f64>,
    pub ratio_mean: f64,
    pub ratio_std: f64,
}

/// Scalar phase-amplitude coupling estimate
#[derive(Debug, Clone, Copy)]
pub struct PhaseAmplitudeResult {
    /// Estimated coupling strength in [0, 1]
    pub strength: f64,
    /// Whether the fast/slow ratio lands in the plausible PAC window
    pub likely: bool,
    /// fast / slow
    pub ratio: f64,
}

/// Analyzes frequency relationships within and between ladders
pub struct CouplingAnalyzer;

impl CouplingAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Classify a harmonic ladder from its consecutive ratios.
    ///
    /// Ladders with fewer than two entries return `InsufficientData`
    /// with the neutral strength 0.5 rather than failing.
    pub fn analyze(&self, ladder: &HarmonicLadder) -> CouplingResult {
        let freqs = ladder.frequencies();
        if freqs.len() < 2 {
            return CouplingResult {
                strength: 0.5,
                kind: CouplingKind::InsufficientData,
                ratios: Vec::new(),
                ratio_mean: 0.0,
                ratio_std: 0.0,
            };
        }

        let ratios: Vec<f64> = freqs.windows(2).map(|pair| pair[1] / pair[0]).collect();
        let n = ratios.len() as f64;
        let mean = ratios.iter().sum::<f64>() / n;
        let variance = ratios.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / n;
        let std = variance.sqrt();

        let strength = (1.0 / (1.0 + std)).min(1.0);

        // Classification priority: shape checks first, then strength
        // thresholds.
        let kind = if mean > 1.5 && mean < 1.7 {
            CouplingKind::PhiResonance
        } else if ratios.iter().all(|&r| r > 1.9 && r < 2.1) {
            CouplingKind::HarmonicDoubling
        } else if strength > 0.8 {
            CouplingKind::StrongCoherent
        } else if strength > 0.5 {
            CouplingKind::Moderate
        } else {
            CouplingKind::WeakFragmented
        };

        CouplingResult {
            strength,
            kind,
            ratios,
            ratio_mean: mean,
            ratio_std: std,
        }
    }

    /// Estimate phase-amplitude coupling between a slow and a fast
    /// frequency from their ratio alone.
    ///
    /// Ratios in [3, 10] count as plausible, peaking at 6.5; anything
    /// else gets a flat 0.3. A non-positive slow frequency degenerates
    /// to ratio 0 (implausible) instead of dividing by zero.
    pub fn analyze_pac(&self, slow_hz: f64, fast_hz: f64) -> PhaseAmplitudeResult {
        let ratio = if slow_hz.is_finite() && slow_hz > 0.0 && fast_hz.is_finite() {
            fast_hz / slow_hz
        } else {
            0.0
        };

        if (3.0..=10.0).contains(&ratio) {
            PhaseAmplitudeResult {
                strength: (1.0 - (ratio - 6.5).abs() / 3.5).clamp(0.0, 1.0),
                likely: true,
                ratio,
            }
        } else {
            PhaseAmplitudeResult {
                strength: 0.3,
                likely: false,
                ratio,
            }
        }
    }
}

impl Default for CouplingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PHI;

    fn ladder(freqs: &[f64]) -> HarmonicLadder {
        HarmonicLadder::from_frequencies(freqs.to_vec())
    }

    #[test]
    fn test_golden_ladder_is_phi_resonance() {
        let base = 10.0;
        let freqs: Vec<f64> = (0..5).map(|i| base * PHI.powi(i)).collect();
        let result = CouplingAnalyzer::new().analyze(&ladder(&freqs));
        assert_eq!(result.kind, CouplingKind::PhiResonance);
        assert!(result.strength > 0.8, "strength was {}", result.strength);
        assert!((result.ratio_mean - PHI).abs() < 1e-9);
    }

    #[test]
    fn test_octave_ladder_is_harmonic_doubling() {
        let result = CouplingAnalyzer::new().analyze(&ladder(&[10.0, 20.0, 40.0, 80.0, 160.0]));
        assert_eq!(result.kind, CouplingKind::HarmonicDoubling);
        assert!((result.ratio_mean - 2.0).abs() < 1e-12);
        assert_eq!(result.ratios.len(), 4);
    }

    #[test]
    fn test_irregular_ladder_is_fragmented() {
        let result = CouplingAnalyzer::new().analyze(&ladder(&[5.0, 11.0, 13.0, 47.0, 50.0]));
        assert_eq!(result.kind, CouplingKind::WeakFragmented);
        assert!(result.strength <= 0.5);
    }

    #[test]
    fn test_uniform_nonspecial_ratio_is_strong_coherent() {
        // Constant ratio 3: zero spread, but neither φ nor doubling.
        let result = CouplingAnalyzer::new().analyze(&ladder(&[10.0, 30.0, 90.0, 270.0]));
        assert_eq!(result.kind, CouplingKind::StrongCoherent);
        assert!((result.strength - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_ladder_is_insufficient_data() {
        let analyzer = CouplingAnalyzer::new();
        for freqs in [vec![], vec![42.0]] {
            let result = analyzer.analyze(&HarmonicLadder::from_frequencies(freqs));
            assert_eq!(result.kind, CouplingKind::InsufficientData);
            assert_eq!(result.strength, 0.5);
            assert!(result.ratios.is_empty());
        }
    }

    #[test]
    fn test_pac_in_window() {
        let result = CouplingAnalyzer::new().analyze_pac(10.0, 40.0);
        assert!(result.likely);
        assert!((result.ratio - 4.0).abs() < 1e-12);
        // Closed form: 1 − |4 − 6.5| / 3.5 = 2/7.
        assert!((result.strength - 2.0 / 7.0).abs() < 0.05);
    }

    #[test]
    fn test_pac_peak_at_center() {
        let result = CouplingAnalyzer::new().analyze_pac(10.0, 65.0);
        assert!(result.likely);
        assert!((result.strength - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pac_outside_window() {
        let analyzer = CouplingAnalyzer::new();
        for (slow, fast) in [(10.0, 20.0), (10.0, 150.0), (10.0, 5.0)] {
            let result = analyzer.analyze_pac(slow, fast);
            assert!(!result.likely);
            assert_eq!(result.strength, 0.3);
        }
    }

    #[test]
    fn test_pac_degenerate_slow_frequency() {
        let analyzer = CouplingAnalyzer::new();
        for slow in [0.0, -4.0, f64::NAN] {
            let result = analyzer.analyze_pac(slow, 40.0);
            assert!(!result.likely);
            assert_eq!(result.strength, 0.3);
            assert_eq!(result.ratio, 0.0);
        }
    }
}
