//! Scalar quality metrics derived from interference patterns.
//!
//! Three independent measurements, each clamped to [0, 1]:
//! radial symmetry, gradient complexity, and lag-1 coherence.
//! Degenerate patterns (flat, constant, too small) fall back to the
//! documented neutral value 0.5 instead of emitting NaN.

use crate::pattern::Pattern;

/// Normalization constant for mean gradient magnitude. Tuned so that
/// typical Bessel interference grids land mid-range.
const COMPLEXITY_SCALE: f64 = 0.5;

/// Threshold below which a radial profile counts as flat.
const FLAT_EPSILON: f64 = 1e-6;

/// Derived pattern quality scalars, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternMetrics {
    pub symmetry: f64,
    pub complexity: f64,
    pub coherence: f64,
}

/// Computes quality metrics over generated patterns
pub struct MetricsEngine;

impl MetricsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute all three metrics for one pattern
    pub fn compute(&self, pattern: &Pattern) -> PatternMetrics {
        PatternMetrics {
            symmetry: self.symmetry(pattern),
            complexity: self.complexity(pattern),
            coherence: self.coherence(pattern),
        }
    }

    /// Aggregate metrics across a ladder of patterns by arithmetic
    /// mean per metric. Empty input falls back to all-neutral.
    pub fn aggregate(&self, metrics: &[PatternMetrics]) -> PatternMetrics {
        if metrics.is_empty() {
            return PatternMetrics {
                symmetry: 0.5,
                complexity: 0.5,
                coherence: 0.5,
            };
        }
        let n = metrics.len() as f64;
        PatternMetrics {
            symmetry: metrics.iter().map(|m| m.symmetry).sum::<f64>() / n,
            complexity: metrics.iter().map(|m| m.complexity).sum::<f64>() / n,
            coherence: metrics.iter().map(|m| m.coherence).sum::<f64>() / n,
        }
    }

    /// Radial symmetry: average |value| over angles to get a radial
    /// profile, then score 1 − min(std/mean, 1). A flat profile
    /// (mean ≤ 1e-6) is the degenerate case and scores 0.5.
    fn symmetry(&self, pattern: &Pattern) -> f64 {
        let (angular, radial) = pattern.dims();
        if angular == 0 || radial == 0 {
            return 0.5;
        }

        let mut profile = vec![0.0_f64; radial];
        for i in 0..angular {
            for (j, slot) in profile.iter_mut().enumerate() {
                *slot += pattern.at(i, j).abs();
            }
        }
        for slot in profile.iter_mut() {
            *slot /= angular as f64;
        }

        let mean = profile.iter().sum::<f64>() / radial as f64;
        if mean <= FLAT_EPSILON {
            return 0.5;
        }
        let variance =
            profile.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / radial as f64;
        let ratio = variance.sqrt() / mean;

        (1.0 - ratio.min(1.0)).clamp(0.0, 1.0)
    }

    /// Gradient complexity: mean magnitude of the discrete gradient
    /// along both axes, scaled and clamped.
    fn complexity(&self, pattern: &Pattern) -> f64 {
        let (angular, radial) = pattern.dims();
        if angular == 0 || radial == 0 {
            return 0.5;
        }

        let mut total = 0.0_f64;
        let mut count = 0usize;
        for i in 0..angular {
            for j in 0..radial {
                // Forward differences, one-sided at the far edges.
                let gx = if i + 1 < angular {
                    pattern.at(i + 1, j) - pattern.at(i, j)
                } else if i > 0 {
                    pattern.at(i, j) - pattern.at(i - 1, j)
                } else {
                    0.0
                };
                let gy = if j + 1 < radial {
                    pattern.at(i, j + 1) - pattern.at(i, j)
                } else if j > 0 {
                    pattern.at(i, j) - pattern.at(i, j - 1)
                } else {
                    0.0
                };
                total += (gx * gx + gy * gy).sqrt();
                count += 1;
            }
        }
        if count == 0 {
            return 0.5;
        }

        (total / count as f64 / COMPLEXITY_SCALE).clamp(0.0, 1.0)
    }

    /// Lag-1 coherence: |Pearson correlation| between the flattened
    /// sequence and itself shifted by one sample. Undefined
    /// correlation (constant input, <2 samples) scores 0.5.
    fn coherence(&self, pattern: &Pattern) -> f64 {
        let samples = pattern.samples();
        if samples.len() < 2 {
            return 0.5;
        }

        let a = &samples[..samples.len() - 1];
        let b = &samples[1..];
        match pearson(a, b) {
            Some(r) => r.abs().clamp(0.0, 1.0),
            None => 0.5,
        }
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Pearson correlation of two equal-length slices. None when either
/// side has zero variance or the result is not finite.
fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a <= 0.0 || var_b <= 0.0 {
        return None;
    }
    let r = cov / (var_a.sqrt() * var_b.sqrt());
    r.is_finite().then_some(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternEngine;

    fn in_unit_range(v: f64) -> bool {
        (0.0..=1.0).contains(&v) && v.is_finite()
    }

    #[test]
    fn test_metrics_stay_in_range() {
        let engine = PatternEngine::default();
        let metrics = MetricsEngine::new();
        for &freq in &[0.5, 7.83, 40.0, 432.0, 963.0] {
            for order in 0..=8 {
                let m = metrics.compute(&engine.generate(freq, order));
                assert!(in_unit_range(m.symmetry), "symmetry {freq} {order}");
                assert!(in_unit_range(m.complexity), "complexity {freq} {order}");
                assert!(in_unit_range(m.coherence), "coherence {freq} {order}");
            }
        }
    }

    #[test]
    fn test_flat_pattern_falls_back_to_neutral() {
        // Frequency 0 degenerates to an all-zero grid: flat profile,
        // constant sequence.
        let engine = PatternEngine::default();
        let m = MetricsEngine::new().compute(&engine.generate(0.0, 1));
        assert_eq!(m.symmetry, 0.5);
        assert_eq!(m.coherence, 0.5);
        assert_eq!(m.complexity, 0.0);
    }

    #[test]
    fn test_smooth_pattern_is_coherent() {
        // Neighboring samples of a smooth low-order pattern are highly
        // correlated.
        let engine = PatternEngine::default();
        let m = MetricsEngine::new().compute(&engine.generate(432.0, 2));
        assert!(m.coherence > 0.9, "coherence was {}", m.coherence);
    }

    #[test]
    fn test_aggregate_averages_per_metric() {
        let metrics = MetricsEngine::new();
        let a = PatternMetrics {
            symmetry: 0.2,
            complexity: 0.4,
            coherence: 0.6,
        };
        let b = PatternMetrics {
            symmetry: 0.8,
            complexity: 0.6,
            coherence: 1.0,
        };
        let agg = metrics.aggregate(&[a, b]);
        assert!((agg.symmetry - 0.5).abs() < 1e-12);
        assert!((agg.complexity - 0.5).abs() < 1e-12);
        assert!((agg.coherence - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_empty_is_neutral() {
        let agg = MetricsEngine::new().aggregate(&[]);
        assert_eq!(agg.symmetry, 0.5);
        assert_eq!(agg.complexity, 0.5);
        assert_eq!(agg.coherence, 0.5);
    }

    #[test]
    fn test_pearson_of_constant_is_undefined() {
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]).is_none());
    }

    #[test]
    fn test_pearson_of_identical_sequences() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let r = pearson(&xs, &xs).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }
}
