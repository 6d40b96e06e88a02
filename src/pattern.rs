//! Interference pattern generation.
//!
//! A driving frequency excites a circular membrane model: the pattern
//! value at polar cell (θ, r) is J_n(k·r)·cos(n·θ), where the
//! wavenumber k scales with the square root of the frequency relative
//! to a reference. Identical inputs always produce identical grids;
//! there is no randomness anywhere in this path.

use std::f64::consts::TAU;

use crate::bessel::bessel_j;
use crate::params::PatternConfig;

/// 2D pattern sampled on a polar grid, stored angular-major: row i is
/// angle index, column j is radius index. Immutable after creation.
#[derive(Debug, Clone)]
pub struct Pattern {
    data: Vec<f64>,
    angular_steps: usize,
    radial_steps: usize,
}

impl Pattern {
    /// Grid dimensions as (angular_steps, radial_steps)
    pub fn dims(&self) -> (usize, usize) {
        (self.angular_steps, self.radial_steps)
    }

    /// Value at (angle index, radius index)
    pub fn at(&self, angular: usize, radial: usize) -> f64 {
        self.data[angular * self.radial_steps + radial]
    }

    /// Flattened samples in angular-major order
    pub fn samples(&self) -> &[f64] {
        &self.data
    }
}

/// Generates interference patterns from driving frequencies
pub struct PatternEngine {
    config: PatternConfig,
}

impl PatternEngine {
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// Generate the pattern for a (frequency, order) pair.
    ///
    /// The wavenumber is k = sqrt(frequency / reference). A
    /// non-positive or non-finite frequency degenerates to k = 0
    /// (a flat pattern) instead of poisoning the grid with NaN.
    pub fn generate(&self, frequency_hz: f64, order: u32) -> Pattern {
        let k = if frequency_hz.is_finite() && frequency_hz > 0.0 {
            (frequency_hz / self.config.reference_frequency_hz).sqrt()
        } else {
            0.0
        };

        let angular_steps = self.config.angular_steps;
        let radial_steps = self.config.radial_steps;
        let mut data = Vec::with_capacity(angular_steps * radial_steps);

        for i in 0..angular_steps {
            // Angles cover [0, 2π), exclusive at the wrap point.
            let theta = TAU * i as f64 / angular_steps as f64;
            let angular_term = (order as f64 * theta).cos();

            for j in 0..radial_steps {
                // Radii cover [0, 1] inclusive.
                let r = if radial_steps > 1 {
                    j as f64 / (radial_steps - 1) as f64
                } else {
                    0.0
                };
                data.push(bessel_j(order, k * r) * angular_term);
            }
        }

        Pattern {
            data,
            angular_steps,
            radial_steps,
        }
    }
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new(PatternConfig::default())
    }
}
