//! Parameter definitions with physical units and documented semantics.
//!
//! Every constant the analysis and synthesis pipelines depend on lives
//! here with its units and range, so the numeric modules stay free of
//! magic numbers.

/// Audio sample rate (Hz). Fixed across the whole pipeline; the
/// synthesizer, effects, and writer all assume this rate.
pub const SAMPLE_RATE: u32 = 44_100;

/// Golden ratio φ = (1 + √5) / 2, the scaling factor for the
/// high-coherence harmonic ladders.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Interference pattern grid configuration
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// Reference frequency (Hz) the driving frequency is scaled
    /// against when computing the radial wavenumber
    pub reference_frequency_hz: f64,

    /// Angular resolution (samples over [0, 2π))
    pub angular_steps: usize,

    /// Radial resolution (samples over [0, 1])
    pub radial_steps: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            reference_frequency_hz: 432.0,
            angular_steps: 100,
            radial_steps: 50,
        }
    }
}

impl PatternConfig {
    /// Validate configuration (grid must be non-empty)
    pub fn validate(&self) -> Result<(), String> {
        if self.angular_steps == 0 || self.radial_steps == 0 {
            return Err("Pattern grid must have at least 1x1 cells".to_string());
        }
        if !(self.reference_frequency_hz > 0.0) {
            return Err(format!(
                "Reference frequency must be > 0 Hz, got {}",
                self.reference_frequency_hz
            ));
        }
        Ok(())
    }
}

/// Relative weights applied when summing the three composition tracks
/// into one buffer
#[derive(Debug, Clone)]
pub struct MixWeights {
    /// Melody track weight (dimensionless gain)
    pub melody: f64,

    /// Harmony (chord) track weight
    pub harmony: f64,

    /// Bass track weight
    pub bass: f64,
}

impl Default for MixWeights {
    fn default() -> Self {
        Self {
            melody: 0.5,
            harmony: 0.3,
            bass: 0.2,
        }
    }
}
