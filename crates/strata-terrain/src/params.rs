//! Sampling parameters for the noise terrain generator.

/// Upper bound on fractal octaves. Beyond this the finest band is far below one tile.
pub const MAX_OCTAVES: u32 = 16;

/// Errors for out-of-range [`TerrainParams`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainParamsError {
    #[error("octaves must be in 1..={max}, got {actual}")]
    Octaves { actual: u32, max: u32 },

    #[error("persistence must be finite and positive, got {0}")]
    Persistence(f64),

    #[error("frequency must be finite and positive, got {0}")]
    Frequency(f64),
}

/// How each tile's noise value is sampled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainParams {
    /// Number of fractal octaves. `1` samples the source once per tile.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Scale applied to tile-centre coordinates before sampling. `1.0` samples in tile units.
    pub frequency: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            octaves: 1,
            persistence: 0.5,
            frequency: 1.0,
        }
    }
}

impl TerrainParams {
    pub fn validate(&self) -> Result<(), TerrainParamsError> {
        if self.octaves == 0 || self.octaves > MAX_OCTAVES {
            return Err(TerrainParamsError::Octaves {
                actual: self.octaves,
                max: MAX_OCTAVES,
            });
        }
        if !self.persistence.is_finite() || self.persistence <= 0.0 {
            return Err(TerrainParamsError::Persistence(self.persistence));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(TerrainParamsError::Frequency(self.frequency));
        }
        Ok(())
    }
}
