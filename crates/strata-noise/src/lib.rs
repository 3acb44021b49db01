//! Seeded 2D noise sources and fractal octave sampling.
//!
//! Every source maps a continuous `(x, y)` coordinate to a value in `[0, 1)`,
//! depends only on the seed it was built with, and is safe to share across threads.

mod hash;
mod octave;
mod perlin;
mod value;

use serde::{Deserialize, Serialize};
use strata_grid::Seed;

pub use octave::NoiseSourceExt;
pub use perlin::PerlinNoise;
pub use value::ValueNoise;

/// Largest `f64` strictly below 1.0.
pub(crate) const UNIT_UPPER: f64 = 1.0 - f64::EPSILON / 2.0;

/// A seeded, stateless 2D noise function.
pub trait NoiseSource: Send + Sync {
    /// Sample the field at `(x, y)`. The result is in `[0, 1)` for all finite inputs.
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Selects a noise algorithm, typically from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    /// Hashed lattice values without interpolation.
    Value,
    /// Gradient noise with smootherstep interpolation.
    #[default]
    Perlin,
}

impl NoiseKind {
    /// Build the selected algorithm for `seed`.
    pub fn with_seed(self, seed: Seed) -> SeededNoise {
        match self {
            Self::Value => SeededNoise::Value(ValueNoise::new(seed)),
            Self::Perlin => SeededNoise::Perlin(PerlinNoise::new(seed)),
        }
    }
}

impl std::str::FromStr for NoiseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "value" => Ok(Self::Value),
            "perlin" => Ok(Self::Perlin),
            other => Err(format!("unknown noise kind '{other}' (expected 'value' or 'perlin')")),
        }
    }
}

/// One of the built-in noise sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeededNoise {
    Value(ValueNoise),
    Perlin(PerlinNoise),
}

impl NoiseSource for SeededNoise {
    #[inline]
    fn sample(&self, x: f64, y: f64) -> f64 {
        match self {
            Self::Value(noise) => noise.sample(x, y),
            Self::Perlin(noise) => noise.sample(x, y),
        }
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for std::sync::Arc<N> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

impl noise::NoiseFn<f64, 2> for SeededNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

/// Clamp a value into `[0, 1)`. NaN, which overflowing sample coordinates produce, maps to 0.
#[inline]
pub(crate) fn to_unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, UNIT_UPPER)
}
