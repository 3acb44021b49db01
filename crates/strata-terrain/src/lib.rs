//! Terrain generation: turns noise samples into fully populated chunks.

mod generator;
mod params;

pub use generator::{NoiseTerrainGenerator, TerrainGenerator, height_from_sample};
pub use params::{MAX_OCTAVES, TerrainParams, TerrainParamsError};
