//! HTTP serving layer for terrain chunks.
//!
//! Routes:
//! - `GET /status`: liveness probe.
//! - `GET /api/chunk?x=&y=`: chunk as JSON.
//! - `GET /api/chunk/raw?x=&y=`: little-endian heights followed by material bytes.
//! - `GET /view/chunk/{x}/{y}`: chunk rendered as a PNG.

pub mod render;
mod routes;
mod server;
pub mod wire;

pub use routes::{Route, status_for};
pub use server::{ChunkServer, ServerError};

use strata_config::GenerationSettings;
use strata_grid::Seed;
use strata_provider::ProviderConfig;
use strata_terrain::TerrainParams;


/// Translate the persisted generation settings into a pipeline configuration.
pub fn provider_config(settings: &GenerationSettings) -> ProviderConfig {
    ProviderConfig {
        seed: Seed(settings.seed),
        max_concurrency: settings.max_concurrency,
        use_coalescing: settings.use_coalescing,
        noise: settings.noise,
        terrain: TerrainParams {
            octaves: settings.octaves,
            persistence: settings.persistence,
            frequency: settings.frequency,
        },
    }
}
