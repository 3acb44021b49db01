//! Pipeline assembly.

use std::sync::Arc;

use strata_grid::Seed;
use strata_noise::NoiseKind;
use strata_terrain::{NoiseTerrainGenerator, TerrainParams};

use crate::{BoundedProvider, ChunkProvider, CoalescingProvider, ProviderConfigError};

/// Everything needed to build a chunk pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderConfig {
    pub seed: Seed,
    /// Generation slots. Must be at least 1.
    pub max_concurrency: usize,
    /// Put a [`CoalescingProvider`] in front of the bounded executor.
    pub use_coalescing: bool,
    pub noise: NoiseKind,
    pub terrain: TerrainParams,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            seed: Seed(0),
            max_concurrency: num_cpus::get(),
            use_coalescing: true,
            noise: NoiseKind::default(),
            terrain: TerrainParams::default(),
        }
    }
}

/// Build `noise -> generator -> bounded executor [-> coalescer]` from `config`.
pub fn create_provider(
    config: &ProviderConfig,
) -> Result<Arc<dyn ChunkProvider>, ProviderConfigError> {
    let generator = NoiseTerrainGenerator::with_kind(config.noise, config.seed, config.terrain)?;
    let bounded = BoundedProvider::new(Arc::new(generator), config.max_concurrency)?;

    tracing::info!(
        seed = config.seed.0,
        max_concurrency = config.max_concurrency,
        coalescing = config.use_coalescing,
        noise = ?config.noise,
        "chunk provider created"
    );

    if config.use_coalescing {
        Ok(Arc::new(CoalescingProvider::new(Arc::new(bounded))))
    } else {
        Ok(Arc::new(bounded))
    }
}

/// Perlin noise, default terrain parameters, coalescing on.
pub fn create_default_provider(
    seed: Seed,
    max_concurrency: usize,
) -> Result<Arc<dyn ChunkProvider>, ProviderConfigError> {
    create_provider(&ProviderConfig {
        seed,
        max_concurrency,
        ..Default::default()
    })
}
