//! The chunk delivery pipeline.
//!
//! Requests flow through [`CoalescingProvider`] (one computation per coordinate in flight)
//! into [`BoundedProvider`] (a fixed number of generation slots) and finally into a
//! [`TerrainGenerator`](strata_terrain::TerrainGenerator) running on the blocking pool.
//! [`create_provider`] assembles the pipeline from a [`ProviderConfig`].

mod bounded;
mod coalescing;
mod error;
mod factory;
mod provider;

pub use bounded::BoundedProvider;
pub use coalescing::CoalescingProvider;
pub use error::{ProviderConfigError, ProviderError};
pub use factory::{ProviderConfig, create_default_provider, create_provider};
pub use provider::{ChunkProvider, SharedChunk};

pub use tokio_util::sync::CancellationToken;
