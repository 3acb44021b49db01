use std::sync::Arc;

use async_trait::async_trait;
use strata_grid::{ChunkCoords, ChunkData};
use tokio_util::sync::CancellationToken;

use crate::ProviderError;

/// A chunk shared between every caller that asked for it.
pub type SharedChunk = Arc<ChunkData>;

/// A stage of the chunk pipeline.
///
/// `cancel` only ends the caller's own wait. Whether work already started keeps running is
/// up to the implementation.
#[async_trait]
pub trait ChunkProvider: Send + Sync {
    async fn get(
        &self,
        coords: ChunkCoords,
        cancel: &CancellationToken,
    ) -> Result<SharedChunk, ProviderError>;
}

#[async_trait]
impl<P: ChunkProvider + ?Sized> ChunkProvider for Arc<P> {
    async fn get(
        &self,
        coords: ChunkCoords,
        cancel: &CancellationToken,
    ) -> Result<SharedChunk, ProviderError> {
        (**self).get(coords, cancel).await
    }
}
