//! Admission control: at most `max_concurrency` generations run at once.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use strata_grid::ChunkCoords;
use strata_terrain::TerrainGenerator;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;

use crate::{ChunkProvider, ProviderConfigError, ProviderError, SharedChunk};

/// Runs a [`TerrainGenerator`] on the blocking pool, holding one of a fixed number of slots
/// for the duration of each generation.
///
/// The slot permit moves into the blocking task, so it is released when generation ends
/// even if the caller's future was dropped in the meantime.
pub struct BoundedProvider {
    generator: Arc<dyn TerrainGenerator>,
    slots: Arc<Semaphore>,
    max_concurrency: usize,
}

impl BoundedProvider {
    pub fn new(
        generator: Arc<dyn TerrainGenerator>,
        max_concurrency: usize,
    ) -> Result<Self, ProviderConfigError> {
        if max_concurrency == 0 {
            return Err(ProviderConfigError::ZeroConcurrency);
        }
        Ok(Self {
            generator,
            slots: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        })
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Slots not currently held by a running generation.
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Stop admitting new generations. Waiting and future callers get
    /// [`ProviderError::ExecutorClosed`]; generations already running finish normally.
    pub fn close(&self) {
        self.slots.close();
    }
}

#[async_trait]
impl ChunkProvider for BoundedProvider {
    async fn get(
        &self,
        coords: ChunkCoords,
        cancel: &CancellationToken,
    ) -> Result<SharedChunk, ProviderError> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::trace!(%coords, "cancelled while waiting for a generation slot");
                return Err(ProviderError::Cancelled);
            }
            permit = Arc::clone(&self.slots).acquire_owned() => {
                permit.map_err(|_| ProviderError::ExecutorClosed)?
            }
        };
        tracing::trace!(%coords, available = self.slots.available_permits(), "slot acquired");

        let generator = Arc::clone(&self.generator);
        let started = Instant::now();
        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            generator.generate(coords)
        });

        match task.await {
            Ok(chunk) => {
                tracing::debug!(
                    %coords,
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "chunk generated"
                );
                Ok(Arc::new(chunk))
            }
            Err(e) => {
                let reason = join_error_message(e);
                tracing::warn!(%coords, %reason, "chunk generation failed");
                Err(ProviderError::GenerationFailed(reason))
            }
        }
    }
}

pub(crate) fn join_error_message(error: JoinError) -> String {
    if error.is_panic() {
        panic_message(error.into_panic())
    } else {
        error.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).to_string(),
            Err(_) => "panic with a non-string payload".to_string(),
        },
    }
}
