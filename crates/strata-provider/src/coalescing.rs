//! Single-flight request coalescing keyed by chunk coordinate.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use strata_grid::ChunkCoords;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::bounded::join_error_message;
use crate::{ChunkProvider, ProviderError, SharedChunk};

type ProviderResult = Result<SharedChunk, ProviderError>;
type SharedResult = Shared<BoxFuture<'static, ProviderResult>>;

/// A computation currently running for one coordinate.
struct InFlight {
    /// Distinguishes this computation from a later one for the same coordinate.
    id: u64,
    result: SharedResult,
}

/// Collapses concurrent requests for the same coordinate into one call to the inner provider.
///
/// The first request for a coordinate spawns the inner call as a tokio task and publishes it;
/// every request arriving while it runs attaches to the same result and receives the same
/// [`SharedChunk`] (or the same error). The entry is removed as soon as the computation
/// finishes, so nothing is cached beyond the in-flight window.
///
/// A waiter's cancellation token only ends its own wait. The spawned computation runs to
/// completion even if every waiter has gone.
///
/// Must be polled inside a tokio runtime.
pub struct CoalescingProvider {
    inner: Arc<dyn ChunkProvider>,
    in_flight: Arc<DashMap<ChunkCoords, InFlight>>,
    next_id: AtomicU64,
}

impl CoalescingProvider {
    pub fn new(inner: Arc<dyn ChunkProvider>) -> Self {
        Self {
            inner,
            in_flight: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Number of coordinates with a computation currently running.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Attach to the running computation for `coords`, starting one if there is none.
    fn join_or_start(&self, coords: ChunkCoords) -> SharedResult {
        let (id, result, handle_tx) = match self.in_flight.entry(coords) {
            Entry::Occupied(entry) => {
                tracing::trace!(%coords, id = entry.get().id, "joined in-flight chunk");
                return entry.get().result.clone();
            }
            Entry::Vacant(entry) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let (handle_tx, handle_rx) = oneshot::channel::<JoinHandle<ProviderResult>>();
                let result = async move {
                    let Ok(task) = handle_rx.await else {
                        return Err(ProviderError::TaskFailed(
                            "chunk computation was never started".into(),
                        ));
                    };
                    task.await
                        .unwrap_or_else(|e| Err(ProviderError::TaskFailed(join_error_message(e))))
                }
                .boxed()
                .shared();
                entry.insert(InFlight {
                    id,
                    result: result.clone(),
                });
                (id, result, handle_tx)
            }
        };

        // Spawned only after the shard lock is released: the runtime may drop the task on
        // the spot, and the guard's eviction needs that lock.
        let evict = EvictOnDrop {
            in_flight: Arc::clone(&self.in_flight),
            coords,
            id,
        };
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let _evict = evict;
            inner.get(coords, &CancellationToken::new()).await
        });
        let _ = handle_tx.send(task);
        tracing::trace!(%coords, id, "started chunk computation");
        result
    }
}

#[async_trait]
impl ChunkProvider for CoalescingProvider {
    async fn get(
        &self,
        coords: ChunkCoords,
        cancel: &CancellationToken,
    ) -> Result<SharedChunk, ProviderError> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        let shared = self.join_or_start(coords);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::trace!(%coords, "waiter cancelled");
                Err(ProviderError::Cancelled)
            }
            outcome = shared => outcome,
        }
    }
}

/// Removes the in-flight entry for `coords` when the computation ends, but only while the
/// stored entry is still this computation.
struct EvictOnDrop {
    in_flight: Arc<DashMap<ChunkCoords, InFlight>>,
    coords: ChunkCoords,
    id: u64,
}

impl Drop for EvictOnDrop {
    fn drop(&mut self) {
        let id = self.id;
        if self
            .in_flight
            .remove_if(&self.coords, |_, entry| entry.id == id)
            .is_some()
        {
            tracing::trace!(coords = %self.coords, id, "evicted finished chunk computation");
        }
    }
}
