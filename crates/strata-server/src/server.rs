//! HTTP chunk server.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use strata_config::ServerSettings;
use strata_provider::ChunkProvider;
use tiny_http::{Request, Server};
use tokio::runtime::Handle;

use crate::routes::{RequestContext, Route};

/// How often idle workers check for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind to {address}: {error}")]
    Bind { address: String, error: String },
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("worker thread panicked")]
    ThreadPanic,
}

/// Serves chunks over HTTP from a pool of worker threads.
///
/// Workers are plain threads blocking on `tiny_http`; each request enters the tokio runtime
/// through `runtime` only for the duration of its chunk retrieval.
pub struct ChunkServer {
    http: Arc<Server>,
    port: u16,
    workers: Vec<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl ChunkServer {
    pub fn start(
        settings: &ServerSettings,
        provider: Arc<dyn ChunkProvider>,
        runtime: Handle,
    ) -> Result<Self, ServerError> {
        let address = format!("{}:{}", settings.bind_address, settings.port);
        let http = Server::http(&address).map_err(|e| ServerError::Bind {
            address: address.clone(),
            error: e.to_string(),
        })?;
        let port = http
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .unwrap_or(settings.port);

        let mut server = Self {
            http: Arc::new(http),
            port,
            workers: Vec::with_capacity(settings.workers),
            shutdown: Arc::new(AtomicBool::new(false)),
        };
        let timeout = Duration::from_millis(settings.request_timeout_ms);

        for index in 0..settings.workers.max(1) {
            let http = Arc::clone(&server.http);
            let shutdown = Arc::clone(&server.shutdown);
            let provider = Arc::clone(&provider);
            let runtime = runtime.clone();
            let worker = thread::Builder::new()
                .name(format!("http-worker-{index}"))
                .spawn(move || {
                    let context = RequestContext {
                        provider: provider.as_ref(),
                        runtime: &runtime,
                        timeout,
                    };
                    run_worker(&http, &shutdown, &context);
                })
                .map_err(ServerError::Spawn)?;
            server.workers.push(worker);
        }

        tracing::info!(%address, port, workers = server.workers.len(), "chunk server listening");
        Ok(server)
    }

    /// The port actually bound, useful when the settings asked for port 0.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Stop accepting requests and wait for in-progress requests to finish.
    pub fn shutdown(mut self) -> Result<(), ServerError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), ServerError> {
        self.shutdown.store(true, Ordering::SeqCst);
        for _ in &self.workers {
            self.http.unblock();
        }
        let mut panicked = false;
        for worker in self.workers.drain(..) {
            panicked |= worker.join().is_err();
        }
        if panicked {
            return Err(ServerError::ThreadPanic);
        }
        tracing::info!(port = self.port, "chunk server stopped");
        Ok(())
    }
}

impl Drop for ChunkServer {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            let _ = self.stop();
        }
    }
}

fn run_worker(http: &Server, shutdown: &AtomicBool, context: &RequestContext<'_>) {
    while !shutdown.load(Ordering::SeqCst) {
        match http.recv_timeout(POLL_INTERVAL) {
            Ok(Some(request)) => handle_request(request, context),
            Ok(None) => {}
            Err(e) => {
                if !shutdown.load(Ordering::SeqCst) {
                    tracing::warn!(error = %e, "failed to receive request");
                }
            }
        }
    }
}

fn handle_request(request: Request, context: &RequestContext<'_>) {
    let route = Route::parse(request.method(), request.url());
    tracing::debug!(method = %request.method(), url = request.url(), ?route, "request");
    let response = context.respond(&route);
    if let Err(e) = request.respond(response) {
        tracing::debug!(error = %e, "failed to write response");
    }
}
