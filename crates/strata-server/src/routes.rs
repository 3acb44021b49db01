//! Request routing and per-request chunk retrieval.

use std::time::Duration;

use serde::Serialize;
use strata_grid::ChunkCoords;
use strata_provider::{CancellationToken, ChunkProvider, ProviderError, SharedChunk};
use tiny_http::{Header, Method, Response, StatusCode};
use tokio::runtime::Handle;

use crate::render::render_chunk_png;
use crate::wire::{ChunkResponse, encode_raw};

type HttpResponse = Response<std::io::Cursor<Vec<u8>>>;

/// A parsed request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Status,
    ChunkJson(ChunkCoords),
    ChunkRaw(ChunkCoords),
    ChunkView(ChunkCoords),
    BadRequest(String),
    NotFound,
}

impl Route {
    pub fn parse(method: &Method, url: &str) -> Self {
        if *method != Method::Get {
            return Self::NotFound;
        }
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        match path {
            "/status" => Self::Status,
            "/api/chunk" => match query_coords(query) {
                Ok(coords) => Self::ChunkJson(coords),
                Err(reason) => Self::BadRequest(reason),
            },
            "/api/chunk/raw" => match query_coords(query) {
                Ok(coords) => Self::ChunkRaw(coords),
                Err(reason) => Self::BadRequest(reason),
            },
            _ => match path_coords(path) {
                Some(coords) => Self::ChunkView(coords),
                None => Self::NotFound,
            },
        }
    }
}

/// `x` and `y` from a query string such as `x=1&y=-2`.
fn query_coords(query: &str) -> Result<ChunkCoords, String> {
    let param = |name: &str| -> Result<i32, String> {
        let value = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| format!("missing query parameter '{name}'"))?;
        value
            .parse()
            .map_err(|_| format!("query parameter '{name}' is not an integer: '{value}'"))
    };
    Ok(ChunkCoords::new(param("x")?, param("y")?))
}

/// `/view/chunk/{x}/{y}` with integer segments.
fn path_coords(path: &str) -> Option<ChunkCoords> {
    let rest = path.strip_prefix("/view/chunk/")?;
    let (x, y) = rest.split_once('/')?;
    Some(ChunkCoords::new(x.parse().ok()?, y.parse().ok()?))
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Everything a worker needs to answer requests.
pub struct RequestContext<'a> {
    pub provider: &'a dyn ChunkProvider,
    pub runtime: &'a Handle,
    pub timeout: Duration,
}

impl RequestContext<'_> {
    /// Fetch a chunk, cancelling the wait once `timeout` elapses.
    fn fetch(&self, coords: ChunkCoords) -> Result<SharedChunk, ProviderError> {
        self.runtime.block_on(async {
            let cancel = CancellationToken::new();
            let deadline = {
                let cancel = cancel.clone();
                let timeout = self.timeout;
                tokio::spawn(async move {
                    tokio::time::sleep(timeout).await;
                    cancel.cancel();
                })
            };
            let result = self.provider.get(coords, &cancel).await;
            deadline.abort();
            result
        })
    }

    pub fn respond(&self, route: &Route) -> HttpResponse {
        match route {
            Route::Status => json_response(
                200,
                &StatusResponse {
                    status: "Server is running",
                },
            ),
            Route::ChunkJson(coords) => match self.fetch(*coords) {
                Ok(chunk) => json_response(200, &ChunkResponse::new(*coords, &chunk)),
                Err(e) => provider_error_response(*coords, &e),
            },
            Route::ChunkRaw(coords) => match self.fetch(*coords) {
                Ok(chunk) => Response::from_data(encode_raw(&chunk))
                    .with_header(content_type("application/octet-stream")),
                Err(e) => provider_error_response(*coords, &e),
            },
            Route::ChunkView(coords) => match self.fetch(*coords) {
                Ok(chunk) => match render_chunk_png(&chunk) {
                    Ok(png_bytes) => Response::from_data(png_bytes)
                        .with_header(content_type("image/png"))
                        .with_header(header("Cache-Control", "public,max-age=1000")),
                    Err(e) => {
                        tracing::warn!(%coords, error = %e, "failed to encode chunk image");
                        error_response(500, e.to_string())
                    }
                },
                Err(e) => provider_error_response(*coords, &e),
            },
            Route::BadRequest(reason) => error_response(400, reason.clone()),
            Route::NotFound => Response::from_string("Not Found")
                .with_status_code(404)
                .with_header(content_type("text/plain")),
        }
    }
}

/// HTTP status for a failed chunk request.
pub fn status_for(error: &ProviderError) -> u16 {
    match error {
        ProviderError::Cancelled => 504,
        _ => 500,
    }
}

fn provider_error_response(coords: ChunkCoords, error: &ProviderError) -> HttpResponse {
    let status = status_for(error);
    if status == 504 {
        tracing::debug!(%coords, "chunk request timed out");
    } else {
        tracing::warn!(%coords, %error, "chunk request failed");
    }
    error_response(status, error.to_string())
}

fn error_response(status: u16, error: String) -> HttpResponse {
    json_response(status, &ErrorResponse { error })
}

fn json_response<T: Serialize>(status: u16, body: &T) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(json) => Response::from_data(json)
            .with_status_code(StatusCode(status))
            .with_header(content_type("application/json")),
        Err(e) => Response::from_string(e.to_string()).with_status_code(500),
    }
}

fn content_type(value: &str) -> Header {
    header("Content-Type", value)
}

fn header(name: &str, value: &str) -> Header {
    // Names and values are static ASCII.
    Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap()
}
