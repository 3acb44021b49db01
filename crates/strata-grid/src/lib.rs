//! Grid primitives shared by every stage of the chunk pipeline: seeds, chunk and tile
//! coordinates, tile values, and immutable chunk storage.

mod chunk;
mod coords;
mod types;

pub use chunk::{ChunkData, ChunkDataError, Tile};
pub use coords::{ChunkCoords, TileCoords};
pub use types::{Height, InvalidMaterial, Material, Seed};

/// Side length of a chunk in tiles.
pub const CHUNK_SIZE: usize = 64;

/// Total number of tiles in a chunk (64²).
pub const CHUNK_TILE_COUNT: usize = CHUNK_SIZE * CHUNK_SIZE;
