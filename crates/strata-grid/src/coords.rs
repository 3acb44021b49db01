//! Chunk-space and tile-space coordinates.
//!
//! Chunk coordinates address a whole 64×64 block of tiles. Tile coordinates are global;
//! they are 64-bit so that every chunk's origin is representable without overflow.
//! Conversions between the two use floor semantics, so tile `-1` belongs to chunk `-1`
//! at local offset `63`.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::CHUNK_SIZE;

const CHUNK_SIZE_I64: i64 = CHUNK_SIZE as i64;

/// Position of a chunk in chunk space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoords {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoords {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Global tile coordinates of this chunk's origin (its local `(0, 0)` tile).
    pub fn to_tile_coords(self) -> TileCoords {
        TileCoords::new(
            i64::from(self.x) * CHUNK_SIZE_I64,
            i64::from(self.y) * CHUNK_SIZE_I64,
        )
    }
}

/// Position of a tile in global tile space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoords {
    pub x: i64,
    pub y: i64,
}

impl TileCoords {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The chunk containing this tile.
    ///
    /// Only tiles within the chunk-addressable range (`i32` chunk indices) map back
    /// losslessly; that covers every tile produced by [`ChunkCoords::to_tile_coords`].
    pub fn to_chunk_coords(self) -> ChunkCoords {
        ChunkCoords::new(
            self.x.div_euclid(CHUNK_SIZE_I64) as i32,
            self.y.div_euclid(CHUNK_SIZE_I64) as i32,
        )
    }

    /// Offset of this tile within its chunk, each component in `0..CHUNK_SIZE`.
    pub fn to_local(self) -> TileCoords {
        TileCoords::new(
            self.x.rem_euclid(CHUNK_SIZE_I64),
            self.y.rem_euclid(CHUNK_SIZE_I64),
        )
    }

    /// Split into `(local offset, containing chunk)`.
    pub fn to_local_and_chunk(self) -> (TileCoords, ChunkCoords) {
        (self.to_local(), self.to_chunk_coords())
    }
}

impl From<(i32, i32)> for ChunkCoords {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<ChunkCoords> for (i32, i32) {
    fn from(coords: ChunkCoords) -> Self {
        (coords.x, coords.y)
    }
}

impl From<(i64, i64)> for TileCoords {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl From<TileCoords> for (i64, i64) {
    fn from(coords: TileCoords) -> Self {
        (coords.x, coords.y)
    }
}

/// Component-wise, wrapping at the edge of the grid.
impl Add for ChunkCoords {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl Sub for ChunkCoords {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl Add for TileCoords {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

impl Sub for TileCoords {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl fmt::Display for ChunkCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkCoords({}, {})", self.x, self.y)
    }
}

impl fmt::Display for TileCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileCoords({}, {})", self.x, self.y)
    }
}
