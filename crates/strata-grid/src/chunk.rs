//! Immutable 64×64 chunk storage.
//!
//! Heights and materials live in two parallel row-major arrays indexed by
//! `y * CHUNK_SIZE + x`. Both arrays are validated to hold exactly
//! [`CHUNK_TILE_COUNT`] entries when the chunk is built, and a chunk is never
//! mutated afterwards, so every holder of a shared chunk sees the same values.

use std::fmt;

use crate::{CHUNK_SIZE, CHUNK_TILE_COUNT, Height, Material, TileCoords};

/// Errors raised when chunk storage has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkDataError {
    #[error("heights must contain {expected} entries, got {actual}")]
    HeightsLength { expected: usize, actual: usize },

    #[error("materials must contain {expected} entries, got {actual}")]
    MaterialsLength { expected: usize, actual: usize },
}

/// A single tile read out of a chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile {
    pub height: Height,
    pub material: Material,
}

/// Heights and materials for every tile of one chunk.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChunkData {
    heights: Box<[Height]>,
    materials: Box<[Material]>,
}

impl ChunkData {
    /// Builds a chunk that takes ownership of the given storage without copying.
    pub fn from_owned(
        heights: Vec<Height>,
        materials: Vec<Material>,
    ) -> Result<Self, ChunkDataError> {
        validate_lengths(heights.len(), materials.len())?;
        Ok(Self {
            heights: heights.into_boxed_slice(),
            materials: materials.into_boxed_slice(),
        })
    }

    /// Builds a chunk by copying the given slices.
    pub fn from_slices(heights: &[Height], materials: &[Material]) -> Result<Self, ChunkDataError> {
        validate_lengths(heights.len(), materials.len())?;
        Ok(Self {
            heights: heights.into(),
            materials: materials.into(),
        })
    }

    /// A chunk with every height at zero and every material [`Material::Void`].
    pub fn zero() -> Self {
        Self {
            heights: vec![Height::MIN; CHUNK_TILE_COUNT].into_boxed_slice(),
            materials: vec![Material::Void; CHUNK_TILE_COUNT].into_boxed_slice(),
        }
    }

    /// Row-major heights, `CHUNK_TILE_COUNT` entries.
    pub fn heights(&self) -> &[Height] {
        &self.heights
    }

    /// Row-major materials, `CHUNK_TILE_COUNT` entries.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Tile at local coordinates, or `None` outside `0..CHUNK_SIZE`.
    pub fn tile(&self, x: usize, y: usize) -> Option<Tile> {
        if x >= CHUNK_SIZE || y >= CHUNK_SIZE {
            return None;
        }
        let index = linear_index(x, y);
        Some(Tile {
            height: self.heights[index],
            material: self.materials[index],
        })
    }

    /// Tile at global coordinates; only the tile's offset within its chunk is used.
    pub fn tile_at(&self, coords: TileCoords) -> Tile {
        let local = coords.to_local();
        let index = linear_index(local.x as usize, local.y as usize);
        Tile {
            height: self.heights[index],
            material: self.materials[index],
        }
    }

    pub fn tile_count(&self) -> usize {
        self.heights.len()
    }

    /// In-memory size of the tile payload in bytes.
    pub fn byte_size(&self) -> usize {
        self.heights.len() * std::mem::size_of::<Height>()
            + self.materials.len() * std::mem::size_of::<Material>()
    }
}

impl fmt::Debug for ChunkData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkData")
            .field("tile_count", &self.tile_count())
            .field("byte_size", &self.byte_size())
            .finish()
    }
}

#[inline]
fn linear_index(x: usize, y: usize) -> usize {
    y * CHUNK_SIZE + x
}

fn validate_lengths(heights: usize, materials: usize) -> Result<(), ChunkDataError> {
    if heights != CHUNK_TILE_COUNT {
        return Err(ChunkDataError::HeightsLength {
            expected: CHUNK_TILE_COUNT,
            actual: heights,
        });
    }
    if materials != CHUNK_TILE_COUNT {
        return Err(ChunkDataError::MaterialsLength {
            expected: CHUNK_TILE_COUNT,
            actual: materials,
        });
    }
    Ok(())
}
