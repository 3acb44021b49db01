//! Response encodings for chunk data.

use serde::Serialize;
use strata_grid::{ChunkCoords, ChunkData};

/// JSON body of `GET /api/chunk`.
#[derive(Debug, Serialize)]
pub struct ChunkResponse {
    pub x: i32,
    pub y: i32,
    pub tile_count: usize,
    pub byte_size: usize,
    pub heights: Vec<u16>,
    pub materials: Vec<u8>,
}

impl ChunkResponse {
    pub fn new(coords: ChunkCoords, chunk: &ChunkData) -> Self {
        Self {
            x: coords.x,
            y: coords.y,
            tile_count: chunk.tile_count(),
            byte_size: chunk.byte_size(),
            heights: chunk.heights().iter().map(|h| h.0).collect(),
            materials: chunk.materials().iter().map(|m| u8::from(*m)).collect(),
        }
    }
}

/// Flat binary layout: every height as little-endian `u16`, then every material byte.
pub fn encode_raw(chunk: &ChunkData) -> Vec<u8> {
    let mut out = Vec::with_capacity(chunk.byte_size());
    for height in chunk.heights() {
        out.extend_from_slice(&height.0.to_le_bytes());
    }
    out.extend(chunk.materials().iter().map(|m| u8::from(*m)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_grid::{CHUNK_TILE_COUNT, Height, Material};

    fn sample_chunk() -> ChunkData {
        let mut heights = vec![Height(0); CHUNK_TILE_COUNT];
        heights[0] = Height(0x1234);
        heights[CHUNK_TILE_COUNT - 1] = Height(u16::MAX);
        let mut materials = vec![Material::Default; CHUNK_TILE_COUNT];
        materials[1] = Material::Grass;
        ChunkData::from_owned(heights, materials).unwrap()
    }

    #[test]
    fn test_raw_layout() {
        let raw = encode_raw(&sample_chunk());
        assert_eq!(raw.len(), CHUNK_TILE_COUNT * 3);
        assert_eq!(&raw[..2], &[0x34, 0x12]);
        assert_eq!(&raw[CHUNK_TILE_COUNT * 2 - 2..CHUNK_TILE_COUNT * 2], &[0xFF, 0xFF]);
        assert_eq!(raw[CHUNK_TILE_COUNT * 2], 1);
        assert_eq!(raw[CHUNK_TILE_COUNT * 2 + 1], 3);
    }

    #[test]
    fn test_json_shape() {
        let response = ChunkResponse::new(ChunkCoords::new(-2, 5), &sample_chunk());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["x"], -2);
        assert_eq!(json["y"], 5);
        assert_eq!(json["tile_count"], CHUNK_TILE_COUNT);
        assert_eq!(json["byte_size"], CHUNK_TILE_COUNT * 3);
        assert_eq!(json["heights"][0], 0x1234);
        assert_eq!(json["materials"][1], 3);
        assert_eq!(json["heights"].as_array().unwrap().len(), CHUNK_TILE_COUNT);
    }
}
