//! Chunk generators.
//!
//! [`TerrainGenerator`] is the synchronous, CPU-bound stage of the pipeline. It never
//! blocks or performs I/O, so callers are free to run it on a blocking thread pool.

use strata_grid::{CHUNK_SIZE, CHUNK_TILE_COUNT, ChunkCoords, ChunkData, Height, Material, Seed};
use strata_noise::{NoiseKind, NoiseSource, NoiseSourceExt, SeededNoise};

use crate::{TerrainParams, TerrainParamsError};

/// Produces chunk data for a chunk coordinate, deterministically.
pub trait TerrainGenerator: Send + Sync {
    fn generate(&self, coords: ChunkCoords) -> ChunkData;
}

impl<F> TerrainGenerator for F
where
    F: Fn(ChunkCoords) -> ChunkData + Send + Sync,
{
    fn generate(&self, coords: ChunkCoords) -> ChunkData {
        self(coords)
    }
}

/// Map a `[0, 1)` noise sample linearly onto the full height range.
#[inline]
pub fn height_from_sample(sample: f64) -> Height {
    // Float-to-int `as` saturates, so 0.0 maps to 0 and anything near 1.0 to u16::MAX.
    Height((sample * 65_536.0) as u16)
}

/// Samples a noise source once per tile centre and stores the result as the tile height.
/// Every tile gets [`Material::Default`].
#[derive(Clone, Debug)]
pub struct NoiseTerrainGenerator<N> {
    noise: N,
    params: TerrainParams,
}

impl<N: NoiseSource> NoiseTerrainGenerator<N> {
    pub fn new(noise: N, params: TerrainParams) -> Result<Self, TerrainParamsError> {
        params.validate()?;
        Ok(Self { noise, params })
    }

    /// Build the noise source for `seed` with `factory`.
    pub fn from_factory(
        factory: impl FnOnce(Seed) -> N,
        seed: Seed,
        params: TerrainParams,
    ) -> Result<Self, TerrainParamsError> {
        Self::new(factory(seed), params)
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }
}

impl NoiseTerrainGenerator<SeededNoise> {
    /// Generator over one of the built-in noise algorithms.
    pub fn with_kind(
        kind: NoiseKind,
        seed: Seed,
        params: TerrainParams,
    ) -> Result<Self, TerrainParamsError> {
        Self::from_factory(|seed| kind.with_seed(seed), seed, params)
    }
}

impl<N: NoiseSource> TerrainGenerator for NoiseTerrainGenerator<N> {
    fn generate(&self, coords: ChunkCoords) -> ChunkData {
        let origin = coords.to_tile_coords();
        let base_x = origin.x as f64;
        let base_y = origin.y as f64;
        let TerrainParams {
            octaves,
            persistence,
            frequency,
        } = self.params;

        let heights: Vec<Height> = (0..CHUNK_TILE_COUNT)
            .map(|i| {
                let x = (base_x + (i % CHUNK_SIZE) as f64 + 0.5) * frequency;
                let y = (base_y + (i / CHUNK_SIZE) as f64 + 0.5) * frequency;
                height_from_sample(self.noise.sample_octaves(x, y, octaves, persistence))
            })
            .collect();
        let materials = vec![Material::Default; CHUNK_TILE_COUNT];

        match ChunkData::from_owned(heights, materials) {
            Ok(chunk) => chunk,
            Err(e) => unreachable!("generator always fills {CHUNK_TILE_COUNT} tiles: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_noise::{PerlinNoise, ValueNoise};

    /// Records nothing, returns a fixed value: lets tests observe how samples become heights.
    struct FixedNoise(f64);

    impl NoiseSource for FixedNoise {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    /// Encodes the sampled coordinate so the sample position of each tile is observable.
    struct CoordNoise;

    impl NoiseSource for CoordNoise {
        fn sample(&self, x: f64, y: f64) -> f64 {
            // Only ever called with coordinates inside chunk (0, 0) in these tests.
            (x + y * 64.0) / 4096.0
        }
    }

    #[test]
    fn test_generates_full_chunk() {
        let generator = NoiseTerrainGenerator::new(FixedNoise(0.0), TerrainParams::default())
            .unwrap();
        let chunk = generator.generate(ChunkCoords::new(0, 0));
        assert_eq!(chunk.heights().len(), CHUNK_TILE_COUNT);
        assert_eq!(chunk.materials().len(), CHUNK_TILE_COUNT);
        assert!(chunk.materials().iter().all(|m| *m == Material::Default));
        assert!(chunk.heights().iter().all(|h| *h == Height::MIN));
    }

    #[test]
    fn test_samples_tile_centres() {
        let generator = NoiseTerrainGenerator::new(CoordNoise, TerrainParams::default()).unwrap();
        let chunk = generator.generate(ChunkCoords::new(0, 0));
        // Tile (x, y) is sampled at (x + 0.5, y + 0.5).
        for (x, y) in [(0usize, 0usize), (5, 0), (0, 3), (63, 63)] {
            let expected = ((x as f64 + 0.5) + (y as f64 + 0.5) * 64.0) / 4096.0;
            assert_eq!(chunk.tile(x, y).unwrap().height, height_from_sample(expected));
        }
    }

    #[test]
    fn test_height_scaling() {
        assert_eq!(height_from_sample(0.0), Height::MIN);
        assert_eq!(height_from_sample(0.5), Height(32_768));
        assert_eq!(height_from_sample(1.0 - f64::EPSILON / 2.0), Height::MAX);
    }

    #[test]
    fn test_deterministic_across_instances() {
        for kind in [NoiseKind::Value, NoiseKind::Perlin] {
            let a = NoiseTerrainGenerator::with_kind(kind, Seed(42), TerrainParams::default())
                .unwrap();
            let b = NoiseTerrainGenerator::with_kind(kind, Seed(42), TerrainParams::default())
                .unwrap();
            for coords in [
                ChunkCoords::new(0, 0),
                ChunkCoords::new(-1, -1),
                ChunkCoords::new(100, -100),
            ] {
                assert_eq!(a.generate(coords), b.generate(coords), "{kind:?} at {coords}");
            }
        }
    }

    #[test]
    fn test_deterministic_across_threads() {
        let generator = std::sync::Arc::new(
            NoiseTerrainGenerator::with_kind(NoiseKind::Perlin, Seed(7), TerrainParams::default())
                .unwrap(),
        );
        let coords = ChunkCoords::new(3, -9);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = std::sync::Arc::clone(&generator);
                std::thread::spawn(move || generator.generate(coords))
            })
            .collect();
        let expected = generator.generate(coords);
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_different_seeds_different_chunks() {
        let a = NoiseTerrainGenerator::new(ValueNoise::new(Seed(0)), TerrainParams::default())
            .unwrap();
        let b = NoiseTerrainGenerator::new(ValueNoise::new(Seed(1)), TerrainParams::default())
            .unwrap();
        let coords = ChunkCoords::new(0, 0);
        assert_ne!(a.generate(coords), b.generate(coords));
    }

    #[test]
    fn test_neighbouring_chunks_differ() {
        let generator =
            NoiseTerrainGenerator::new(PerlinNoise::new(Seed(42)), TerrainParams::default())
                .unwrap();
        assert_ne!(
            generator.generate(ChunkCoords::new(0, 0)),
            generator.generate(ChunkCoords::new(1, 0))
        );
    }

    #[test]
    fn test_negative_chunk_uses_its_own_tiles() {
        // Chunk (-1, 0) covers tiles -64..0 and must match sampling the noise there directly.
        let noise = ValueNoise::new(Seed(3));
        let generator = NoiseTerrainGenerator::new(noise, TerrainParams::default()).unwrap();
        let chunk = generator.generate(ChunkCoords::new(-1, 0));
        let expected = height_from_sample(noise.sample(-64.0 + 0.5, 0.5));
        assert_eq!(chunk.tile(0, 0).unwrap().height, expected);
        let expected = height_from_sample(noise.sample(-1.0 + 0.5, 10.5));
        assert_eq!(chunk.tile(63, 10).unwrap().height, expected);
    }

    #[test]
    fn test_frequency_scales_sample_points() {
        let noise = PerlinNoise::new(Seed(11));
        let params = TerrainParams {
            frequency: 0.25,
            ..Default::default()
        };
        let generator = NoiseTerrainGenerator::new(noise, params).unwrap();
        let chunk = generator.generate(ChunkCoords::new(2, 1));
        let expected = height_from_sample(noise.sample((128.0 + 4.5) * 0.25, (64.0 + 7.5) * 0.25));
        assert_eq!(chunk.tile(4, 7).unwrap().height, expected);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = TerrainParams {
            octaves: 0,
            ..Default::default()
        };
        assert!(NoiseTerrainGenerator::new(FixedNoise(0.5), params).is_err());
    }

    #[test]
    fn test_closure_generator() {
        let generator = |_coords: ChunkCoords| ChunkData::zero();
        assert_eq!(generator.generate(ChunkCoords::new(9, 9)), ChunkData::zero());
    }
}
