//! Value noise: one hashed value per lattice cell.

use strata_grid::Seed;

use crate::hash::{hash_lattice, lattice_floor, unit_from_hash};
use crate::NoiseSource;

/// Piecewise-constant noise. Every point inside the same unit lattice cell
/// `[i, i + 1) × [j, j + 1)` gets the same value, so the field jumps at integer
/// lattice lines. Sample away from those lines (e.g. at tile centres).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueNoise {
    seed: Seed,
}

impl ValueNoise {
    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }
}

impl NoiseSource for ValueNoise {
    #[inline]
    fn sample(&self, x: f64, y: f64) -> f64 {
        unit_from_hash(hash_lattice(self.seed, lattice_floor(x), lattice_floor(y)))
    }
}

impl noise::NoiseFn<f64, 2> for ValueNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_identical_samples() {
        let a = ValueNoise::new(Seed(42));
        let b = ValueNoise::new(Seed(42));
        for i in -50..50 {
            let x = i as f64 * 1.37 + 0.5;
            let y = i as f64 * -0.91 + 0.5;
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn test_samples_in_unit_range() {
        let noise = ValueNoise::new(Seed(u32::MAX));
        for xi in -100..100 {
            for yi in -100..100 {
                let v = noise.sample(xi as f64 * 0.73, yi as f64 * 1.19);
                assert!((0.0..1.0).contains(&v), "sample {v} out of range");
            }
        }
    }

    #[test]
    fn test_constant_within_cell() {
        let noise = ValueNoise::new(Seed(3));
        let corner = noise.sample(5.0, -2.0);
        assert_eq!(noise.sample(5.5, -1.5), corner);
        assert_eq!(noise.sample(5.999, -1.001), corner);
    }

    #[test]
    fn test_negative_cells_are_distinct() {
        let noise = ValueNoise::new(Seed(3));
        // -0.5 floors to -1, so it must not share the cell of 0.5.
        assert_ne!(noise.sample(-0.5, 0.5), noise.sample(0.5, 0.5));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = ValueNoise::new(Seed(1));
        let b = ValueNoise::new(Seed(2));
        let differing = (0..64)
            .filter(|i| a.sample(*i as f64 + 0.5, 0.5) != b.sample(*i as f64 + 0.5, 0.5))
            .count();
        assert!(differing > 60, "only {differing} of 64 samples differ");
    }

    #[test]
    fn test_mean_is_roughly_centered() {
        let noise = ValueNoise::new(Seed(11));
        let count = 10_000;
        let sum: f64 = (0..count)
            .map(|i| noise.sample((i % 100) as f64 + 0.5, (i / 100) as f64 + 0.5))
            .sum();
        let mean = sum / count as f64;
        assert!((mean - 0.5).abs() < 0.02, "mean {mean} too far from 0.5");
    }
}
