//! Gradient (Perlin-style) noise over the integer lattice.

use strata_grid::Seed;

use crate::hash::{hash_lattice, lattice_floor};
use crate::{NoiseSource, to_unit_interval};

/// The four axis directions followed by the four diagonals, indexed by the low
/// three bits of the lattice hash.
const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

/// Continuous gradient noise. Zero-valued (0.5 after remapping) at every lattice point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerlinNoise {
    seed: Seed,
}

impl PerlinNoise {
    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Dot product of the gradient at lattice point `(ix, iy)` with the offset `(dx, dy)`
    /// from that point to the sample point.
    #[inline]
    fn influence(&self, ix: i32, iy: i32, dx: f64, dy: f64) -> f64 {
        let (gx, gy) = GRADIENTS[(hash_lattice(self.seed, ix, iy) & 0x7) as usize];
        gx * dx + gy * dy
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = lattice_floor(x);
        let y0 = lattice_floor(y);
        let x1 = x0.wrapping_add(1);
        let y1 = y0.wrapping_add(1);

        let fx = x - x.floor();
        let fy = y - y.floor();

        let n00 = self.influence(x0, y0, fx, fy);
        let n10 = self.influence(x1, y0, fx - 1.0, fy);
        let n01 = self.influence(x0, y1, fx, fy - 1.0);
        let n11 = self.influence(x1, y1, fx - 1.0, fy - 1.0);

        let u = smootherstep(fx);
        let v = smootherstep(fy);
        let value = lerp(lerp(n00, n10, u), lerp(n01, n11, u), v);

        to_unit_interval((value + 1.0) * 0.5)
    }
}

impl noise::NoiseFn<f64, 2> for PerlinNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

/// `t³(t(6t − 15) + 10)`
#[inline]
fn smootherstep(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
