//! Seeded lattice hashing shared by all noise sources.

use strata_grid::Seed;

/// Hash an integer lattice point with the seed.
///
/// Mixes both coordinates into a 64-bit state and runs the murmur3 64-bit finalizer
/// (xor-shift / multiply avalanche rounds), returning the low 32 bits.
#[inline]
pub(crate) fn hash_lattice(seed: Seed, x: i32, y: i32) -> u32 {
    let mut h = u64::from(seed.0);
    h ^= u64::from(x as u32).wrapping_mul(0x9E37_79B1_85EB_CA87);
    h ^= u64::from(y as u32).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    h = h.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    h ^= h >> 33;
    h as u32
}

/// Map a 32-bit hash into `[0, 1)`.
#[inline]
pub(crate) fn unit_from_hash(hash: u32) -> f64 {
    f64::from(hash) / 4_294_967_296.0
}

/// Integer lattice cell containing `v`, saturating at the `i32` range.
#[inline]
pub(crate) fn lattice_floor(v: f64) -> i32 {
    v.floor() as i32
}
