//! Fractal (multi-octave) sampling on top of any [`NoiseSource`].

use crate::{NoiseSource, to_unit_interval};

/// Fractal sampling helpers available on every [`NoiseSource`].
pub trait NoiseSourceExt: NoiseSource {
    /// A single band: the source sampled at `frequency`, scaled by `amplitude`.
    #[inline]
    fn sample_band(&self, x: f64, y: f64, frequency: f64, amplitude: f64) -> f64 {
        self.sample(x * frequency, y * frequency) * amplitude
    }

    /// Sum `octaves` bands, doubling the frequency and multiplying the amplitude by
    /// `persistence` each time, then divide by the total amplitude so the result stays
    /// in `[0, 1)`.
    ///
    /// `octaves` below 1 is treated as 1. `persistence` must be positive.
    fn sample_octaves(&self, x: f64, y: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut amplitude_sum = 0.0;

        for _ in 0..octaves.max(1) {
            total += self.sample_band(x, y, frequency, amplitude);
            amplitude_sum += amplitude;

            frequency *= 2.0;
            amplitude *= persistence;
        }

        to_unit_interval(total / amplitude_sum)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSourceExt for N {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PerlinNoise, ValueNoise};
    use strata_grid::Seed;

    struct Constant(f64);

    impl NoiseSource for Constant {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    /// Returns the x coordinate it was sampled at, so band frequencies are observable.
    struct EchoX;

    impl NoiseSource for EchoX {
        fn sample(&self, x: f64, _y: f64) -> f64 {
            x
        }
    }

    #[test]
    fn test_single_octave_equals_plain_sample() {
        let noise = PerlinNoise::new(Seed(42));
        for i in 0..100 {
            let (x, y) = (i as f64 * 0.31, i as f64 * -0.17);
            assert_eq!(noise.sample_octaves(x, y, 1, 0.5), noise.sample(x, y));
        }
    }

    #[test]
    fn test_zero_octaves_treated_as_one() {
        let noise = ValueNoise::new(Seed(1));
        assert_eq!(noise.sample_octaves(3.5, 4.5, 0, 0.5), noise.sample(3.5, 4.5));
    }

    #[test]
    fn test_constant_source_normalizes_exactly() {
        let noise = Constant(0.25);
        for octaves in 1..8 {
            for persistence in [0.1, 0.5, 1.0, 2.0] {
                let v = noise.sample_octaves(0.0, 0.0, octaves, persistence);
                assert!((v - 0.25).abs() < 1e-12, "octaves={octaves} p={persistence}: {v}");
            }
        }
    }

    #[test]
    fn test_frequencies_double_per_octave() {
        // Bands sample at x, 2x, 4x with amplitudes 1, 0.5, 0.25.
        let v = EchoX.sample_octaves(0.1, 0.0, 3, 0.5);
        let expected = (0.1 + 0.5 * 0.2 + 0.25 * 0.4) / 1.75;
        assert!((v - expected).abs() < 1e-12);
    }

    #[test]
    fn test_band_scales_amplitude() {
        assert_eq!(Constant(0.5).sample_band(1.0, 1.0, 4.0, 3.0), 1.5);
    }

    #[test]
    fn test_octave_samples_in_unit_range() {
        let noise = PerlinNoise::new(Seed(99));
        for i in -200..200 {
            let v = noise.sample_octaves(i as f64 * 0.37 + 0.5, i as f64 * 0.11, 6, 0.5);
            assert!((0.0..1.0).contains(&v), "sample {v} out of range");
        }
    }

    #[test]
    fn test_overflowing_coordinates_stay_in_range() {
        // Doubling 1e308 per octave overflows to infinity.
        for noise in [
            Box::new(PerlinNoise::new(Seed(5))) as Box<dyn NoiseSource>,
            Box::new(ValueNoise::new(Seed(5))),
        ] {
            for (x, y) in [(1e308, 0.5), (-1e308, 1e308), (f64::MAX, f64::MAX)] {
                let v = noise.sample_octaves(x, y, 2, 0.5);
                assert!((0.0..1.0).contains(&v), "sample {v} at ({x}, {y}) out of range");
            }
        }
    }

    #[test]
    fn test_works_through_trait_object() {
        let boxed: Box<dyn NoiseSource> = Box::new(Constant(0.75));
        assert_eq!(boxed.sample_octaves(0.0, 0.0, 4, 0.5), 0.75);
    }
}
