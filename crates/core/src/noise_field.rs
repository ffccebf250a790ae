//! Lattice value noise and fractal Brownian motion over a pluggable gradient source.
//!
//! The lattice values come from a [`GradientNoise`] implementation. The
//! default, [`SimplexGradient`], samples the `noise` crate's simplex
//! generator; any `Fn(Vec2) -> f32` closure with roughly [-1, 1] output works
//! too.
//!
//! All functions are deterministic: same source and inputs give the same output.

use ::noise::{NoiseFn, Simplex};

use crate::math::{mix, Vec2};

/// Amplitude of the first fbm octave.
pub const FBM_AMPLITUDE: f32 = 0.5;
/// Frequency multiplier between octaves.
pub const FBM_LACUNARITY: f32 = 2.0;
/// Amplitude multiplier between octaves.
pub const FBM_PERSISTENCE: f32 = 0.6;

/// A deterministic, spatially coherent 2D noise primitive.
pub trait GradientNoise: Send + Sync {
    /// Noise value at `p`, roughly in [-1, 1].
    fn gradient(&self, p: Vec2) -> f32;
}

impl<F> GradientNoise for F
where
    F: Fn(Vec2) -> f32 + Send + Sync,
{
    fn gradient(&self, p: Vec2) -> f32 {
        self(p)
    }
}

/// Seeded simplex gradient noise.
#[derive(Clone)]
pub struct SimplexGradient {
    noise: Simplex,
    seed: u32,
}

impl SimplexGradient {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Simplex::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for SimplexGradient {
    fn default() -> Self {
        Self::new(0)
    }
}

impl std::fmt::Debug for SimplexGradient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexGradient")
            .field("seed", &self.seed)
            .finish()
    }
}

impl GradientNoise for SimplexGradient {
    fn gradient(&self, p: Vec2) -> f32 {
        self.noise.get([p.x as f64, p.y as f64]) as f32
    }
}

/// Smoothly interpolated lattice noise.
///
/// Samples the source at the four integer corners around `p` and blends them
/// with the cubic weight `f * f * (3 - 2 * f)`. At integer points the result
/// is exactly the corner sample.
pub fn value_noise<G: GradientNoise + ?Sized>(source: &G, p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;

    let a = source.gradient(i);
    let b = source.gradient(i + Vec2::new(1.0, 0.0));
    let c = source.gradient(i + Vec2::new(0.0, 1.0));
    let d = source.gradient(i + Vec2::new(1.0, 1.0));

    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);

    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

/// Sum of `octaves` layers of [`value_noise`], doubling frequency and scaling
/// amplitude by 0.6 per layer, starting at 0.5.
///
/// The result is not renormalized; callers clamp as needed. Zero octaves
/// yields exactly 0.
pub fn fbm<G: GradientNoise + ?Sized>(source: &G, p: Vec2, octaves: u32) -> f32 {
    let mut st = p;
    let mut value = 0.0;
    let mut amplitude = FBM_AMPLITUDE;
    for _ in 0..octaves {
        value += amplitude * value_noise(source, st);
        st *= FBM_LACUNARITY;
        amplitude *= FBM_PERSISTENCE;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Integer hash lattice, handy for checking interpolation by hand.
    fn checker(p: Vec2) -> f32 {
        if (p.x as i32 + p.y as i32) % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    #[test]
    fn fbm_with_zero_octaves_is_zero() {
        let g = SimplexGradient::new(7);
        for p in [Vec2::ZERO, Vec2::new(3.3, -1.7), Vec2::new(1e4, 2e4)] {
            assert_eq!(fbm(&g, p, 0), 0.0);
        }
    }

    #[test]
    fn value_noise_equals_source_at_lattice_points() {
        let g = SimplexGradient::new(42);
        for y in -3..3 {
            for x in -3..3 {
                let p = Vec2::new(x as f32, y as f32);
                assert_eq!(value_noise(&g, p), g.gradient(p), "at {p}");
            }
        }
    }

    #[test]
    fn value_noise_midpoint_averages_corners() {
        // u = (0.5, 0.5) at the cell centre, so the result is the mean of the corners.
        let v = value_noise(&checker, Vec2::new(0.5, 0.5));
        assert!(v.abs() < 1e-6, "checker centre should cancel, got {v}");
        let ramp = |p: Vec2| p.x;
        assert!((value_noise(&ramp, Vec2::new(2.5, 9.0)) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn single_octave_is_half_value_noise() {
        let g = SimplexGradient::new(3);
        let p = Vec2::new(0.37, 1.91);
        assert!((fbm(&g, p, 1) - 0.5 * value_noise(&g, p)).abs() < 1e-7);
    }

    #[test]
    fn octaves_double_frequency_and_decay_amplitude() {
        let g = SimplexGradient::new(11);
        let p = Vec2::new(1.25, -0.75);
        let expected = 0.5 * value_noise(&g, p) + 0.3 * value_noise(&g, p * 2.0);
        assert!((fbm(&g, p, 2) - expected).abs() < 1e-6);
    }

    #[test]
    fn fbm_of_constant_source_is_geometric_sum() {
        let one = |_: Vec2| 1.0_f32;
        // 0.5 * (1 + 0.6 + 0.36)
        assert!((fbm(&one, Vec2::new(4.2, 0.1), 3) - 0.98).abs() < 1e-6);
    }

    #[test]
    fn simplex_gradient_is_deterministic_per_seed() {
        let a = SimplexGradient::new(99);
        let b = SimplexGradient::new(99);
        let p = Vec2::new(12.3, 4.56);
        assert_eq!(a.gradient(p).to_bits(), b.gradient(p).to_bits());
        assert_eq!(a.seed(), 99);
    }

    #[test]
    fn trait_object_source_works() {
        let g: Box<dyn GradientNoise> = Box::new(SimplexGradient::default());
        assert!(fbm(g.as_ref(), Vec2::new(0.3, 0.4), 4).is_finite());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn value_noise_bounded_by_source_range(x in -100.0_f32..100.0, y in -100.0_f32..100.0) {
                let g = SimplexGradient::new(1);
                let v = value_noise(&g, Vec2::new(x, y));
                // Bilinear weights are convex, so the output stays near the source range.
                prop_assert!(v.is_finite());
                prop_assert!(v.abs() <= 1.5, "value noise {v}");
            }

            #[test]
            fn fbm_bounded_by_amplitude_sum(x in -50.0_f32..50.0, y in -50.0_f32..50.0, oct in 0_u32..8) {
                let g = SimplexGradient::new(5);
                let v = fbm(&g, Vec2::new(x, y), oct);
                // Amplitudes sum to less than 1.25.
                prop_assert!(v.is_finite());
                prop_assert!(v.abs() <= 1.9, "fbm {v}");
            }
        }
    }
}
