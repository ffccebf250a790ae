//! sRGB transfer curves with precomputed lookup tables.
//!
//! Two paths are exposed for each direction: the closed-form curve
//! ([`encode_exact`], [`decode_exact`]) and a table-interpolated fast path
//! ([`encode`], [`decode`]) backed by process-wide tables that are built on
//! first use and never mutated afterwards. Both paths agree to within one
//! table step.

use once_cell::sync::Lazy;

use crate::error::EngineError;
use crate::math::clamp;

/// Number of samples in the shared forward and inverse tables.
pub const GAMMA_TABLE_SIZE: usize = 4096;

static FORWARD: Lazy<GammaTable> = Lazy::new(|| GammaTable::sample(GAMMA_TABLE_SIZE, encode_exact));
static INVERSE: Lazy<GammaTable> = Lazy::new(|| GammaTable::sample(GAMMA_TABLE_SIZE, decode_exact));

/// Forward sRGB transfer (linear light to encoded), closed form.
pub fn encode_exact(u: f32) -> f32 {
    if u <= 0.003_130_8 {
        u * 12.92
    } else {
        1.055 * u.powf(1.0 / 2.4) - 0.055
    }
}

/// Inverse sRGB transfer (encoded to linear light), closed form.
pub fn decode_exact(u: f32) -> f32 {
    if u <= 0.040_45 {
        u / 12.92
    } else {
        ((u + 0.055) / 1.055).powf(2.4)
    }
}

/// Forward transfer through the shared lookup table.
#[inline]
pub fn encode(u: f32) -> f32 {
    FORWARD.lookup(u)
}

/// Inverse transfer through the shared lookup table.
#[inline]
pub fn decode(u: f32) -> f32 {
    INVERSE.lookup(u)
}

/// The shared forward (linear to encoded) table.
pub fn forward_table() -> &'static GammaTable {
    &FORWARD
}

/// The shared inverse (encoded to linear) table.
pub fn inverse_table() -> &'static GammaTable {
    &INVERSE
}

/// A transfer curve sampled at `N` evenly spaced points `i / (N - 1)` over [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct GammaTable {
    samples: Vec<f32>,
}

impl GammaTable {
    /// Samples `curve` at `size` evenly spaced points covering both ends of [0, 1].
    ///
    /// Returns `EngineError::InvalidParam` if `size < 2`, since interpolation
    /// needs at least one interval.
    pub fn build(size: usize, curve: fn(f32) -> f32) -> Result<Self, EngineError> {
        if size < 2 {
            return Err(EngineError::InvalidParam {
                name: "size".into(),
                reason: format!("a gamma table needs at least 2 samples, got {size}"),
            });
        }
        Ok(Self::sample(size, curve))
    }

    /// Builds a forward (linear to encoded) table.
    pub fn forward(size: usize) -> Result<Self, EngineError> {
        Self::build(size, encode_exact)
    }

    /// Builds an inverse (encoded to linear) table.
    pub fn inverse(size: usize) -> Result<Self, EngineError> {
        Self::build(size, decode_exact)
    }

    fn sample(size: usize, curve: fn(f32) -> f32) -> Self {
        let last = (size - 1) as f32;
        Self {
            samples: (0..size).map(|i| curve(i as f32 / last)).collect(),
        }
    }

    /// Number of samples.
    pub fn size(&self) -> usize {
        self.samples.len()
    }

    /// Distance between two adjacent sample positions.
    pub fn step(&self) -> f32 {
        1.0 / (self.samples.len() - 1) as f32
    }

    /// Raw sample values, index 0 at `u = 0`, last index at `u = 1`.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Linearly interpolated lookup of `u`, clamped to [0, 1].
    ///
    /// The lower index is clamped to `N - 2` so `u == 1.0` lands on the last
    /// interval with `frac == 1` rather than reading past the table.
    #[inline]
    pub fn lookup(&self, u: f32) -> f32 {
        let last = self.samples.len() - 1;
        let fpos = clamp(u, 0.0, 1.0) * last as f32;
        let ipos = (fpos.floor() as usize).min(last - 1);
        let frac = fpos - ipos as f32;
        (1.0 - frac) * self.samples[ipos] + frac * self.samples[ipos + 1]
    }
}
