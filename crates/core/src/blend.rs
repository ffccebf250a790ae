//! Color interpolation: perceptual (gamma-correct) and encoded-space.
//!
//! The perceptual blends decode both endpoints to linear light, interpolate,
//! and re-encode. `alpha == 0` and `alpha == 1` return the matching endpoint
//! untouched so repeated compositing at full or zero coverage never drifts.

use crate::color::{unit_to_byte, Rgb8};
use crate::gamma;
use crate::math::{mix, mix3, Vec3};

/// Gamma-correct blend of two byte colors through the shared lookup tables.
pub fn blend(c0: Rgb8, c1: Rgb8, alpha: f32) -> Rgb8 {
    if alpha == 0.0 {
        return c0;
    }
    if alpha == 1.0 {
        return c1;
    }
    Rgb8::from_linear(mix3(c0.to_linear(), c1.to_linear(), alpha))
}

/// Same as [`blend`] but through the closed-form transfer curves.
pub fn blend_exact(c0: Rgb8, c1: Rgb8, alpha: f32) -> Rgb8 {
    if alpha == 0.0 {
        return c0;
    }
    if alpha == 1.0 {
        return c1;
    }
    let decode = |c: Rgb8| c.to_unit().to_array().map(gamma::decode_exact);
    let (a, b) = (decode(c0), decode(c1));
    let [r, g, bl] = [0, 1, 2].map(|i| unit_to_byte(gamma::encode_exact(mix(a[i], b[i], alpha))));
    Rgb8::new(r, g, bl)
}

/// Interpolates directly on encoded bytes, `floor((1 - a) * c0 + a * c1)` per channel.
///
/// Cheaper than [`blend`] and not perceptually correct; meant for compositing
/// onto buffers that already hold encoded values.
pub fn blend_linear(c0: Rgb8, c1: Rgb8, alpha: f32) -> Rgb8 {
    // x + a * (y - x) never overshoots an endpoint, unlike the two-product form.
    let lerp = |a: u8, b: u8| {
        let (a, b) = (a as f32, b as f32);
        (a + alpha * (b - a)).floor().clamp(0.0, 255.0) as u8
    };
    Rgb8::new(lerp(c0.r, c1.r), lerp(c0.g, c1.g), lerp(c0.b, c1.b))
}

/// Gamma-correct blend of encoded unit colors without byte quantization.
///
/// Used by shaders that composite over a floating-point frame.
pub fn blend_unit(c0: Vec3, c1: Vec3, alpha: f32) -> Vec3 {
    if alpha == 0.0 {
        return c0;
    }
    if alpha == 1.0 {
        return c1;
    }
    let decode = |c: Vec3| Vec3::new(gamma::decode(c.x), gamma::decode(c.y), gamma::decode(c.z));
    let lin = mix3(decode(c0), decode(c1), alpha);
    Vec3::new(gamma::encode(lin.x), gamma::encode(lin.y), gamma::encode(lin.z))
}
