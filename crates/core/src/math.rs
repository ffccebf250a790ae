//! Shader-style scalar and vector helpers over [`glam`] vectors.
//!
//! `Vec2`/`Vec3` are `Copy` value types; every function here returns a new
//! value and never mutates its inputs. Component-wise arithmetic (`+ - * /`
//! with vectors or scalars) comes straight from glam's operators.

pub use glam::{Vec2, Vec3};

/// Dot product of two 2D vectors.
#[inline]
pub fn dot2(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

/// Euclidean length of a 2D vector.
#[inline]
pub fn length2(v: Vec2) -> f32 {
    dot2(v, v).sqrt()
}

/// Unit vector in the direction of `v`, or the zero vector when `|v| == 0`.
#[inline]
pub fn normalize2(v: Vec2) -> Vec2 {
    let len = length2(v);
    if len == 0.0 {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Unit vector in the direction of `v`, or the zero vector when `|v| == 0`.
#[inline]
pub fn normalize3(v: Vec3) -> Vec3 {
    let len = v.dot(v).sqrt();
    if len == 0.0 {
        Vec3::ZERO
    } else {
        v / len
    }
}

/// Clamps `x` into `[mn, mx]`. Unlike `f32::clamp` this never panics on
/// inverted bounds; `mn` wins.
#[inline]
pub fn clamp(x: f32, mn: f32, mx: f32) -> f32 {
    if x < mn {
        mn
    } else if x > mx {
        mx
    } else {
        x
    }
}

/// Component-wise [`clamp`] of a color or vector against scalar bounds.
#[inline]
pub fn clamp3(v: Vec3, mn: f32, mx: f32) -> Vec3 {
    Vec3::new(clamp(v.x, mn, mx), clamp(v.y, mn, mx), clamp(v.z, mn, mx))
}

/// Component-wise minimum against a scalar.
#[inline]
pub fn min3s(v: Vec3, s: f32) -> Vec3 {
    Vec3::new(v.x.min(s), v.y.min(s), v.z.min(s))
}

/// Component-wise maximum against a scalar.
#[inline]
pub fn max3s(v: Vec3, s: f32) -> Vec3 {
    Vec3::new(v.x.max(s), v.y.max(s), v.z.max(s))
}

/// Linear interpolation `(1 - a) * x + a * y`.
#[inline]
pub fn mix(x: f32, y: f32, a: f32) -> f32 {
    (1.0 - a) * x + a * y
}

/// Component-wise [`mix`].
#[inline]
pub fn mix3(x: Vec3, y: Vec3, a: f32) -> Vec3 {
    Vec3::new(mix(x.x, y.x, a), mix(x.y, y.y, a), mix(x.z, y.z, a))
}

/// Hermite smoothstep between edges `e0` and `e1`.
///
/// Edges may be given in either order. Equal edges degenerate to a hard step
/// at `e0` instead of dividing by zero.
#[inline]
pub fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    if e0 == e1 {
        return if x < e0 { 0.0 } else { 1.0 };
    }
    let t = clamp((x - e0) / (e1 - e0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Returns exactly `-1.0`, `0.0` or `1.0`. NaN maps to `0.0`.
///
/// Differs from `f32::signum`, which reports `1.0` for `+0.0`.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Fractional part `x - floor(x)`, always in `[0, 1)` for finite input.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Degrees to radians.
#[inline]
pub fn radians(deg: f32) -> f32 {
    deg.to_radians()
}
