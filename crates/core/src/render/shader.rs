//! The per-pixel shader capability.

use crate::math::{Vec2, Vec3};
use crate::render::context::RenderContext;

/// A pure per-pixel function evaluated by the [`TileRenderer`](crate::render::TileRenderer).
///
/// `coord` is the integer pixel position (column, row) as floats, `dst` the
/// pixel's current value, and the return value replaces it. Implementations
/// must be `Send + Sync` because every worker shares one shader.
///
/// This trait is object-safe, and any matching closure implements it.
pub trait Shader: Send + Sync {
    fn evaluate(&self, coord: Vec2, ctx: &RenderContext, dst: Vec3) -> Vec3;
}

impl<F> Shader for F
where
    F: Fn(Vec2, &RenderContext, Vec3) -> Vec3 + Send + Sync,
{
    fn evaluate(&self, coord: Vec2, ctx: &RenderContext, dst: Vec3) -> Vec3 {
        self(coord, ctx, dst)
    }
}
