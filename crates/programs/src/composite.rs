//! Sprite compositing shaders.
//!
//! Both shaders place an RGBA [`Sprite`] with its top-left corner at a pixel
//! origin. Pixels outside the sprite's rectangle pass through unchanged, and
//! because the renderer only visits in-frame pixels, sprites hanging over the
//! frame edge are clipped rather than written out of bounds.
//!
//! Compositing works on encoded bytes: the frame pixel is quantized to
//! [`Rgb8`], blended, and converted back. Zero coverage leaves the pixel
//! untouched, so no quantization happens there.

use tessel_core::blend::{blend, blend_linear};
use tessel_core::{EngineError, RenderContext, Rgb8, Shader, Vec2, Vec3};

use crate::invalid_param;

/// A straight-alpha RGBA8 image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

impl Sprite {
    /// Wraps an RGBA buffer of `width * height * 4` bytes.
    ///
    /// Returns `EngineError::InvalidDimensions` for zero or overflowing
    /// dimensions and `EngineError::InvalidParam` on a length mismatch.
    pub fn new(width: usize, height: usize, rgba: Vec<u8>) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        if rgba.len() != expected {
            return Err(invalid_param(
                "sprite",
                format!("expected {expected} RGBA bytes, got {}", rgba.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// RGBA of the sprite pixel at `(x, y)`; caller guarantees bounds.
    fn texel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }

    /// Sprite-local coordinates of frame pixel `coord` for a sprite at `origin`.
    fn local(&self, origin: (usize, usize), coord: Vec2) -> Option<(usize, usize)> {
        let (x, y) = (coord.x as usize, coord.y as usize);
        let lx = x.checked_sub(origin.0)?;
        let ly = y.checked_sub(origin.1)?;
        (lx < self.width && ly < self.height).then_some((lx, ly))
    }
}

fn check_alpha(alpha: f32) -> Result<(), EngineError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(invalid_param("alpha", "must be within [0, 1]"));
    }
    Ok(())
}

/// Lays a sprite's RGB over the frame with a uniform opacity.
///
/// Blends in encoded space with [`blend_linear`]; the sprite's own alpha
/// channel is ignored.
#[derive(Debug, Clone)]
pub struct Overlay {
    sprite: Sprite,
    origin: (usize, usize),
    alpha: f32,
}

impl Overlay {
    pub fn new(sprite: Sprite, origin: (usize, usize), alpha: f32) -> Result<Self, EngineError> {
        check_alpha(alpha)?;
        Ok(Self {
            sprite,
            origin,
            alpha,
        })
    }
}

impl Shader for Overlay {
    fn evaluate(&self, coord: Vec2, _ctx: &RenderContext, dst: Vec3) -> Vec3 {
        let Some((x, y)) = self.sprite.local(self.origin, coord) else {
            return dst;
        };
        if self.alpha == 0.0 {
            return dst;
        }
        let [r, g, b, _] = self.sprite.texel(x, y);
        blend_linear(Rgb8::from_unit(dst), Rgb8::new(r, g, b), self.alpha).to_unit()
    }
}

/// Paints a flat color through a sprite used as a mask.
///
/// Coverage is the sprite's red channel scaled by `alpha`; the color is
/// blended over the frame with the gamma-correct [`blend`].
#[derive(Debug, Clone)]
pub struct Stencil {
    sprite: Sprite,
    origin: (usize, usize),
    color: Rgb8,
    alpha: f32,
}

impl Stencil {
    pub fn new(
        sprite: Sprite,
        origin: (usize, usize),
        color: Rgb8,
        alpha: f32,
    ) -> Result<Self, EngineError> {
        check_alpha(alpha)?;
        Ok(Self {
            sprite,
            origin,
            color,
            alpha,
        })
    }
}

impl Shader for Stencil {
    fn evaluate(&self, coord: Vec2, _ctx: &RenderContext, dst: Vec3) -> Vec3 {
        let Some((x, y)) = self.sprite.local(self.origin, coord) else {
            return dst;
        };
        let coverage = self.sprite.texel(x, y)[0] as f32 / 255.0 * self.alpha;
        if coverage == 0.0 {
            return dst;
        }
        blend(Rgb8::from_unit(dst), self.color, coverage).to_unit()
    }
}
