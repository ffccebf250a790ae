//! Row-major RGB frame of encoded unit-float pixels.
//!
//! A `FrameBuffer` stores `width * height` [`Vec3`] values. Shaders read the
//! current pixel as their background and write the result back; the renderer
//! never resizes the buffer.

use crate::color::{unit_to_byte, Rgb8};
use crate::error::EngineError;
use crate::math::{Vec2, Vec3};

/// A `width x height` image of encoded [0, 1] RGB values.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    data: Vec<Vec3>,
}

impl FrameBuffer {
    /// Creates a black frame of the given dimensions.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::filled(width, height, Vec3::ZERO)
    }

    /// Creates a frame with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Vec3) -> Result<Self, EngineError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![color; len],
        })
    }

    /// Wraps pre-built pixel data, validating that `data.len() == width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<Vec3>) -> Result<Self, EngineError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(EngineError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` as a shader-space vector.
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Read-only access to the row-major pixels.
    pub fn data(&self) -> &[Vec3] {
        &self.data
    }

    /// Mutable access to the row-major pixels.
    pub fn data_mut(&mut self) -> &mut [Vec3] {
        &mut self.data
    }

    /// Consumes the frame, returning its pixels.
    pub fn into_data(self) -> Vec<Vec3> {
        self.data
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, EngineError> {
        if x >= self.width || y >= self.height {
            return Err(EngineError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Pixel at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<Vec3, EngineError> {
        Ok(self.data[self.index(x, y)?])
    }

    /// Overwrites the pixel at `(x, y)`. Values are stored as given, unclamped.
    pub fn set(&mut self, x: usize, y: usize, color: Vec3) -> Result<(), EngineError> {
        let idx = self.index(x, y)?;
        self.data[idx] = color;
        Ok(())
    }

    /// Sets every pixel to `color`.
    pub fn clear(&mut self, color: Vec3) {
        self.data.fill(color);
    }

    /// Quantizes every pixel to a byte color with `floor(clamp01(c) * 255)`.
    pub fn to_rgb8(&self) -> Vec<Rgb8> {
        self.data.iter().map(|&c| Rgb8::from_unit(c)).collect()
    }

    /// Packs pixels as opaque `0xAARRGGBB` words for ARGB32 compositing surfaces.
    pub fn to_argb32(&self) -> Vec<u32> {
        self.data
            .iter()
            .map(|c| {
                0xff00_0000
                    | (unit_to_byte(c.x) as u32) << 16
                    | (unit_to_byte(c.y) as u32) << 8
                    | unit_to_byte(c.z) as u32
            })
            .collect()
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(EngineError::InvalidDimensions)
}
