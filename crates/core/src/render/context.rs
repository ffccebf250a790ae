//! Per-render-call context shared read-only by every worker.

use crate::error::EngineError;
use crate::math::Vec2;

/// Resolution and clock for one render call.
///
/// `time` is elapsed seconds derived as `frame / fps`. Shader-specific
/// parameters live on the shader value itself, not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    resolution: Vec2,
    time: f32,
    frame: u32,
    fps: u32,
}

impl RenderContext {
    /// Context for frame number `frame` of an animation running at `fps`.
    ///
    /// Returns `EngineError::InvalidDimensions` for a zero-sized target and
    /// `EngineError::InvalidFrameRate` when `fps == 0`.
    pub fn new(width: usize, height: usize, frame: u32, fps: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        if fps == 0 {
            return Err(EngineError::InvalidFrameRate);
        }
        Ok(Self {
            resolution: Vec2::new(width as f32, height as f32),
            time: frame as f32 / fps as f32,
            frame,
            fps,
        })
    }

    /// Context for a single still image at time zero.
    pub fn still(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::new(width, height, 0, 1)
    }

    /// Target size in pixels.
    pub fn resolution(&self) -> Vec2 {
        self.resolution
    }

    /// Elapsed seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub(crate) fn size(&self) -> (usize, usize) {
        (self.resolution.x as usize, self.resolution.y as usize)
    }
}
