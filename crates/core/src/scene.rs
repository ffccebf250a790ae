//! Reproducible description of a multi-pass render.
//!
//! A [`Scene`] captures everything needed to recreate a frame: target size,
//! frame clock, background color, optional worker count, and an ordered list
//! of shader passes with their JSON parameters. Passes run in order over the
//! same frame, so later passes composite over earlier ones.

use serde::{Deserialize, Serialize};

use crate::color::Rgb8;
use crate::error::EngineError;
use crate::frame::FrameBuffer;
use crate::render::RenderContext;

fn default_fps() -> u32 {
    60
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// One shader invocation: a program name and its parameter object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pass {
    pub shader: String,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
}

impl Pass {
    pub fn new(shader: &str) -> Self {
        Self {
            shader: shader.to_string(),
            params: empty_params(),
        }
    }
}

/// Reproducible render description. Two equal scenes render bit-identical frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub frame: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default)]
    pub background: Rgb8,
    /// Worker count; `None` means one per available CPU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    #[serde(default)]
    pub passes: Vec<Pass>,
}

impl Scene {
    /// A black still at frame 0, 60 fps, with no passes.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            frame: 0,
            fps: default_fps(),
            background: Rgb8::BLACK,
            workers: None,
            passes: Vec::new(),
        }
    }

    /// Checks dimensions, frame rate and worker count before any allocation.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidDimensions)?;
        if self.fps == 0 {
            return Err(EngineError::InvalidFrameRate);
        }
        if self.workers == Some(0) {
            return Err(EngineError::InvalidWorkerCount);
        }
        Ok(())
    }

    /// The render context for this scene's frame.
    pub fn context(&self) -> Result<RenderContext, EngineError> {
        self.validate()?;
        RenderContext::new(self.width, self.height, self.frame, self.fps)
    }

    /// A frame cleared to the background color.
    pub fn blank_frame(&self) -> Result<FrameBuffer, EngineError> {
        self.validate()?;
        FrameBuffer::filled(self.width, self.height, self.background.to_unit())
    }
}
