//! Error types for the tessel core.

use thiserror::Error;

/// Errors produced by buffer, renderer, and shader-parameter operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero (or their product overflowed) when creating a buffer.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A buffer and a context (or two buffers) disagree about their size.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// An (x, y) pixel coordinate was outside the frame.
    #[error("pixel ({x}, {y}) out of bounds for frame of size ({width}, {height})")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A parameter had the right type but a value the shader cannot use.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// No shader program is registered under this name.
    #[error("unknown shader: {0}")]
    UnknownShader(String),

    /// Frames per second was zero, so elapsed time is undefined.
    #[error("invalid frame rate: fps must be non-zero")]
    InvalidFrameRate,

    /// A renderer was requested with zero workers.
    #[error("invalid worker count: at least one worker is required")]
    InvalidWorkerCount,

    /// The worker thread pool could not be started.
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// Reading or writing an image file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e.to_string())
    }
}
