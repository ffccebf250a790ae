//! Parallel per-pixel rendering.
//!
//! # Module overview
//!
//! - [`context`] -- Resolution and clock shared by all workers for one call.
//! - [`shader`] -- The `Shader` capability evaluated once per pixel.
//! - [`tile`] -- `TileRenderer`, the fork-join strip dispatcher.

pub mod context;
pub mod shader;
pub mod tile;

pub use context::RenderContext;
pub use shader::Shader;
pub use tile::{TileRenderer, REFERENCE_WORKERS};
