#![deny(unsafe_code)]
//! Core types for the tessel procedural shading engine.
//!
//! Provides shader-style vector helpers over `glam`, sRGB gamma lookup
//! tables, gamma-correct `Rgb8` blending, lattice value noise with fbm,
//! the `FrameBuffer` pixel store, the parallel `TileRenderer` with its
//! `Shader` trait, a PPM writer, and the `Scene` render description.

pub mod blend;
pub mod color;
pub mod error;
pub mod frame;
pub mod gamma;
pub mod math;
pub mod noise_field;
pub mod params;
pub mod ppm;
pub mod render;
pub mod scene;

pub use blend::{blend, blend_linear, blend_unit};
pub use color::Rgb8;
pub use error::EngineError;
pub use frame::FrameBuffer;
pub use gamma::GammaTable;
pub use math::{Vec2, Vec3};
pub use noise_field::{fbm, value_noise, GradientNoise, SimplexGradient};
pub use render::{RenderContext, Shader, TileRenderer};
pub use scene::{Pass, Scene};
