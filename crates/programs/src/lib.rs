#![deny(unsafe_code)]
//! Shader program registry: maps program names to parameter sets and shader
//! implementations, plus sprite compositing and RGBA/PNG output.
//!
//! This crate sits between `tessel-core` (which defines the `Shader` trait and
//! the renderer) and front ends like the CLI, so name lookup and parameter
//! parsing live in one place.

pub mod circle;
pub mod composite;
pub mod fbm_fill;
pub mod fill;
pub mod pixel;
pub mod star;

#[cfg(feature = "png")]
pub mod snapshot;

use serde_json::Value;
use tessel_core::{EngineError, RenderContext, Shader, Vec2, Vec3};

pub use circle::{Circle, CircleParams};
pub use composite::{Overlay, Sprite, Stencil};
pub use fbm_fill::{FbmFill, FbmFillParams};
pub use fill::{Fill, FillParams};
pub use star::{Star, StarParams};

/// All available program names.
const PROGRAM_NAMES: &[&str] = &["fill", "fbm", "star", "circle"];

pub(crate) fn invalid_param(name: &str, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidParam {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Parameters for one of the built-in programs, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShaderParams {
    Fill(FillParams),
    FbmFill(FbmFillParams),
    Star(StarParams),
    Circle(CircleParams),
}

impl ShaderParams {
    /// Parses the parameter set of the program called `name`.
    ///
    /// Returns `EngineError::UnknownShader` if the name is not recognized.
    pub fn from_json(name: &str, params: &Value) -> Result<Self, EngineError> {
        match name {
            "fill" => Ok(ShaderParams::Fill(FillParams::from_json(params)?)),
            "fbm" => Ok(ShaderParams::FbmFill(FbmFillParams::from_json(params)?)),
            "star" => Ok(ShaderParams::Star(StarParams::from_json(params)?)),
            "circle" => Ok(ShaderParams::Circle(CircleParams::from_json(params)?)),
            _ => Err(EngineError::UnknownShader(name.to_string())),
        }
    }

    /// Registry name of the program these parameters belong to.
    pub fn name(&self) -> &'static str {
        match self {
            ShaderParams::Fill(_) => "fill",
            ShaderParams::FbmFill(_) => "fbm",
            ShaderParams::Star(_) => "star",
            ShaderParams::Circle(_) => "circle",
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ShaderParams::Fill(p) => p.to_json(),
            ShaderParams::FbmFill(p) => p.to_json(),
            ShaderParams::Star(p) => p.to_json(),
            ShaderParams::Circle(p) => p.to_json(),
        }
    }
}

/// Enumeration of all built-in shader programs.
///
/// Wraps each program and delegates `Shader::evaluate`. Use
/// [`ShaderProgram::from_name`] for string-based construction (CLI, scenes).
#[derive(Debug)]
pub enum ShaderProgram {
    Fill(Fill),
    FbmFill(FbmFill),
    Star(Star),
    Circle(Circle),
}

impl ShaderProgram {
    /// Builds a program from validated parameters.
    ///
    /// Returns `EngineError::InvalidParam` if the parameters are out of range.
    pub fn from_params(params: ShaderParams) -> Result<Self, EngineError> {
        let program = match params {
            ShaderParams::Fill(p) => ShaderProgram::Fill(Fill::new(p)?),
            ShaderParams::FbmFill(p) => ShaderProgram::FbmFill(FbmFill::new(p)?),
            ShaderParams::Star(p) => ShaderProgram::Star(Star::new(p)?),
            ShaderParams::Circle(p) => ShaderProgram::Circle(Circle::new(p)?),
        };
        log::debug!("built shader program '{}'", params.name());
        Ok(program)
    }

    /// Constructs a program by name from a JSON parameter object.
    ///
    /// Returns `EngineError::UnknownShader` if the name is not recognized.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, EngineError> {
        Self::from_params(ShaderParams::from_json(name, params)?)
    }

    /// Returns a slice of all recognized program names.
    pub fn list_programs() -> &'static [&'static str] {
        PROGRAM_NAMES
    }

    /// Parameter schema of the program called `name`: type, default, range
    /// and description per key.
    pub fn param_schema(name: &str) -> Result<Value, EngineError> {
        match name {
            "fill" => Ok(FillParams::schema()),
            "fbm" => Ok(FbmFillParams::schema()),
            "star" => Ok(StarParams::schema()),
            "circle" => Ok(CircleParams::schema()),
            _ => Err(EngineError::UnknownShader(name.to_string())),
        }
    }

    /// The parameters this program was built with.
    pub fn params(&self) -> ShaderParams {
        match self {
            ShaderProgram::Fill(s) => ShaderParams::Fill(*s.params()),
            ShaderProgram::FbmFill(s) => ShaderParams::FbmFill(*s.params()),
            ShaderProgram::Star(s) => ShaderParams::Star(*s.params()),
            ShaderProgram::Circle(s) => ShaderParams::Circle(*s.params()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.params().name()
    }
}

impl Shader for ShaderProgram {
    fn evaluate(&self, coord: Vec2, ctx: &RenderContext, dst: Vec3) -> Vec3 {
        match self {
            ShaderProgram::Fill(s) => s.evaluate(coord, ctx, dst),
            ShaderProgram::FbmFill(s) => s.evaluate(coord, ctx, dst),
            ShaderProgram::Star(s) => s.evaluate(coord, ctx, dst),
            ShaderProgram::Circle(s) => s.evaluate(coord, ctx, dst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tessel_core::{FrameBuffer, Rgb8, TileRenderer};

    fn render(program: &ShaderProgram, w: usize, h: usize, workers: usize) -> FrameBuffer {
        let ctx = RenderContext::new(w, h, 10, 30).unwrap();
        let mut frame = FrameBuffer::new(w, h).unwrap();
        TileRenderer::new(workers)
            .unwrap()
            .render(&mut frame, &ctx, program)
            .unwrap();
        frame
    }

    #[test]
    fn from_name_builds_every_listed_program() {
        for name in ShaderProgram::list_programs() {
            let program = ShaderProgram::from_name(name, &json!({})).unwrap();
            assert_eq!(program.name(), *name);
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = ShaderProgram::from_name("nonexistent", &json!({}));
        assert!(matches!(result, Err(EngineError::UnknownShader(_))));
        assert!(ShaderProgram::param_schema("nonexistent").is_err());
    }

    #[test]
    fn white_fill_replaces_four_by_four() {
        let program =
            ShaderProgram::from_name("fill", &json!({"color": "#ffffff", "alpha": -1})).unwrap();
        let frame = render(&program, 4, 4, 8);
        assert!(frame.data().iter().all(|&c| c == Vec3::ONE));
    }

    #[test]
    fn invalid_params_surface_at_construction() {
        let result = ShaderProgram::from_name("star", &json!({"radius": -2.0}));
        assert!(matches!(result, Err(EngineError::InvalidParam { .. })));
        let result = ShaderProgram::from_name("fill", &json!({"color": 7}));
        assert!(matches!(result, Err(EngineError::ParamTypeMismatch { .. })));
    }

    #[test]
    fn params_round_trip_through_json() {
        let program =
            ShaderProgram::from_name("star", &json!({"count": 12, "color": "#010203"})).unwrap();
        let params = program.params();
        let StarParams { count, color, .. } = match params {
            ShaderParams::Star(p) => p,
            other => panic!("expected star params, got {other:?}"),
        };
        assert_eq!(count, 12);
        assert_eq!(color, Rgb8::new(1, 2, 3));
        assert_eq!(
            ShaderParams::from_json(params.name(), &params.to_json()).unwrap(),
            params
        );
    }

    #[test]
    fn param_schema_has_type_default_description() {
        for name in ShaderProgram::list_programs() {
            let schema = ShaderProgram::param_schema(name).unwrap();
            let keys = schema.as_object().unwrap();
            assert!(!keys.is_empty(), "{name} has an empty schema");
            for (key, entry) in keys {
                assert!(entry.get("type").is_some(), "{name}.{key} missing 'type'");
                assert!(entry.get("default").is_some(), "{name}.{key} missing 'default'");
                assert!(
                    entry.get("description").is_some(),
                    "{name}.{key} missing 'description'"
                );
            }
        }
    }

    #[test]
    fn schema_defaults_build_default_params() {
        for name in ShaderProgram::list_programs() {
            let schema = ShaderProgram::param_schema(name).unwrap();
            let defaults: serde_json::Map<String, Value> = schema
                .as_object()
                .unwrap()
                .iter()
                .map(|(k, v)| (k.clone(), v["default"].clone()))
                .collect();
            let from_defaults = ShaderParams::from_json(name, &Value::Object(defaults)).unwrap();
            let from_empty = ShaderParams::from_json(name, &json!({})).unwrap();
            assert_eq!(from_defaults, from_empty, "{name} schema defaults drifted");
        }
    }

    #[test]
    fn every_program_is_worker_count_invariant() {
        for name in ShaderProgram::list_programs() {
            let program = ShaderProgram::from_name(name, &json!({})).unwrap();
            let reference = render(&program, 19, 13, 1);
            for workers in [4, 8, 16] {
                let other = render(&program, 19, 13, workers);
                assert!(
                    reference
                        .data()
                        .iter()
                        .zip(other.data())
                        .all(|(a, b)| a.to_array().map(f32::to_bits)
                            == b.to_array().map(f32::to_bits)),
                    "{name} diverged at {workers} workers"
                );
            }
        }
    }

    #[test]
    fn programs_compose_as_passes() {
        let ctx = RenderContext::still(8, 8).unwrap();
        let renderer = TileRenderer::new(2).unwrap();
        let mut frame = FrameBuffer::new(8, 8).unwrap();
        let base = ShaderProgram::from_name("fill", &json!({"color": "#000080"})).unwrap();
        let wash = ShaderProgram::from_name("fill", &json!({"color": "#ffffff", "alpha": 0.0}))
            .unwrap();
        renderer.render(&mut frame, &ctx, &base).unwrap();
        renderer.render(&mut frame, &ctx, &wash).unwrap();
        assert_eq!(Rgb8::from_unit(frame.get(3, 3).unwrap()), Rgb8::new(0, 0, 0x80));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fill_alpha_blend_stays_between_endpoints(alpha in 0.0f32..=1.0, g in 0u8..=255) {
                let program = ShaderProgram::from_name(
                    "fill",
                    &json!({"color": format!("#{g:02x}{g:02x}{g:02x}"), "alpha": alpha}),
                ).unwrap();
                let ctx = RenderContext::still(1, 1).unwrap();
                let out = program.evaluate(Vec2::ZERO, &ctx, Vec3::ZERO);
                let hi = g as f32 / 255.0;
                prop_assert!(out.x >= 0.0 && out.x <= hi + 1e-3, "out {} above {}", out.x, hi);
            }

            #[test]
            fn star_output_is_always_in_unit_range(
                x in 0.0f32..64.0,
                y in 0.0f32..48.0,
                frame in 0u32..600,
                radius in 0.05f32..2.0,
            ) {
                let program = ShaderProgram::from_name("star", &json!({"radius": radius})).unwrap();
                let ctx = RenderContext::new(64, 48, frame, 60).unwrap();
                let c = program.evaluate(Vec2::new(x, y), &ctx, Vec3::ZERO);
                for ch in c.to_array() {
                    prop_assert!((0.0..=1.0).contains(&ch), "channel {} out of range", ch);
                }
            }
        }
    }
}
