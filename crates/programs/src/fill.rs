//! Flat color fill, optionally blended over the existing frame.

use serde_json::{json, Value};
use tessel_core::blend::blend_unit;
use tessel_core::params::{param_color, param_f32};
use tessel_core::{EngineError, RenderContext, Rgb8, Shader, Vec2, Vec3};

use crate::invalid_param;

const DEFAULT_COLOR: Rgb8 = Rgb8::WHITE;
/// Negative alpha replaces the background outright.
const DEFAULT_ALPHA: f32 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillParams {
    pub color: Rgb8,
    /// Blend factor in `[0, 1]`, or negative for full replacement.
    pub alpha: f32,
}

impl Default for FillParams {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl FillParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// Fails only on a malformed `color`.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Ok(Self {
            color: param_color(params, "color", DEFAULT_COLOR)?,
            alpha: param_f32(params, "alpha", DEFAULT_ALPHA),
        })
    }

    /// Rejects alpha above 1 or NaN.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.alpha.is_nan() || self.alpha > 1.0 {
            return Err(invalid_param("alpha", "must be at most 1, or negative to replace"));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Value {
        json!({ "color": self.color.to_hex(), "alpha": self.alpha })
    }

    pub fn schema() -> Value {
        json!({
            "color": {
                "type": "color",
                "default": DEFAULT_COLOR.to_hex(),
                "description": "Fill color"
            },
            "alpha": {
                "type": "number",
                "default": DEFAULT_ALPHA,
                "min": -1.0,
                "max": 1.0,
                "description": "Blend over the background; negative replaces it"
            }
        })
    }
}

/// Paints every pixel with one color.
#[derive(Debug, Clone)]
pub struct Fill {
    params: FillParams,
    color: Vec3,
}

impl Fill {
    pub fn new(params: FillParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self {
            params,
            color: params.color.to_unit(),
        })
    }

    pub fn params(&self) -> &FillParams {
        &self.params
    }
}

impl Shader for Fill {
    fn evaluate(&self, _coord: Vec2, _ctx: &RenderContext, dst: Vec3) -> Vec3 {
        if self.params.alpha >= 0.0 {
            blend_unit(dst, self.color, self.params.alpha)
        } else {
            self.color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::{FrameBuffer, TileRenderer};

    fn fill(color: Rgb8, alpha: f32) -> Fill {
        Fill::new(FillParams { color, alpha }).unwrap()
    }

    #[test]
    fn negative_alpha_replaces_every_pixel() {
        let renderer = TileRenderer::new(4).unwrap();
        let ctx = RenderContext::still(4, 4).unwrap();
        let mut frame = FrameBuffer::filled(4, 4, Vec3::new(0.2, 0.4, 0.6)).unwrap();
        renderer
            .render(&mut frame, &ctx, &fill(Rgb8::WHITE, -1.0))
            .unwrap();
        assert!(frame.data().iter().all(|&c| c == Vec3::ONE));
    }

    #[test]
    fn zero_alpha_keeps_background() {
        let ctx = RenderContext::still(1, 1).unwrap();
        let bg = Vec3::new(0.1, 0.5, 0.9);
        let out = fill(Rgb8::WHITE, 0.0).evaluate(Vec2::ZERO, &ctx, bg);
        assert_eq!(out, bg);
    }

    #[test]
    fn full_alpha_yields_color() {
        let ctx = RenderContext::still(1, 1).unwrap();
        let out = fill(Rgb8::new(255, 0, 0), 1.0).evaluate(Vec2::ZERO, &ctx, Vec3::ZERO);
        assert_eq!(out, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn half_alpha_is_gamma_correct() {
        let ctx = RenderContext::still(1, 1).unwrap();
        let out = fill(Rgb8::WHITE, 0.5).evaluate(Vec2::ZERO, &ctx, Vec3::ZERO);
        // Perceptual midpoint of black and white sits near 188/255, not 127/255.
        assert!((out.x * 255.0 - 188.0).abs() <= 1.5, "got {}", out.x * 255.0);
    }

    #[test]
    fn from_json_defaults_and_overrides() {
        assert_eq!(FillParams::from_json(&json!({})).unwrap(), FillParams::default());
        let p = FillParams::from_json(&json!({"color": "#102030", "alpha": 0.25})).unwrap();
        assert_eq!(p.color, Rgb8::new(0x10, 0x20, 0x30));
        assert_eq!(p.alpha, 0.25);
    }

    #[test]
    fn alpha_above_one_is_rejected() {
        let params = FillParams {
            alpha: 1.5,
            ..FillParams::default()
        };
        assert!(matches!(
            Fill::new(params),
            Err(EngineError::InvalidParam { .. })
        ));
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(FillParams::from_json(&json!({"color": "white"})).is_err());
    }
}
