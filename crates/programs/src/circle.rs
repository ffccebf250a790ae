//! Anti-aliased disc from a signed distance function.
//!
//! Coordinates are centered and scaled so the frame height spans `[-1, 1]`;
//! the disc keeps its shape on non-square frames.

use serde_json::{json, Value};
use tessel_core::math::{clamp, length2, mix3, sign, smoothstep};
use tessel_core::params::{param_color, param_f32};
use tessel_core::{EngineError, RenderContext, Rgb8, Shader, Vec2, Vec3};

use crate::invalid_param;

const DEFAULT_RADIUS: f32 = 0.5;
const DEFAULT_INSIDE: Rgb8 = Rgb8::WHITE;
const DEFAULT_OUTSIDE: Rgb8 = Rgb8::new(0x00, 0x40, 0x40);
const DEFAULT_EDGE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParams {
    /// Radius in half-heights of the frame.
    pub radius: f32,
    pub inside: Rgb8,
    pub outside: Rgb8,
    /// Width of the anti-aliased rim outside the disc.
    pub edge: f32,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            inside: DEFAULT_INSIDE,
            outside: DEFAULT_OUTSIDE,
            edge: DEFAULT_EDGE,
        }
    }
}

impl CircleParams {
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Ok(Self {
            radius: param_f32(params, "radius", DEFAULT_RADIUS),
            inside: param_color(params, "inside", DEFAULT_INSIDE)?,
            outside: param_color(params, "outside", DEFAULT_OUTSIDE)?,
            edge: param_f32(params, "edge", DEFAULT_EDGE),
        })
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid_param("radius", "must be a positive number"));
        }
        if !(self.edge.is_finite() && self.edge > 0.0) {
            return Err(invalid_param("edge", "must be a positive number"));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Value {
        json!({
            "radius": self.radius,
            "inside": self.inside.to_hex(),
            "outside": self.outside.to_hex(),
            "edge": self.edge,
        })
    }

    pub fn schema() -> Value {
        json!({
            "radius": {
                "type": "number",
                "default": DEFAULT_RADIUS,
                "min": 0.0,
                "description": "Disc radius in half frame heights"
            },
            "inside": {
                "type": "color",
                "default": DEFAULT_INSIDE.to_hex(),
                "description": "Disc color"
            },
            "outside": {
                "type": "color",
                "default": DEFAULT_OUTSIDE.to_hex(),
                "description": "Color around the disc"
            },
            "edge": {
                "type": "number",
                "default": DEFAULT_EDGE,
                "min": 0.0,
                "description": "Anti-aliasing rim width"
            }
        })
    }
}

/// Signed distance from `p` to a circle of radius `r` at the origin; negative inside.
pub fn sd_circle(p: Vec2, r: f32) -> f32 {
    length2(p) - r
}

#[derive(Debug, Clone)]
pub struct Circle {
    params: CircleParams,
    inside: Vec3,
    outside: Vec3,
}

impl Circle {
    pub fn new(params: CircleParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self {
            params,
            inside: params.inside.to_unit(),
            outside: params.outside.to_unit(),
        })
    }

    pub fn params(&self) -> &CircleParams {
        &self.params
    }
}

impl Shader for Circle {
    fn evaluate(&self, coord: Vec2, ctx: &RenderContext, _dst: Vec3) -> Vec3 {
        let res = ctx.resolution();
        let p = (coord * 2.0 - res) / res.y;
        let d = -sd_circle(p, self.params.radius);

        let solid = if sign(d) > 0.0 { 1.0 } else { 0.0 };
        let rim = smoothstep(self.params.edge, 0.0, d.abs());
        mix3(self.outside, self.inside, clamp(solid + rim, 0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle() -> Circle {
        Circle::new(CircleParams::default()).unwrap()
    }

    #[test]
    fn sd_circle_sign_convention() {
        assert!(sd_circle(Vec2::ZERO, 0.5) < 0.0);
        assert_eq!(sd_circle(Vec2::new(0.5, 0.0), 0.5), 0.0);
        assert!(sd_circle(Vec2::new(1.0, 1.0), 0.5) > 0.0);
    }

    #[test]
    fn center_is_inside_color() {
        let ctx = RenderContext::still(640, 480).unwrap();
        let out = circle().evaluate(Vec2::new(320.0, 240.0), &ctx, Vec3::ZERO);
        assert_eq!(out, Vec3::ONE);
    }

    #[test]
    fn corner_is_outside_color() {
        let ctx = RenderContext::still(640, 480).unwrap();
        let out = circle().evaluate(Vec2::ZERO, &ctx, Vec3::ZERO);
        assert_eq!(out, DEFAULT_OUTSIDE.to_unit());
    }

    #[test]
    fn rim_is_blended() {
        let ctx = RenderContext::still(200, 200).unwrap();
        // p.x = 0.505 sits half an edge width outside the disc.
        let x = (0.505 + 1.0) * 100.0;
        let out = circle().evaluate(Vec2::new(x, 100.0), &ctx, Vec3::ZERO);
        let outside = DEFAULT_OUTSIDE.to_unit();
        assert!(out.x > outside.x && out.x < 1.0, "rim value {}", out.x);
    }

    #[test]
    fn disc_is_round_on_wide_frames() {
        let ctx = RenderContext::still(400, 100).unwrap();
        let c = circle();
        // Radius 0.5 half-heights is 25 px in both directions.
        assert_eq!(c.evaluate(Vec2::new(220.0, 50.0), &ctx, Vec3::ZERO), Vec3::ONE);
        assert_eq!(c.evaluate(Vec2::new(200.0, 70.0), &ctx, Vec3::ZERO), Vec3::ONE);
        let outside = DEFAULT_OUTSIDE.to_unit();
        assert_eq!(c.evaluate(Vec2::new(230.0, 50.0), &ctx, Vec3::ZERO), outside);
        assert_eq!(c.evaluate(Vec2::new(200.0, 80.0), &ctx, Vec3::ZERO), outside);
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let params = CircleParams {
            radius: 0.0,
            ..CircleParams::default()
        };
        assert!(matches!(
            Circle::new(params),
            Err(EngineError::InvalidParam { ref name, .. }) if name == "radius"
        ));
    }
}
