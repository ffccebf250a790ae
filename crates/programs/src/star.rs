//! Animated radial star.
//!
//! Rays come from `count` lobes of `max(0, cos(angle - p))^10` whose phase
//! alternates direction ring by ring and drifts with time. The accumulated
//! ray value is folded into `[0, 1]` after every lobe, combined with a
//! pulsing distance falloff, and used to mix `bg` toward `color`. The tint
//! then pulls the result toward white: `1 - 3 * tint * (1 - c)`.

use serde_json::{json, Value};
use tessel_core::math::{clamp3, dot2, length2, mix3, normalize2};
use tessel_core::params::{param_color, param_f32, param_u32};
use tessel_core::{EngineError, RenderContext, Rgb8, Shader, Vec2, Vec3};

use crate::invalid_param;

const DEFAULT_COLOR: Rgb8 = Rgb8::new(0x7f, 0xa9, 0xfd);
const DEFAULT_BG: Rgb8 = Rgb8::new(0x09, 0x02, 0x1d);
const DEFAULT_TINT: Rgb8 = Rgb8::new(0x66, 0x66, 0x66);
const DEFAULT_RADIUS: f32 = 1.0;
const DEFAULT_COUNT: u32 = 48;

/// Radians of rotation per second, about one turn every 25 seconds.
const SPIN_RATE: f32 = 6.28 * 0.04;
/// Pattern units per frame height.
const ZOOM: f32 = 15.0;
const LOBE_SHARPNESS: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarParams {
    pub color: Rgb8,
    pub bg: Rgb8,
    pub tint: Rgb8,
    /// Relative size; 1 is the reference star, smaller values shrink and sharpen it.
    pub radius: f32,
    pub count: u32,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            bg: DEFAULT_BG,
            tint: DEFAULT_TINT,
            radius: DEFAULT_RADIUS,
            count: DEFAULT_COUNT,
        }
    }
}

impl StarParams {
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Ok(Self {
            color: param_color(params, "color", DEFAULT_COLOR)?,
            bg: param_color(params, "bg", DEFAULT_BG)?,
            tint: param_color(params, "tint", DEFAULT_TINT)?,
            radius: param_f32(params, "radius", DEFAULT_RADIUS),
            count: param_u32(params, "count", DEFAULT_COUNT),
        })
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid_param("radius", "must be a positive number"));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Value {
        json!({
            "color": self.color.to_hex(),
            "bg": self.bg.to_hex(),
            "tint": self.tint.to_hex(),
            "radius": self.radius,
            "count": self.count,
        })
    }

    pub fn schema() -> Value {
        json!({
            "color": {
                "type": "color",
                "default": DEFAULT_COLOR.to_hex(),
                "description": "Ray color"
            },
            "bg": {
                "type": "color",
                "default": DEFAULT_BG.to_hex(),
                "description": "Background color between rays"
            },
            "tint": {
                "type": "color",
                "default": DEFAULT_TINT.to_hex(),
                "description": "Darkening tint; #555555 and above keeps full contrast"
            },
            "radius": {
                "type": "number",
                "default": DEFAULT_RADIUS,
                "min": 0.0,
                "description": "Relative star size"
            },
            "count": {
                "type": "integer",
                "default": DEFAULT_COUNT,
                "min": 0,
                "description": "Number of ray lobes"
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct Star {
    params: StarParams,
    color: Vec3,
    bg: Vec3,
    tint: Vec3,
}

impl Star {
    pub fn new(params: StarParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self {
            params,
            color: params.color.to_unit(),
            bg: params.bg.to_unit(),
            tint: params.tint.to_unit(),
        })
    }

    pub fn params(&self) -> &StarParams {
        &self.params
    }

    /// Folded ray intensity plus pulsing falloff, before color mapping.
    fn intensity(&self, coord: Vec2, ctx: &RenderContext) -> f32 {
        let res = ctx.resolution();
        let radius = self.params.radius;
        let t = ctx.time() * SPIN_RATE;

        let uv = (coord - res * 0.5) / res.y * ZOOM;
        let uv_n = normalize2(uv);
        let d = length2(uv) * (0.5 + (1.0 - radius));
        let len = -d * (0.4 * radius);

        let mut f = 0.0_f32;
        let mut phase = t;
        let mut dir = 1.0_f32;
        for i in 0..self.params.count {
            let i = i as f32;
            let p = (phase + ((i + t).sin() - 1.0) * 0.05 + len) * dir;
            let lobe = dot2(uv_n, normalize2(Vec2::new(p.cos(), p.sin())));
            f += lobe.max(0.0).powf(LOBE_SHARPNESS);
            f = ((f + 1.0) % 2.0 - 1.0).abs();
            dir = -dir;
            phase += i % 6.28;
        }

        let pulse = (t + uv_n.x * 11.0).sin() * (0.02 + (1.0 - radius) * 0.2);
        (f + 1.7 - d * (0.7 + pulse)).max(0.0)
    }
}

impl Shader for Star {
    fn evaluate(&self, coord: Vec2, ctx: &RenderContext, _dst: Vec3) -> Vec3 {
        let f = self.intensity(coord, ctx);
        let c = mix3(self.bg, self.color, f);
        clamp3(Vec3::ONE - self.tint * 3.0 * (Vec3::ONE - c), 0.0, 1.0)
    }
}
