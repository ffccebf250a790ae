//! Domain-warped fbm wash blended over the existing frame.
//!
//! Two fbm evaluations `q` offset the sample point, two more (time-animated)
//! build `r` from `q`, and a fifth at `n + r` gives the coverage `a`. The
//! output blends from the tint toward the background by `a`, so bright noise
//! lets the background through and dark noise shows the tint.

use serde_json::{json, Value};
use tessel_core::blend::blend_unit;
use tessel_core::math::clamp;
use tessel_core::noise_field::fbm;
use tessel_core::params::{param_color, param_f32, param_u32};
use tessel_core::{EngineError, RenderContext, Rgb8, Shader, SimplexGradient, Vec2, Vec3};

use crate::invalid_param;

const DEFAULT_TINT: Rgb8 = Rgb8::WHITE;
const DEFAULT_OCTAVES: u32 = 5;
/// Noise periods across the frame height.
const DEFAULT_SCALE: f32 = 4.0;
const DEFAULT_SPEED: f32 = 1.0;
const DEFAULT_SEED: u32 = 0;
/// Beyond this, octave amplitudes fall below f32 resolution of the sum.
const MAX_OCTAVES: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FbmFillParams {
    pub tint: Rgb8,
    pub octaves: u32,
    pub scale: f32,
    /// Multiplier on elapsed time.
    pub speed: f32,
    pub seed: u32,
}

impl Default for FbmFillParams {
    fn default() -> Self {
        Self {
            tint: DEFAULT_TINT,
            octaves: DEFAULT_OCTAVES,
            scale: DEFAULT_SCALE,
            speed: DEFAULT_SPEED,
            seed: DEFAULT_SEED,
        }
    }
}

impl FbmFillParams {
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Ok(Self {
            tint: param_color(params, "tint", DEFAULT_TINT)?,
            octaves: param_u32(params, "octaves", DEFAULT_OCTAVES),
            scale: param_f32(params, "scale", DEFAULT_SCALE),
            speed: param_f32(params, "speed", DEFAULT_SPEED),
            seed: param_u32(params, "seed", DEFAULT_SEED),
        })
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.octaves > MAX_OCTAVES {
            return Err(invalid_param(
                "octaves",
                format!("must be at most {MAX_OCTAVES}"),
            ));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(invalid_param("scale", "must be a positive number"));
        }
        if !self.speed.is_finite() {
            return Err(invalid_param("speed", "must be finite"));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Value {
        json!({
            "tint": self.tint.to_hex(),
            "octaves": self.octaves,
            "scale": self.scale,
            "speed": self.speed,
            "seed": self.seed,
        })
    }

    pub fn schema() -> Value {
        json!({
            "tint": {
                "type": "color",
                "default": DEFAULT_TINT.to_hex(),
                "description": "Color shown where the noise is dark"
            },
            "octaves": {
                "type": "integer",
                "default": DEFAULT_OCTAVES,
                "min": 0,
                "max": MAX_OCTAVES,
                "description": "Number of fbm octaves"
            },
            "scale": {
                "type": "number",
                "default": DEFAULT_SCALE,
                "min": 0.0,
                "description": "Noise periods across the frame height"
            },
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "description": "Animation speed multiplier on elapsed time"
            },
            "seed": {
                "type": "integer",
                "default": DEFAULT_SEED,
                "description": "Simplex permutation seed"
            }
        })
    }
}

pub struct FbmFill {
    params: FbmFillParams,
    tint: Vec3,
    noise: SimplexGradient,
}

impl FbmFill {
    pub fn new(params: FbmFillParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self {
            params,
            tint: params.tint.to_unit(),
            noise: SimplexGradient::new(params.seed),
        })
    }

    pub fn params(&self) -> &FbmFillParams {
        &self.params
    }

    /// Warped fbm coverage at `coord`, clamped to `[0, 1]`.
    pub fn coverage(&self, coord: Vec2, ctx: &RenderContext) -> f32 {
        let res = ctx.resolution();
        let octaves = self.params.octaves;
        let scale = self.params.scale;
        let t = ctx.time() * self.params.speed;
        let g = &self.noise;

        let n = Vec2::new(
            coord.x / res.x * (res.x / res.y) * scale,
            coord.y / res.y * scale,
        );
        let q = Vec2::new(
            fbm(g, n + Vec2::splat(t), octaves),
            fbm(g, n + Vec2::new(2.0, 1.0), octaves),
        );
        let r = Vec2::new(
            fbm(g, n + q + Vec2::new(1.7, 9.2) + Vec2::splat(0.15 * t), octaves),
            fbm(
                g,
                n + q + Vec2::new(8.3, 2.8) + Vec2::new(0.126 * t, 0.3 * t),
                octaves,
            ),
        );
        clamp(fbm(g, n + r, octaves), 0.0, 1.0)
    }
}

impl std::fmt::Debug for FbmFill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FbmFill")
            .field("params", &self.params)
            .finish()
    }
}

impl Shader for FbmFill {
    fn evaluate(&self, coord: Vec2, ctx: &RenderContext, dst: Vec3) -> Vec3 {
        blend_unit(self.tint, dst, self.coverage(coord, ctx))
    }
}
