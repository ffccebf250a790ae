//! Byte colors and conversions to shader-space vectors.
//!
//! [`Rgb8`] is an sRGB-encoded triple of 8-bit channels. It must be decoded
//! (see [`Rgb8::to_linear`]) before any linear-light arithmetic and
//! re-encoded before storage; [`crate::blend`] does both.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;
use crate::gamma;
use crate::math::{clamp, Vec3};

/// sRGB-encoded byte color.
///
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `EngineError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Rgb8, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| EngineError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| EngineError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| EngineError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Rgb8 { r, g, b })
    }

    /// Formats the color as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels divided by 255, still sRGB-encoded.
    pub fn to_unit(self) -> Vec3 {
        Vec3::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Quantizes encoded unit channels with `floor(clamp01(c) * 255)`.
    pub fn from_unit(c: Vec3) -> Self {
        Self {
            r: unit_to_byte(c.x),
            g: unit_to_byte(c.y),
            b: unit_to_byte(c.z),
        }
    }

    /// Decodes to linear light through the inverse gamma table.
    pub fn to_linear(self) -> Vec3 {
        let c = self.to_unit();
        Vec3::new(gamma::decode(c.x), gamma::decode(c.y), gamma::decode(c.z))
    }

    /// Encodes linear light through the forward gamma table and quantizes.
    pub fn from_linear(c: Vec3) -> Self {
        Self::from_unit(Vec3::new(
            gamma::encode(c.x),
            gamma::encode(c.y),
            gamma::encode(c.z),
        ))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// `floor(clamp01(c) * 255)` as a byte.
#[inline]
pub fn unit_to_byte(c: f32) -> u8 {
    (clamp(c, 0.0, 1.0) * 255.0).floor() as u8
}

impl Serialize for Rgb8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb8::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
