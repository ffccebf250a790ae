//! Helpers for extracting typed shader parameters from a `serde_json::Value` object.
//!
//! The numeric helpers take a JSON value, a key name, and a default. If the
//! key is missing or the value is not the expected type, the default is
//! returned; they never fail. Colors are the exception: a present but
//! malformed color is reported, since silently painting black hides typos.

use serde_json::Value;

use crate::color::Rgb8;
use crate::error::EngineError;

/// Extracts an `f32` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON floats and integers.
pub fn param_f32(params: &Value, name: &str, default: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(default)
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing, wrong
/// type, negative, or too large.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `"#rrggbb"` color from `params[name]`, returning `default` if the key is missing.
///
/// Returns `EngineError::ParamTypeMismatch` if the value is not a string and
/// `EngineError::InvalidColor` if it is not a valid hex color.
pub fn param_color(params: &Value, name: &str, default: Rgb8) -> Result<Rgb8, EngineError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(s)) => Rgb8::from_hex(s),
        Some(other) => Err(EngineError::ParamTypeMismatch {
            name: name.to_owned(),
            expected: "hex color string".into(),
            got: json_type_name(other).into(),
        }),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
