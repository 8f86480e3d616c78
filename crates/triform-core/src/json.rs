//! JSON codec backed by serde_json.
//!
//! Parsing is strict per the JSON grammar: no trailing commas, no comments,
//! no unquoted keys. Key order is preserved by the `Value` deserializer, and
//! duplicate keys collapse to the last occurrence.

use crate::error::{ConvertError, Result};
use crate::value::Value;

/// Parse JSON text into a `Value`. Error messages carry serde_json's
/// line/column position.
pub fn parse(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|err| ConvertError::Parse(format!("invalid JSON: {err}")))
}

/// Render a `Value` as JSON. Pretty mode uses a 2-space indent and ends with
/// a single trailing newline; minified mode emits no insignificant whitespace
/// and no trailing newline.
pub fn serialize(value: &Value, minify: bool) -> Result<String> {
    let rendered = if minify {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value).map(|text| text + "\n")
    };
    rendered.map_err(|err| ConvertError::Serialize(format!("cannot render JSON: {err}")))
}
