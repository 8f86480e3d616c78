//! Format detection and the public conversion entry point.

use std::fmt;
use std::str::FromStr;

use crate::error::{ConvertError, Result};
use crate::value::Value;
use crate::{json, xml, yaml};

/// The three supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
    Yaml,
}

impl Format {
    /// Classify source text by its first non-whitespace character: `{` or `[`
    /// is JSON, `<` is XML, anything else is YAML.
    ///
    /// This is a fixed single-character heuristic. If the selected codec then
    /// fails to parse, that failure surfaces unchanged; there is no fallback
    /// to another codec. Deeper sniffing would change behavior on inputs the
    /// heuristic deliberately treats as ambiguous.
    pub fn detect(content: &str) -> Format {
        match content.trim_start().chars().next() {
            Some('{') | Some('[') => Format::Json,
            Some('<') => Format::Xml,
            _ => Format::Yaml,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Yaml => "yaml",
        })
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Format, String> {
        match s {
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(format!(
                "unknown format '{other}' (expected json, xml, or yaml)"
            )),
        }
    }
}

/// Output options shared by all serializers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Emit minified output instead of pretty-printed.
    pub minify: bool,
}

/// Convert a document to the target format.
///
/// The source format is always inferred from the content, never passed
/// explicitly. The text is parsed into a [`Value`] by the detected codec and
/// re-serialized by the target codec. Pure and deterministic: no I/O, no
/// shared state, byte-identical output for identical inputs and options.
///
/// Fails with [`ConvertError::Parse`] when the content is empty or does not
/// conform to the detected format's grammar, and [`ConvertError::Serialize`]
/// when the parsed value cannot be represented in the target format.
pub fn convert(content: &str, to: Format, options: &ConvertOptions) -> Result<String> {
    let source = content.trim();
    if source.is_empty() {
        return Err(ConvertError::Parse("input is empty".to_string()));
    }
    let value = parse_detected(source)?;
    match to {
        Format::Json => json::serialize(&value, options.minify),
        Format::Xml => xml::serialize(&value, options.minify),
        Format::Yaml => yaml::serialize(&value, options.minify),
    }
}

fn parse_detected(source: &str) -> Result<Value> {
    match Format::detect(source) {
        Format::Json => json::parse(source),
        Format::Xml => xml::parse(source),
        Format::Yaml => yaml::parse(source),
    }
}
