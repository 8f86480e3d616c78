//! YAML codec: serde_yaml for parsing, a purpose-built emitter for output.
//!
//! Parsing accepts both block and flow notation with the narrow scalar rule
//! set (null/bool/int/float/string); quoted scalars always stay strings, and
//! no custom tags or merge-key semantics are honored.
//!
//! The emitter is hand-rolled because the two output modes are stricter than
//! what serde_yaml offers: pretty mode is always block style with a 2-space
//! indent and unbounded line width, minified mode is exclusively flow style
//! (`{a: 1, b: [1, 2]}`). Sharing one scalar-quoting path between the modes
//! keeps re-parsed values identical regardless of mode. Anchors and aliases
//! are never emitted; every occurrence is written as a full copy.

use crate::error::{ConvertError, Result};
use crate::value::Value;

const INDENT: &str = "  ";

/// Parse YAML text into a `Value`.
pub fn parse(text: &str) -> Result<Value> {
    serde_yaml::from_str(text).map_err(|err| ConvertError::Parse(format!("invalid YAML: {err}")))
}

/// Render a `Value` as YAML. Both modes end with a single trailing newline.
pub fn serialize(value: &Value, minify: bool) -> Result<String> {
    let mut out = String::new();
    if minify {
        write_flow(&mut out, value);
    } else {
        write_block_root(&mut out, value);
    }
    out.push('\n');
    Ok(out)
}

fn write_block_root(out: &mut String, value: &Value) {
    match value {
        Value::Object(entries) if entries.is_empty() => out.push_str("{}"),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(entries) => write_map_block(out, entries, 0),
        Value::Array(items) => write_seq_block(out, items, 0),
        scalar => write_scalar(out, scalar, Context::Block),
    }
}

/// Emit map entries at the given indent level, one per line, no trailing
/// newline (the caller joins lines).
fn write_map_block(out: &mut String, entries: &[(String, Value)], depth: usize) {
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&INDENT.repeat(depth));
        write_key(out, key, Context::Block);
        out.push(':');
        write_entry_value(out, value, depth);
    }
}

/// Emit the value following a `key:`. Non-empty containers continue on the
/// next line one level deeper; scalars and empty containers stay inline.
fn write_entry_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Object(entries) if entries.is_empty() => out.push_str(" {}"),
        Value::Array(items) if items.is_empty() => out.push_str(" []"),
        Value::Object(entries) => {
            out.push('\n');
            write_map_block(out, entries, depth + 1);
        }
        Value::Array(items) => {
            out.push('\n');
            write_seq_block(out, items, depth + 1);
        }
        scalar => {
            out.push(' ');
            write_scalar(out, scalar, Context::Block);
        }
    }
}

fn write_seq_block(out: &mut String, items: &[Value], depth: usize) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&INDENT.repeat(depth));
        out.push_str("- ");
        write_item_after_dash(out, item, depth);
    }
}

/// Emit a sequence item's value on the `- ` line. The first field of a map
/// (or first item of a nested sequence) shares the dash line; siblings align
/// under it, one indent level deeper than the dash.
fn write_item_after_dash(out: &mut String, item: &Value, depth: usize) {
    match item {
        Value::Object(entries) if entries.is_empty() => out.push_str("{}"),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(entries) => {
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                    out.push_str(&INDENT.repeat(depth + 1));
                }
                write_key(out, key, Context::Block);
                out.push(':');
                write_entry_value(out, value, depth + 1);
            }
        }
        Value::Array(items) => {
            for (i, inner) in items.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                    out.push_str(&INDENT.repeat(depth + 1));
                }
                out.push_str("- ");
                write_item_after_dash(out, inner, depth + 1);
            }
        }
        scalar => write_scalar(out, scalar, Context::Block),
    }
}

fn write_flow(out: &mut String, value: &Value) {
    match value {
        Value::Object(entries) => {
            out.push('{');
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_key(out, key, Context::Flow);
                out.push_str(": ");
                write_flow(out, value);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_flow(out, item);
            }
            out.push(']');
        }
        scalar => write_scalar(out, scalar, Context::Flow),
    }
}

/// Where a scalar is being emitted. Flow context has more active delimiters
/// (comma, brackets, braces) than block context.
#[derive(Clone, Copy, PartialEq)]
enum Context {
    Block,
    Flow,
}

fn write_scalar(out: &mut String, value: &Value, ctx: Context) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s, ctx),
        Value::Array(_) | Value::Object(_) => out.push_str("null"),
    }
}

fn write_key(out: &mut String, key: &str, ctx: Context) {
    write_string(out, key, ctx)
}

/// Emit a string, quoting only when unquoted emission would change its type
/// or break the grammar.
fn write_string(out: &mut String, s: &str, ctx: Context) {
    if !needs_quoting(s, ctx) {
        out.push_str(s);
        return;
    }
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

/// Decide whether a string must be quoted to survive re-parsing as a string.
///
/// Quoted when it:
/// - is empty or has leading/trailing whitespace
/// - would resolve to null, a boolean, or a number if left plain
/// - contains a character with YAML meaning (`:`, `#`, quotes, backslash,
///   escapes) or starts with an indicator character
/// - in flow context, contains an active flow delimiter
fn needs_quoting(s: &str, ctx: Context) -> bool {
    if s.is_empty() {
        return true;
    }
    if s != s.trim() {
        return true;
    }
    if s == "~"
        || s.eq_ignore_ascii_case("null")
        || s.eq_ignore_ascii_case("true")
        || s.eq_ignore_ascii_case("false")
        || s.eq_ignore_ascii_case("yes")
        || s.eq_ignore_ascii_case("no")
        || s.eq_ignore_ascii_case("on")
        || s.eq_ignore_ascii_case("off")
    {
        return true;
    }
    if looks_numeric(s) {
        return true;
    }
    if s.contains(':')
        || s.contains('#')
        || s.contains('"')
        || s.contains('\\')
        || s.contains('\n')
        || s.contains('\r')
        || s.contains('\t')
    {
        return true;
    }
    let first = s.chars().next().unwrap_or(' ');
    if "-?,[]{}&*!|>'\"%@`".contains(first) {
        return true;
    }
    match ctx {
        Context::Block => false,
        Context::Flow => s.contains(',') || s.contains('[') || s.contains(']')
            || s.contains('{') || s.contains('}'),
    }
}

/// True for anything a YAML parser could read back as a number, including
/// leading-zero forms and the base-prefixed integers of the 1.1 grammar.
fn looks_numeric(s: &str) -> bool {
    if s.parse::<f64>().is_ok() {
        return true;
    }
    if s.eq_ignore_ascii_case(".inf") || s.eq_ignore_ascii_case("-.inf") || s.eq_ignore_ascii_case(".nan")
    {
        return true;
    }
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    digits.starts_with("0x") || digits.starts_with("0o")
}
