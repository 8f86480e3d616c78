//! XML codec built on quick-xml's event reader.
//!
//! XML has no native array type and no attribute concept in the value model,
//! so the codec uses a structural mapping:
//!
//! - an attribute becomes an object entry under an [`ATTR_PREFIX`]ed key
//! - element text next to attributes or children lands under [`TEXT_KEY`]
//! - repeated sibling tags promote that key to an array in appearance order
//! - a text-only element collapses to a scalar, an empty one to `Null`
//!
//! A tag that happens to occur once is indistinguishable from one meant to be
//! singular, so `<b>1</b>` parses as a scalar even when it came from a
//! one-element array. That asymmetry is inherent to the format and is left
//! as-is rather than patched with heuristics.
//!
//! Comments, the XML declaration, doctype, and processing instructions are
//! consumed and dropped; namespaces get no special treatment.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ConvertError, Result};
use crate::value::{insert_entry, Number, Value};

/// Object key prefix marking an XML attribute of the enclosing element.
pub const ATTR_PREFIX: &str = "@_";

/// Reserved object key holding element text when the element also carries
/// attributes or child elements.
pub const TEXT_KEY: &str = "#text";

const INDENT: &str = "  ";

/// Intermediate element tree collected from the event stream before lowering
/// into a `Value`.
struct XmlElement {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

/// Parse an XML document into a `Value`. The document must contain exactly
/// one root element; the result is an object with a single entry keyed by the
/// root tag name.
pub fn parse(text: &str) -> Result<Value> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(tag)) => {
                stack.push(element_from_tag(&tag)?);
            }
            Ok(Event::Empty(tag)) => {
                let node = element_from_tag(&tag)?;
                attach(node, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ConvertError::Parse("unexpected closing tag".to_string()))?;
                attach(node, &mut stack, &mut root)?;
            }
            Ok(Event::Text(text)) => {
                let unescaped = text
                    .unescape()
                    .map_err(|err| ConvertError::Parse(format!("invalid XML text: {err}")))?;
                push_text(unescaped.as_ref(), &mut stack)?;
            }
            Ok(Event::CData(data)) => {
                let raw = String::from_utf8_lossy(data.as_ref()).into_owned();
                push_text(&raw, &mut stack)?;
            }
            Ok(Event::Decl(_)) | Ok(Event::Comment(_)) | Ok(Event::PI(_))
            | Ok(Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(err) => return Err(ConvertError::Parse(format!("invalid XML: {err}"))),
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ConvertError::Parse(format!(
            "unclosed element <{}>",
            open.name
        )));
    }
    let root = root.ok_or_else(|| ConvertError::Parse("no root element".to_string()))?;
    let name = root.name.clone();
    Ok(Value::Object(vec![(name, element_to_value(root))]))
}

fn element_from_tag(tag: &BytesStart) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in tag.attributes() {
        let attr = attr.map_err(|err| {
            ConvertError::Parse(format!("invalid attribute in <{name}>: {err}"))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| ConvertError::Parse(format!("invalid attribute in <{name}>: {err}")))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(XmlElement {
        name,
        attrs,
        text: String::new(),
        children: Vec::new(),
    })
}

/// Attach a completed element to its parent, or install it as the document
/// root when the stack is empty.
fn attach(
    node: XmlElement,
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_some() {
        return Err(ConvertError::Parse("multiple root elements".to_string()));
    } else {
        *root = Some(node);
    }
    Ok(())
}

fn push_text(text: &str, stack: &mut Vec<XmlElement>) -> Result<()> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None => Err(ConvertError::Parse(
            "text content outside of root element".to_string(),
        )),
    }
}

/// Lower an element into a `Value`: text-only elements collapse to a scalar,
/// empty elements to `Null`, everything else to an object with attributes
/// first, children in document order, and trailing text under `#text`.
fn element_to_value(el: XmlElement) -> Value {
    let XmlElement {
        attrs,
        text,
        children,
        ..
    } = el;

    if attrs.is_empty() && children.is_empty() {
        if text.is_empty() {
            return Value::Null;
        }
        return scalar_from_text(&text);
    }

    let mut entries: Vec<(String, Value)> = Vec::new();
    for (key, value) in attrs {
        insert_entry(&mut entries, format!("{ATTR_PREFIX}{key}"), Value::String(value));
    }
    for child in children {
        let name = child.name.clone();
        let value = element_to_value(child);
        match entries.iter_mut().find(|(key, _)| *key == name) {
            None => entries.push((name, value)),
            Some((_, Value::Array(items))) => items.push(value),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, Value::Null);
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
    if !text.is_empty() {
        insert_entry(&mut entries, TEXT_KEY.to_string(), scalar_from_text(&text));
    }
    Value::Object(entries)
}

/// Infer a scalar from element text: booleans and numbers resolve to their
/// typed values, everything else stays a string. Attribute values skip this
/// and always stay strings.
fn scalar_from_text(text: &str) -> Value {
    if text == "true" {
        return Value::Bool(true);
    }
    if text == "false" {
        return Value::Bool(false);
    }
    if let Ok(i) = text.parse::<i64>() {
        return Value::Number(Number::Int(i));
    }
    if let Ok(f) = text.parse::<f64>() {
        if f.is_finite() {
            return Value::Number(Number::from_f64(f));
        }
    }
    Value::String(text.to_string())
}

/// Render a `Value` as XML. The top level must be an object; each of its
/// keys becomes a root-level element. A top-level array or bare scalar has no
/// XML representation and fails rather than inventing a wrapper element.
pub fn serialize(value: &Value, minify: bool) -> Result<String> {
    let entries = match value {
        Value::Object(entries) if !entries.is_empty() => entries,
        Value::Object(_) => {
            return Err(ConvertError::Serialize(
                "XML requires a root element; the document is an empty object".to_string(),
            ))
        }
        Value::Array(_) => {
            return Err(ConvertError::Serialize(
                "XML requires a single root element; a top-level array cannot be represented"
                    .to_string(),
            ))
        }
        _ => {
            return Err(ConvertError::Serialize(
                "XML requires a single root element; a bare scalar cannot be represented"
                    .to_string(),
            ))
        }
    };

    let mut out = String::new();
    for (name, value) in entries {
        write_entry(&mut out, name, value, 0, minify);
    }
    Ok(out)
}

/// Write one object entry. Arrays fan out into one sibling element per item,
/// all sharing the entry's tag name, in array order.
fn write_entry(out: &mut String, name: &str, value: &Value, depth: usize, minify: bool) {
    match value {
        Value::Array(items) if items.is_empty() => {
            write_element(out, name, &Value::Null, depth, minify)
        }
        Value::Array(items) => {
            for item in items {
                write_entry(out, name, item, depth, minify);
            }
        }
        other => write_element(out, name, other, depth, minify),
    }
}

fn write_element(out: &mut String, name: &str, value: &Value, depth: usize, minify: bool) {
    let indent = if minify {
        String::new()
    } else {
        INDENT.repeat(depth)
    };

    match value {
        Value::Null => {
            out.push_str(&format!("{indent}<{name}/>"));
        }
        Value::Object(entries) => {
            let mut attrs = String::new();
            let mut text: Option<String> = None;
            let mut children: Vec<(&String, &Value)> = Vec::new();
            for (key, val) in entries {
                if let Some(attr_name) = key.strip_prefix(ATTR_PREFIX) {
                    attrs.push_str(&format!(" {attr_name}=\"{}\"", escape_attr(&scalar_text(val))));
                } else if key == TEXT_KEY {
                    text = Some(escape_text(&scalar_text(val)));
                } else {
                    children.push((key, val));
                }
            }

            if children.is_empty() {
                match text {
                    Some(text) => out.push_str(&format!("{indent}<{name}{attrs}>{text}</{name}>")),
                    None => out.push_str(&format!("{indent}<{name}{attrs}/>")),
                }
            } else {
                out.push_str(&format!("{indent}<{name}{attrs}>"));
                if let Some(text) = text {
                    out.push_str(&text);
                }
                if !minify {
                    out.push('\n');
                }
                for (key, val) in children {
                    write_entry(out, key, val, depth + 1, minify);
                }
                out.push_str(&format!("{indent}</{name}>"));
            }
        }
        scalar => {
            out.push_str(&format!(
                "{indent}<{name}>{}</{name}>",
                escape_text(&scalar_text(scalar))
            ));
        }
    }

    if !minify {
        out.push('\n');
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(input: &str) -> String {
    escape_text(input).replace('"', "&quot;")
}
