//! The shared value model all codecs parse into and serialize from.
//!
//! `Value` is a closed set of variants mirroring what JSON, XML, and YAML can
//! all express. Objects use `Vec<(String, Value)>` to keep keys in insertion
//! order without depending on `IndexMap`; every serializer walks entries in
//! that order, so output is deterministic and diff-stable.
//!
//! The manual `Serialize`/`Deserialize` impls let `serde_json` and
//! `serde_yaml` stream directly into `Value` while preserving key order, the
//! integer/float split, and last-write-wins semantics for duplicate keys.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A numeric value. Integers are kept apart from floats so literal integers
/// never pass through binary-float rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Build a `Number` from an `f64`, normalizing whole-valued floats into
    /// integers. The source formats of this crate share JSON's single number
    /// type, where `1.0` and `1` are the same value and print as `1`.
    pub fn from_f64(f: f64) -> Number {
        if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            Number::Int(f as i64)
        } else {
            Number::Float(f)
        }
    }

}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(x) if x.is_finite() => write!(f, "{x}"),
            // NaN/infinity have no portable textual form in any target format.
            Number::Float(_) => f.write_str("null"),
        }
    }
}

/// A parsed document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Ordered sequence; element order is significant and preserved.
    Array(Vec<Value>),
    /// Key-value pairs in first-production order. Keys are unique; when a
    /// source format permits duplicates, the last write wins.
    Object(Vec<(String, Value)>),
}

/// Insert into an ordered entry list, replacing the value in place when the
/// key already exists so key order stays first-production order.
pub(crate) fn insert_entry(entries: &mut Vec<(String, Value)>, key: String, value: Value) {
    match entries.iter_mut().find(|(existing, _)| *existing == key) {
        Some((_, slot)) => *slot = value,
        None => entries.push((key, value)),
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a null, boolean, number, string, sequence, or mapping")
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(Number::Int(v)))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E>
    where
        E: de::Error,
    {
        if let Ok(i) = i64::try_from(v) {
            Ok(Value::Number(Number::Int(i)))
        } else {
            Ok(Value::Number(Number::from_f64(v as f64)))
        }
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(Number::from_f64(v)))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(v))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(item) = access.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries: Vec<(String, Value)> =
            Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_key::<MapKey>()? {
            let value = access.next_value()?;
            insert_entry(&mut entries, key.0, value);
        }
        Ok(Value::Object(entries))
    }
}

/// Object key. YAML allows non-string keys (`1: x`, `true: y`); those are
/// stringified, matching how the JSON-centric value model flattens them.
struct MapKey(String);

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D>(deserializer: D) -> Result<MapKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(KeyVisitor)
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = MapKey;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar object key")
    }

    fn visit_str<E>(self, v: &str) -> Result<MapKey, E>
    where
        E: de::Error,
    {
        Ok(MapKey(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<MapKey, E>
    where
        E: de::Error,
    {
        Ok(MapKey(v))
    }

    fn visit_bool<E>(self, v: bool) -> Result<MapKey, E>
    where
        E: de::Error,
    {
        Ok(MapKey(v.to_string()))
    }

    fn visit_i64<E>(self, v: i64) -> Result<MapKey, E>
    where
        E: de::Error,
    {
        Ok(MapKey(v.to_string()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<MapKey, E>
    where
        E: de::Error,
    {
        Ok(MapKey(v.to_string()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<MapKey, E>
    where
        E: de::Error,
    {
        Ok(MapKey(v.to_string()))
    }

    fn visit_unit<E>(self) -> Result<MapKey, E>
    where
        E: de::Error,
    {
        Ok(MapKey("null".to_owned()))
    }
}
