//! Rison encoder for shareable dashboard state.
//!
//! Rison is the compact, URL-friendly serialisation Kibana uses for the
//! `_g` / `_a` query parameters of Discover links. Only the encoder is
//! implemented; nothing in logscope ever reads Rison back.
//!
//! | value              | encoding                 |
//! |--------------------|--------------------------|
//! | null / true / false| `!n` / `!t` / `!f`       |
//! | number             | canonical decimal        |
//! | bare-safe string   | `log.level`              |
//! | other string       | `'k8s-deployment'`       |
//! | empty string       | `''`                     |
//! | list               | `!(a,b)` / `!()`         |
//! | map                | `(k:v,k2:v2)` / `()`     |
//!
//! Output is not percent-encoded; callers do that before putting it in a URL.

use indexmap::IndexMap;
use serde_json::Number;
use std::fmt::{self, Write};

/// Characters that force a string into quotes.
const RESERVED: &[char] = &['\'', ':', '!', ',', '(', ')', '@', '-', ' '];

/// A value tree destined for Rison encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RisonValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<RisonValue>),
    /// Keys are emitted in insertion order.
    Object(IndexMap<String, RisonValue>),
}

/// Encode a value tree. Pure and deterministic.
pub fn encode(value: &RisonValue) -> String {
    value.to_string()
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty() || s.contains(RESERVED)
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if !needs_quotes(s) {
        return f.write_str(s);
    }
    f.write_char('\'')?;
    for c in s.chars() {
        match c {
            '\'' | '!' => {
                f.write_char('!')?;
                f.write_char(c)?;
            }
            _ => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

impl fmt::Display for RisonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RisonValue::Null => f.write_str("!n"),
            RisonValue::Bool(true) => f.write_str("!t"),
            RisonValue::Bool(false) => f.write_str("!f"),
            // Rison exponents carry no sign when positive: `1e21`, not `1e+21`.
            RisonValue::Number(n) => f.write_str(&n.to_string().replace("e+", "e")),
            RisonValue::String(s) => write_string(f, s),
            RisonValue::Array(items) => {
                f.write_str("!(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(')')
            }
            RisonValue::Object(map) => {
                f.write_char('(')?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_char(')')
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<bool> for RisonValue {
    fn from(b: bool) -> Self {
        RisonValue::Bool(b)
    }
}

impl From<&str> for RisonValue {
    fn from(s: &str) -> Self {
        RisonValue::String(s.to_string())
    }
}

impl From<String> for RisonValue {
    fn from(s: String) -> Self {
        RisonValue::String(s)
    }
}

impl From<&String> for RisonValue {
    fn from(s: &String) -> Self {
        RisonValue::String(s.clone())
    }
}

impl From<i64> for RisonValue {
    fn from(n: i64) -> Self {
        RisonValue::Number(n.into())
    }
}

impl From<u64> for RisonValue {
    fn from(n: u64) -> Self {
        RisonValue::Number(n.into())
    }
}

impl From<i32> for RisonValue {
    fn from(n: i32) -> Self {
        RisonValue::Number(n.into())
    }
}

/// Non-finite floats have no Rison form and become `!n`.
impl From<f64> for RisonValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(RisonValue::Null, RisonValue::Number)
    }
}

impl<T: Into<RisonValue>> From<Vec<T>> for RisonValue {
    fn from(items: Vec<T>) -> Self {
        RisonValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RisonValue>> From<Option<T>> for RisonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RisonValue::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<RisonValue>> FromIterator<(K, V)> for RisonValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RisonValue::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Object keys keep the iteration order of the source map.
impl From<serde_json::Value> for RisonValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => RisonValue::Null,
            Value::Bool(b) => RisonValue::Bool(b),
            Value::Number(n) => RisonValue::Number(n),
            Value::String(s) => RisonValue::String(s),
            Value::Array(items) => items.into(),
            Value::Object(map) => map.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
