//! The dynamically-typed value a [`crate::Mapper`] encodes to or decodes
//! from: a stand-in for the boxed `Object` a reflective implementation would
//! pass around.

use serde_json::Value as Json;

/// A value flowing through the dispatch layer, tagged loosely by shape
/// rather than by a fixed Rust type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The null value. Distinct from any other variant, including an empty
    /// string.
    Null,
    /// A boolean.
    Bool(bool),
    /// Any integral number; TCPREST does not distinguish `int` from `long`
    /// at this layer; it's the type FQN, not the Rust representation, that
    /// decides the wire type name.
    Int(i64),
    /// Any floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// Anything without a built-in mapper: decoded/encoded as JSON, the way
    /// a user-supplied mapper built on serialization would.
    Json(Json),
}

impl Value {
    /// True if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}
