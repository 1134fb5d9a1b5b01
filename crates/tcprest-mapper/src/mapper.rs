//! The [`Mapper`] trait and the built-in mappers for primitives, strings,
//! and null.

use thiserror::Error;

use crate::value::Value;
use tcprest_proto::NULL_SENTINEL;

/// A mapper failed to encode or decode a value.
#[derive(Debug, Clone, Error)]
pub enum MapperError {
    /// The value's shape didn't match what this mapper expects.
    #[error("value {0:?} is not a valid {1}")]
    WrongShape(Value, &'static str),
    /// The string couldn't be parsed as this mapper's type.
    #[error("{0:?} does not parse as {1}: {2}")]
    ParseFailed(String, &'static str, String),
    /// No mapper is registered for this type name.
    #[error("no mapper registered for type {0:?}")]
    NotFound(String),
}

/// A bidirectional codec between a [`Value`] and its wire string
/// representation, for one Java-level type.
pub trait Mapper: Send + Sync {
    /// Render `value` as the inner token string.
    fn encode(&self, value: &Value) -> Result<String, MapperError>;

    /// Parse the inner token string back into a [`Value`].
    fn decode(&self, raw: &str) -> Result<Value, MapperError>;
}

/// Always encodes to, and only decodes, the null sentinel.
pub struct NullMapper;

impl Mapper for NullMapper {
    fn encode(&self, value: &Value) -> Result<String, MapperError> {
        match value {
            Value::Null => Ok(NULL_SENTINEL.to_string()),
            other => Err(MapperError::WrongShape(other.clone(), "null")),
        }
    }

    fn decode(&self, raw: &str) -> Result<Value, MapperError> {
        if raw == NULL_SENTINEL {
            Ok(Value::Null)
        } else {
            Err(MapperError::ParseFailed(
                raw.to_string(),
                "null",
                "expected the null sentinel".to_string(),
            ))
        }
    }
}

/// `java.lang.String`: the identity mapper.
pub struct StringMapper;

impl Mapper for StringMapper {
    fn encode(&self, value: &Value) -> Result<String, MapperError> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            other => Err(MapperError::WrongShape(other.clone(), "String")),
        }
    }

    fn decode(&self, raw: &str) -> Result<Value, MapperError> {
        Ok(Value::Str(raw.to_string()))
    }
}

/// `java.lang.Integer` / `int`.
pub struct IntMapper;

impl Mapper for IntMapper {
    fn encode(&self, value: &Value) -> Result<String, MapperError> {
        match value {
            Value::Int(i) => Ok(i.to_string()),
            other => Err(MapperError::WrongShape(other.clone(), "int")),
        }
    }

    fn decode(&self, raw: &str) -> Result<Value, MapperError> {
        raw.parse::<i64>()
            .map(Value::Int)
            .map_err(|e| MapperError::ParseFailed(raw.to_string(), "int", e.to_string()))
    }
}

/// `java.lang.Boolean` / `boolean`.
pub struct BooleanMapper;

impl Mapper for BooleanMapper {
    fn encode(&self, value: &Value) -> Result<String, MapperError> {
        match value {
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(MapperError::WrongShape(other.clone(), "boolean")),
        }
    }

    fn decode(&self, raw: &str) -> Result<Value, MapperError> {
        raw.parse::<bool>()
            .map(Value::Bool)
            .map_err(|e| MapperError::ParseFailed(raw.to_string(), "boolean", e.to_string()))
    }
}

/// `java.lang.Double` / `double`.
pub struct DoubleMapper;

impl Mapper for DoubleMapper {
    fn encode(&self, value: &Value) -> Result<String, MapperError> {
        match value {
            Value::Float(f) => Ok(f.to_string()),
            other => Err(MapperError::WrongShape(other.clone(), "double")),
        }
    }

    fn decode(&self, raw: &str) -> Result<Value, MapperError> {
        raw.parse::<f64>()
            .map(Value::Float)
            .map_err(|e| MapperError::ParseFailed(raw.to_string(), "double", e.to_string()))
    }
}

/// A generic mapper backed by JSON serialization, for callers who want to
/// register a custom type without writing a dedicated [`Mapper`]
/// implementation. Not used automatically: a type FQN with no registered
/// mapper is a [`MapperError::NotFound`], not a silent JSON encoding.
pub struct JsonMapper;

impl Mapper for JsonMapper {
    fn encode(&self, value: &Value) -> Result<String, MapperError> {
        let json = match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Json(j) => j.clone(),
        };
        serde_json::to_string(&json)
            .map_err(|e| MapperError::ParseFailed(format!("{:?}", value), "json", e.to_string()))
    }

    fn decode(&self, raw: &str) -> Result<Value, MapperError> {
        serde_json::from_str(raw)
            .map(Value::Json)
            .map_err(|e| MapperError::ParseFailed(raw.to_string(), "json", e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn null_mapper_round_trips_only_the_sentinel() {
        let m = NullMapper;
        assert_eq!(m.encode(&Value::Null).unwrap(), NULL_SENTINEL);
        assert_eq!(m.decode(NULL_SENTINEL).unwrap(), Value::Null);
        assert!(m.decode("NULL").is_err());
        assert!(m.encode(&Value::Str("x".into())).is_err());
    }

    #[test]
    fn string_mapper_is_identity() {
        let m = StringMapper;
        for s in ["", "NULL", "TCPREST.NULL", "x,2,false"] {
            assert_eq!(m.decode(s).unwrap(), Value::Str(s.to_string()));
            assert_eq!(m.encode(&Value::Str(s.to_string())).unwrap(), s);
        }
    }

    #[test]
    fn int_mapper_round_trips() {
        let m = IntMapper;
        assert_eq!(m.encode(&Value::Int(42)).unwrap(), "42");
        assert_eq!(m.decode("42").unwrap(), Value::Int(42));
        assert!(m.decode("not a number").is_err());
    }

    #[test]
    fn boolean_mapper_round_trips() {
        let m = BooleanMapper;
        assert_eq!(m.encode(&Value::Bool(false)).unwrap(), "false");
        assert_eq!(m.decode("true").unwrap(), Value::Bool(true));
    }

    #[test]
    fn json_mapper_handles_arbitrary_shapes() {
        let m = JsonMapper;
        let encoded = m.encode(&Value::Str("hi".into())).unwrap();
        assert_eq!(encoded, "\"hi\"");
        assert_eq!(m.decode(&encoded).unwrap(), Value::Json("hi".into()));
    }
}
