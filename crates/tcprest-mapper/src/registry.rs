//! Type-name → mapper lookup.

use std::collections::HashMap;

use crate::mapper::{BooleanMapper, DoubleMapper, IntMapper, Mapper, MapperError, NullMapper, StringMapper};
use crate::value::Value;
use tcprest_proto::NULL_SENTINEL;

/// A registry of [`Mapper`]s keyed by fully-qualified type name.
///
/// A lookup miss is a hard failure: encoding or decoding a value under a
/// type FQN nothing is registered for returns [`MapperError::NotFound`]
/// rather than guessing at a representation.
pub struct MapperRegistry {
    mappers: HashMap<String, Box<dyn Mapper>>,
}

impl MapperRegistry {
    /// An empty registry with no fallback behavior beyond [`JsonMapper`].
    pub fn empty() -> Self {
        Self {
            mappers: HashMap::new(),
        }
    }

    /// A registry pre-populated with the built-in primitive, string, and
    /// null mappers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("java.lang.String", Box::new(StringMapper));
        registry.register("java.lang.Integer", Box::new(IntMapper));
        registry.register("int", Box::new(IntMapper));
        registry.register("java.lang.Boolean", Box::new(BooleanMapper));
        registry.register("boolean", Box::new(BooleanMapper));
        registry.register("java.lang.Double", Box::new(DoubleMapper));
        registry.register("double", Box::new(DoubleMapper));
        registry.register("null", Box::new(NullMapper));
        registry
    }

    /// Register a mapper for `type_fqn`, replacing any existing mapper.
    pub fn register(&mut self, type_fqn: impl Into<String>, mapper: Box<dyn Mapper>) {
        self.mappers.insert(type_fqn.into(), mapper);
    }

    /// Look up the mapper for `type_fqn`, if one is registered.
    pub fn get(&self, type_fqn: &str) -> Option<&dyn Mapper> {
        self.mappers.get(type_fqn).map(|b| b.as_ref())
    }

    /// Encode `value` as the given `type_fqn`.
    ///
    /// Null values always encode to the null sentinel regardless of the
    /// declared type, since the sentinel's job is exactly to stand in for
    /// "no value of this type." Fails with [`MapperError::NotFound`] when no
    /// mapper covers a non-null `type_fqn`.
    pub fn encode(&self, type_fqn: &str, value: &Value) -> Result<String, MapperError> {
        if value.is_null() {
            return Ok(NULL_SENTINEL.to_string());
        }
        match self.get(type_fqn) {
            Some(mapper) => mapper.encode(value),
            None => Err(MapperError::NotFound(type_fqn.to_string())),
        }
    }

    /// Decode a raw token string declared as `type_fqn`.
    ///
    /// The null sentinel always decodes to [`Value::Null`] regardless of the
    /// declared type. Fails with [`MapperError::NotFound`] when no mapper
    /// covers a non-sentinel `type_fqn`.
    pub fn decode(&self, type_fqn: &str, raw: &str) -> Result<Value, MapperError> {
        if raw == NULL_SENTINEL {
            return Ok(Value::Null);
        }
        match self.get(type_fqn) {
            Some(mapper) => mapper.decode(raw),
            None => Err(MapperError::NotFound(type_fqn.to_string())),
        }
    }
}

impl Default for MapperRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtins_round_trip() {
        let reg = MapperRegistry::with_builtins();
        assert_eq!(reg.encode("int", &Value::Int(7)).unwrap(), "7");
        assert_eq!(reg.decode("int", "7").unwrap(), Value::Int(7));
        assert_eq!(
            reg.encode("java.lang.String", &Value::Str("x,2,false".into()))
                .unwrap(),
            "x,2,false"
        );
    }

    #[test]
    fn null_round_trips_regardless_of_declared_type() {
        let reg = MapperRegistry::with_builtins();
        let encoded = reg.encode("java.lang.String", &Value::Null).unwrap();
        assert_eq!(encoded, NULL_SENTINEL);
        assert_eq!(reg.decode("java.lang.String", &encoded).unwrap(), Value::Null);
    }

    #[test]
    fn unregistered_type_fails_with_not_found() {
        let reg = MapperRegistry::with_builtins();
        let err = reg
            .encode("com.example.Point", &Value::Int(1))
            .unwrap_err();
        assert!(matches!(err, MapperError::NotFound(ref t) if t == "com.example.Point"));

        let err = reg.decode("com.example.Point", "1").unwrap_err();
        assert!(matches!(err, MapperError::NotFound(ref t) if t == "com.example.Point"));
    }

    #[test]
    fn explicitly_registered_json_mapper_handles_custom_types() {
        use crate::mapper::JsonMapper;

        let mut reg = MapperRegistry::with_builtins();
        reg.register("com.example.Point", Box::new(JsonMapper));
        let json_val = Value::Json(serde_json::json!({"x": 1, "y": 2}));
        let encoded = reg.encode("com.example.Point", &json_val).unwrap();
        assert_eq!(reg.decode("com.example.Point", &encoded).unwrap(), json_val);
    }
}
