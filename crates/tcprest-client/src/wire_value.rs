//! Rust-type <-> wire-type-FQN glue for [`crate::RpcClient::call`]: the
//! boxed-`Object` round trip a reflective client would do, typed here as
//! TCPREST's `(value, type_fqn)` pairs instead of opaque strings.

use tcprest_error::RpcError;
use tcprest_mapper::Value;

/// A Rust value that can be sent as one call argument.
///
/// Implemented for the handful of primitive types TCPREST's built-in
/// mappers cover; a caller needing a custom class supplies its own
/// `(Value, String)` pair directly.
pub trait ToArg {
    /// The wire type FQN this value encodes as, e.g. `"java.lang.String"`.
    fn type_fqn() -> &'static str;
    /// Convert into the dynamically-typed value the codec layer encodes.
    fn into_value(self) -> Value;
}

/// A Rust value that can be decoded from a call's return value.
pub trait FromValue: Sized {
    /// The wire type FQN expected for this return type.
    fn type_fqn() -> &'static str;
    /// Decode a returned value, failing with a protocol error if the shape
    /// doesn't match (e.g. the server mapper returned a string for an `int`
    /// return type).
    fn from_value(value: Value) -> Result<Self, RpcError>;
}

/// One encoded call argument: a value paired with the type FQN it claims to
/// be, the pair the request encoder and the overload resolver both need.
pub struct Arg(Value, String);

impl Arg {
    /// Build an argument from any [`ToArg`] value.
    pub fn new<T: ToArg>(value: T) -> Self {
        Arg(value.into_value(), T::type_fqn().to_string())
    }

    /// Build an argument from a raw value and an explicit type FQN, for
    /// calls against a class this crate has no built-in mapper for.
    pub fn raw(value: Value, type_fqn: impl Into<String>) -> Self {
        Arg(value, type_fqn.into())
    }

    pub(crate) fn into_pair(self) -> (Value, String) {
        (self.0, self.1)
    }
}

impl<T: ToArg> From<T> for Arg {
    fn from(value: T) -> Self {
        Arg::new(value)
    }
}

macro_rules! impl_wire_value {
    ($ty:ty, $fqn:literal, $variant:ident) => {
        impl ToArg for $ty {
            fn type_fqn() -> &'static str {
                $fqn
            }
            fn into_value(self) -> Value {
                Value::$variant(self.into())
            }
        }
    };
}

impl_wire_value!(String, "java.lang.String", Str);
impl_wire_value!(bool, "boolean", Bool);
impl_wire_value!(i64, "int", Int);
impl_wire_value!(i32, "int", Int);
impl_wire_value!(f64, "double", Float);

impl ToArg for &str {
    fn type_fqn() -> &'static str {
        "java.lang.String"
    }
    fn into_value(self) -> Value {
        Value::Str(self.to_string())
    }
}

fn type_mismatch(expected: &str, found: &Value) -> RpcError {
    RpcError::protocol(format!("expected a {expected} return value, found {found:?}"))
}

impl FromValue for String {
    fn type_fqn() -> &'static str {
        "java.lang.String"
    }
    fn from_value(value: Value) -> Result<Self, RpcError> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(type_mismatch("string", &other)),
        }
    }
}

impl FromValue for bool {
    fn type_fqn() -> &'static str {
        "boolean"
    }
    fn from_value(value: Value) -> Result<Self, RpcError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(type_mismatch("boolean", &other)),
        }
    }
}

impl FromValue for i64 {
    fn type_fqn() -> &'static str {
        "int"
    }
    fn from_value(value: Value) -> Result<Self, RpcError> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(type_mismatch("int", &other)),
        }
    }
}

impl FromValue for f64 {
    fn type_fqn() -> &'static str {
        "double"
    }
    fn from_value(value: Value) -> Result<Self, RpcError> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(type_mismatch("double", &other)),
        }
    }
}

impl FromValue for () {
    fn type_fqn() -> &'static str {
        "void"
    }
    fn from_value(_value: Value) -> Result<Self, RpcError> {
        Ok(())
    }
}

impl FromValue for Value {
    fn type_fqn() -> &'static str {
        "java.lang.Object"
    }
    fn from_value(value: Value) -> Result<Self, RpcError> {
        Ok(value)
    }
}

/// A return type that may legitimately come back `NULL`: a returned null is
/// distinguishable from the literal string `"NULL"`.
impl<T: FromValue> FromValue for Option<T> {
    fn type_fqn() -> &'static str {
        T::type_fqn()
    }
    fn from_value(value: Value) -> Result<Self, RpcError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}
