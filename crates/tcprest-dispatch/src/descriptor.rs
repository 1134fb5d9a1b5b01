//! Static descriptors that stand in for reflective class/method lookup.
//!
//! At registration time, each resource class builds an ordered list of
//! `{name, paramTypeNames, invoker}` triples instead of being discovered by
//! reflection at call time.

use std::any::Any;
use std::sync::Arc;

use tcprest_error::RpcError;
use tcprest_mapper::Value;

/// One callable method on a resource class.
pub struct MethodDescriptor {
    /// Bare method name, as it appears in frame metadata.
    pub name: String,
    /// Declared parameter type FQNs, in order.
    pub param_type_fqns: Vec<String>,
    /// Declared return type FQN, used to select the mapper that encodes the
    /// response body (`"void"` for a method that always returns null).
    pub return_type_fqn: String,
    /// The method body, erased over the concrete resource type.
    ///
    /// Takes the resource instance (as `&dyn Any`) and the decoded argument
    /// values, and returns either the method's result or a business
    /// exception raised by user code.
    invoke: Box<dyn Fn(&(dyn Any + Send + Sync), &[Value]) -> Result<Value, RpcError> + Send + Sync>,
}

impl MethodDescriptor {
    /// Build a descriptor for a method with the given name, parameter type
    /// FQNs, and return type FQN.
    pub fn new<F>(
        name: impl Into<String>,
        param_type_fqns: Vec<String>,
        return_type_fqn: impl Into<String>,
        invoke: F,
    ) -> Self
    where
        F: Fn(&(dyn Any + Send + Sync), &[Value]) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            param_type_fqns,
            return_type_fqn: return_type_fqn.into(),
            invoke: Box::new(invoke),
        }
    }

    /// Invoke this method on `instance` with `args`.
    pub fn invoke(&self, instance: &(dyn Any + Send + Sync), args: &[Value]) -> Result<Value, RpcError> {
        (self.invoke)(instance, args)
    }
}

/// A registered resource class: its fully-qualified name, its methods, and a
/// no-argument constructor used for class-only (non-singleton) bindings.
pub struct ClassDescriptor {
    /// Fully-qualified class name.
    pub class_fqn: String,
    /// Every method this class exposes.
    pub methods: Vec<MethodDescriptor>,
    /// Builds a fresh instance, the equivalent of calling a no-argument
    /// constructor via reflection.
    construct: Box<dyn Fn() -> Arc<dyn Any + Send + Sync> + Send + Sync>,
}

impl ClassDescriptor {
    /// Build a class descriptor.
    pub fn new<F>(class_fqn: impl Into<String>, methods: Vec<MethodDescriptor>, construct: F) -> Self
    where
        F: Fn() -> Arc<dyn Any + Send + Sync> + Send + Sync + 'static,
    {
        Self {
            class_fqn: class_fqn.into(),
            methods,
            construct: Box::new(construct),
        }
    }

    /// Construct a fresh instance of this class.
    pub fn construct(&self) -> Arc<dyn Any + Send + Sync> {
        (self.construct)()
    }
}
