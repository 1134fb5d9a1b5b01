//! Ties identifier validation, the class whitelist, the resource registry,
//! and the resolver together into a single call: given a class, method,
//! and decoded arguments, produce a result or a classified error.

use tcprest_error::RpcError;
use tcprest_mapper::Value;
use tcprest_security::{is_valid_class_name, is_valid_method_name, ClassWhitelist};

use crate::context::Context;
use crate::registry::ResourceRegistry;
use crate::resolver::resolve;

/// Resolves and invokes methods against a [`ResourceRegistry`], enforcing
/// identifier validity and an optional class whitelist before doing so.
pub struct Invoker<'a> {
    registry: &'a ResourceRegistry,
    whitelist: &'a ClassWhitelist,
}

impl<'a> Invoker<'a> {
    /// Build an invoker over `registry`, rejecting classes `whitelist`
    /// doesn't allow.
    pub fn new(registry: &'a ResourceRegistry, whitelist: &'a ClassWhitelist) -> Self {
        Self { registry, whitelist }
    }

    /// Resolve and invoke `class_fqn/method(param_type_fqns)` with `args`,
    /// returning the call's result alongside the declared return type FQN
    /// the caller should encode it as.
    ///
    /// Validates identifiers and the whitelist before the registry is even
    /// consulted: a request for an invalid or disallowed class never
    /// reaches class lookup.
    pub fn invoke(
        &self,
        class_fqn: &str,
        method: &str,
        param_type_fqns: &[String],
        args: &[Value],
    ) -> Result<(Value, String), RpcError> {
        if !is_valid_class_name(class_fqn) {
            tracing::warn!(class_fqn, "rejecting invocation: malformed class name");
            return Err(RpcError::protocol(format!(
                "invalid class name: {class_fqn:?}"
            )));
        }
        if !is_valid_method_name(method) {
            tracing::warn!(method, "rejecting invocation: malformed method name");
            return Err(RpcError::protocol(format!(
                "invalid method name: {method:?}"
            )));
        }
        if !self.whitelist.allows(class_fqn) {
            tracing::warn!(class_fqn, "rejecting invocation: not in class whitelist");
            return Err(RpcError::protocol(format!(
                "class {class_fqn:?} is not in the whitelist"
            )));
        }

        let (descriptor, instance) = self.registry.lookup(class_fqn).ok_or_else(|| {
            tracing::debug!(class_fqn, "rejecting invocation: class not registered");
            RpcError::protocol(format!("ClassNotFoundException: {class_fqn}"))
        })?;

        let method_descriptor = resolve(&descriptor.methods, method, param_type_fqns)
            .map_err(|e| {
                tracing::debug!(class_fqn, method, error = %e, "method resolution failed");
                RpcError::protocol(format!("NoSuchMethodException: {e}"))
            })?;

        let ctx = Context {
            class_fqn: class_fqn.to_string(),
            method: method.to_string(),
            args: args.to_vec(),
            instance,
        };

        tracing::debug!(class_fqn = %ctx.class_fqn, method = %ctx.method, "dispatching");
        let return_type_fqn = method_descriptor.return_type_fqn.clone();
        let value = method_descriptor.invoke(ctx.instance.as_ref(), &ctx.args)?;
        Ok((value, return_type_fqn))
    }
}
