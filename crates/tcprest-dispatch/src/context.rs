//! The per-request context handed to a resolved method: the class and
//! method being invoked, the decoded arguments, and the instance to invoke
//! against.
//!
//! A `Context` is created fresh for each request and discarded once the
//! response has been written.

use std::any::Any;
use std::sync::Arc;

use tcprest_mapper::Value;

/// Everything needed to perform one method invocation.
pub struct Context {
    /// Fully-qualified class name the request named.
    pub class_fqn: String,
    /// Bare method name the request named.
    pub method: String,
    /// Decoded argument values, in declaration order.
    pub args: Vec<Value>,
    /// The instance to invoke against: freshly constructed for a class-only
    /// binding, or the shared instance for a singleton.
    pub instance: Arc<dyn Any + Send + Sync>,
}
