//! The decoded form of one request frame, ready to hand to
//! [`tcprest_dispatch::Invoker`].

use tcprest_mapper::Value;
use tcprest_proto::Version;

/// A fully decoded, verified request.
#[derive(Debug, Clone)]
pub struct ParsedRequest {
    /// `Some` for a pipe-framed (v2) request, `None` for a legacy bracketed
    /// one.
    pub version: Option<Version>,
    /// Target class FQN.
    pub class_fqn: String,
    /// Target method name.
    pub method: String,
    /// Declared parameter type FQNs, in order.
    pub param_type_fqns: Vec<String>,
    /// Decoded argument values, in order.
    pub args: Vec<Value>,
}
