//! Static resource registry, overload-aware method resolution, and
//! invocation: the part of TCPREST that replaces reflective class/method
//! lookup with a table lookup and a typed closure.

pub mod context;
pub mod descriptor;
pub mod invoke;
pub mod registry;
pub mod resolver;

pub use context::Context;
pub use descriptor::{ClassDescriptor, MethodDescriptor};
pub use invoke::Invoker;
pub use registry::{ResourceBinding, ResourceRegistry};
pub use resolver::{resolve, ResolveError};
