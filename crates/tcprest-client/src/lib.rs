//! A blocking TCPREST client: connect-per-call transport plus a factory for
//! hand-written typed dispatchers.
//!
//! [`RpcClient`] does the actual work -- encode, connect, send, read one
//! line, decode. [`ClientFactory`] just hands out `Arc`-sharing instances of
//! whatever typed wrapper a caller builds over it.

pub mod client;
pub mod factory;
pub mod wire_value;

pub use client::{RpcClient, DEFAULT_TIMEOUT};
pub use factory::ClientFactory;
pub use wire_value::{Arg, FromValue, ToArg};
