//! The blocking TCPREST server: a single accept thread that reads one
//! line, runs it through parse, dispatch, and encode, writes the response,
//! and closes the connection.
//!
//! [`server::TcpServer`] owns the resource registry, mapper registry, and
//! security/compression configuration, and exposes a lifecycle API
//! (`up`/`down`/`addResource`/...).

pub mod connection;
pub mod lifecycle;
pub mod server;
pub mod transport;

pub use lifecycle::{ServerLifecycle, StartupError};
pub use server::{NotPassive, TcpServer};
pub use transport::ConnectionTransport;
