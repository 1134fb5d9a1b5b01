//! The contract a server's accept/dispatch loop satisfies, independent of
//! how it's implemented. An event-driven transport could implement the same
//! contract with a worker pool replacing the single accept thread; a UDP
//! variant could degrade to a single-datagram request/response without an
//! accept step at all.
//!
//! Only the blocking [`crate::server::TcpServer`] ships in this workspace;
//! the trait exists so that contract is checked by the type system instead
//! of left implicit in prose.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::lifecycle::StartupError;

/// Something that can start accepting connections and shut down cleanly.
pub trait ConnectionTransport {
    /// Bind and start serving at `addr`. Idempotent: calling `up` again
    /// while already running is a no-op.
    fn up(self: &Arc<Self>, addr: SocketAddr) -> Result<(), StartupError>;

    /// Begin shutdown. Idempotent: calling `down` again after the server
    /// has already stopped is a no-op.
    fn down(&self);
}
