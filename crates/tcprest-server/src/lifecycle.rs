//! Server lifecycle state and the startup-failure to exit-code mapping a
//! CLI shell built on top of this crate uses.

use std::fmt;

/// The states a [`crate::server::TcpServer`] moves through.
///
/// The resource, mapper, and security registries are writable only while
/// `Passive`; once the server leaves that state they are read-only for the
/// lifetime of the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerLifecycle {
    /// Not listening.
    Passive,
    /// Listening and dispatching requests.
    Running,
    /// `down()` has been called; the accept loop has been told to stop but
    /// may not have exited yet.
    Closing,
}

impl fmt::Display for ServerLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServerLifecycle::Passive => "PASSIVE",
            ServerLifecycle::Running => "RUNNING",
            ServerLifecycle::Closing => "CLOSING",
        };
        f.write_str(s)
    }
}

/// Why a call to [`crate::server::TcpServer::up`] failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StartupError {
    /// The listening socket could not be bound.
    #[error("failed to bind listening socket: {0}")]
    BindFailed(String),
}

impl StartupError {
    /// Map to the CLI exit code a shell on top of this crate should use:
    /// 0 normal, 1 initialisation failure, 2 bind failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            StartupError::BindFailed(_) => 2,
        }
    }
}
