//! Shared error classification for the TCPREST workspace.
//!
//! Every fallible operation in TCPREST eventually needs to be reported to a
//! remote peer as one of four outcomes: a business exception the target
//! method itself raised, a server-side failure (construction, access,
//! unanticipated panic-equivalent), a protocol violation (malformed frame,
//! bad checksum, unknown method), or a transport failure that never reaches
//! the wire at all. [`ErrorKind`] names those four buckets; [`HasKind`] lets
//! any error type in the workspace report which bucket it belongs in without
//! every crate inventing its own status mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a TCPREST failure.
///
/// This mirrors the three wire status codes (`1`, `2`, `3`) plus a fourth
/// kind, [`ErrorKind::Transport`], for failures that are resolved entirely on
/// one side of the connection and never get encoded onto the wire (a refused
/// connection, a socket read timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The target method itself raised a declared business exception.
    ///
    /// Surfaced as-is to the caller; not a framework bug.
    Business,
    /// Construction, reflection-equivalent access, or an unanticipated
    /// runtime failure on the server side of a call.
    Server,
    /// The frame itself was malformed, failed integrity checks, named an
    /// unknown class/method, or was rejected by the class whitelist.
    Protocol,
    /// A connect/read/write/timeout failure at the transport layer.
    ///
    /// Never reaches the wire: this kind only ever appears on the side of
    /// the connection where the I/O failure occurred.
    Transport,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Business => "business",
            ErrorKind::Server => "server",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Transport => "transport",
        };
        f.write_str(s)
    }
}

/// Something that can report which [`ErrorKind`] bucket it belongs to.
///
/// Implement this on every error enum in the workspace, the way
/// `tor_error::HasKind` is implemented throughout Arti: it lets callers
/// (notably the dispatch core and the response encoder) map an arbitrary
/// error into a wire status without matching on every concrete variant.
pub trait HasKind {
    /// Return the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A wire status code, as carried on a v2 response frame.
///
/// `Status::SUCCESS` has no corresponding [`ErrorKind`]: it is what a
/// response carries when there was no error at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(pub u8);

impl Status {
    /// The call completed normally.
    pub const SUCCESS: Status = Status(0);
    /// The call failed with a business exception.
    pub const BUSINESS: Status = Status(1);
    /// The call failed on the server side.
    pub const SERVER: Status = Status(2);
    /// The frame itself could not be processed.
    pub const PROTOCOL: Status = Status(3);

    /// Parse a status code out of its decimal wire representation.
    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "0" => Some(Status::SUCCESS),
            "1" => Some(Status::BUSINESS),
            "2" => Some(Status::SERVER),
            "3" => Some(Status::PROTOCOL),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ErrorKind> for Status {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Business => Status::BUSINESS,
            ErrorKind::Server => Status::SERVER,
            ErrorKind::Protocol => Status::PROTOCOL,
            // A transport error never reaches the wire; callers that try to
            // encode one anyway get treated as a protocol failure, since
            // from the peer's perspective nothing sensible could be framed.
            ErrorKind::Transport => Status::PROTOCOL,
        }
    }
}

/// A type-erased error as it is carried on the wire or handed back to a
/// calling application: a type name, a human-readable message, and the
/// [`ErrorKind`] bucket it belongs to.
///
/// This is the `ExceptionTypeFQN:message` body of a failure response,
/// reified as a typed value instead of a formatted string until the last
/// possible moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcError {
    /// Fully-qualified name of the failing type, e.g. `com.example.Allowed`
    /// for a business exception, or a framework-internal name such as
    /// `tcprest.NoSuchMethod` for a protocol failure.
    pub type_fqn: String,
    /// Human-readable detail message.
    pub message: String,
    /// Which status bucket this error belongs to.
    pub kind: ErrorKind,
}

impl RpcError {
    /// Construct a business-exception error.
    pub fn business(type_fqn: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_fqn: type_fqn.into(),
            message: message.into(),
            kind: ErrorKind::Business,
        }
    }

    /// Construct a server-side error.
    pub fn server(type_fqn: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_fqn: type_fqn.into(),
            message: message.into(),
            kind: ErrorKind::Server,
        }
    }

    /// Construct a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self {
            type_fqn: "tcprest.ProtocolError".to_string(),
            message: message.into(),
            kind: ErrorKind::Protocol,
        }
    }

    /// Construct a transport error: a connect/read/write/timeout failure
    /// reported to the caller directly rather than encoded as a response
    /// frame, since it never reaches the point where a frame could be sent.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            type_fqn: "tcprest.TransportError".to_string(),
            message: message.into(),
            kind: ErrorKind::Transport,
        }
    }

    /// Format this error as the `TypeFQN:message` body used on the wire.
    pub fn to_wire_body(&self) -> String {
        format!("{}:{}", self.type_fqn, self.message)
    }

    /// Parse a wire body of the form `TypeFQN:message` back into an
    /// `RpcError`, given the [`Status`] it was received under.
    ///
    /// `Status::SUCCESS` is not a valid input; callers should have already
    /// branched on success before reaching for this.
    pub fn from_wire_body(status: Status, body: &str) -> RpcError {
        let (type_fqn, message) = match body.split_once(':') {
            Some((t, m)) => (t.to_string(), m.to_string()),
            None => ("tcprest.UnknownError".to_string(), body.to_string()),
        };
        let kind = match status {
            Status::BUSINESS => ErrorKind::Business,
            Status::SERVER => ErrorKind::Server,
            _ => ErrorKind::Protocol,
        };
        RpcError {
            type_fqn,
            message,
            kind,
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.type_fqn, self.kind, self.message)
    }
}

impl std::error::Error for RpcError {}

impl HasKind for RpcError {
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_roundtrips_through_kind() {
        assert_eq!(Status::from(ErrorKind::Business), Status::BUSINESS);
        assert_eq!(Status::from(ErrorKind::Server), Status::SERVER);
        assert_eq!(Status::from(ErrorKind::Protocol), Status::PROTOCOL);
    }

    #[test]
    fn status_parses_known_codes_only() {
        assert_eq!(Status::parse("0"), Some(Status::SUCCESS));
        assert_eq!(Status::parse("3"), Some(Status::PROTOCOL));
        assert_eq!(Status::parse("9"), None);
        assert_eq!(Status::parse("x"), None);
    }

    #[test]
    fn rpc_error_wire_body_roundtrip() {
        let err = RpcError::business("com.example.TooSlow", "deadline exceeded");
        let body = err.to_wire_body();
        assert_eq!(body, "com.example.TooSlow:deadline exceeded");
        let decoded = RpcError::from_wire_body(Status::BUSINESS, &body);
        assert_eq!(decoded, err);
    }

    #[test]
    fn rpc_error_wire_body_without_colon_falls_back() {
        let decoded = RpcError::from_wire_body(Status::SERVER, "boom");
        assert_eq!(decoded.type_fqn, "tcprest.UnknownError");
        assert_eq!(decoded.message, "boom");
        assert_eq!(decoded.kind, ErrorKind::Server);
    }
}
