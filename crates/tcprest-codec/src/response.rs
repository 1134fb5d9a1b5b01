//! The decoded form of one response frame.

use tcprest_error::{RpcError, Status};
use tcprest_mapper::Value;

/// A fully decoded response.
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    /// The wire status code.
    pub status: Status,
    /// The successful value, or the reconstructed error.
    pub body: ResponseOutcome,
}

/// Either a successful return value or the error the server reported.
#[derive(Debug, Clone)]
pub enum ResponseOutcome {
    /// `STATUS=0`: the call completed normally.
    Success(Value),
    /// `STATUS∈{1,2,3}`: the call failed.
    Failure(RpcError),
}
