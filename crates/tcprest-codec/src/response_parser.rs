//! Client-side response parsing: the mirror of [`crate::parser`].

use tcprest_error::{RpcError, Status};
use tcprest_mapper::MapperRegistry;
use tcprest_proto::{base64url, sniff, FrameForm};
use tcprest_security::SecurityConfig;

use crate::converter::decode_body;
use crate::response::{ParsedResponse, ResponseOutcome};
use crate::suffix::split_suffixes;
use crate::verify::{verify_checksum, verify_signature};

/// Parses response frames into [`ParsedResponse`]s.
pub struct ResponseParser<'a> {
    mappers: &'a MapperRegistry,
    security: &'a SecurityConfig,
}

impl<'a> ResponseParser<'a> {
    /// Build a parser using `mappers` to decode the success body and
    /// `security` to verify checksum/signature suffixes.
    pub fn new(mappers: &'a MapperRegistry, security: &'a SecurityConfig) -> Self {
        Self { mappers, security }
    }

    /// Parse one already-decompressed response line, decoding a successful
    /// body as `return_type_fqn`.
    ///
    /// Every response this framework emits is pipe-framed; a bracket-shaped
    /// line here means the peer is speaking a legacy dialect this client
    /// doesn't reconstruct exceptions for, so it is reported as a protocol
    /// error rather than silently swallowed.
    pub fn parse(&self, line: &str, return_type_fqn: &str) -> Result<ParsedResponse, RpcError> {
        if matches!(sniff(line), FrameForm::BracketLegacy) {
            return Err(RpcError::protocol(
                "received a legacy-shaped response frame; this client requires v2 responses",
            ));
        }

        let split = split_suffixes(line);
        verify_signature(self.security, &split)?;
        verify_checksum(self.security, &split)?;

        let fields: Vec<&str> = split.core.split('|').collect();
        let [_tag, status_str, body] = fields[..] else {
            return Err(RpcError::protocol(format!(
                "malformed response frame: expected 3 fields, found {}",
                fields.len()
            )));
        };

        let status = Status::parse(status_str)
            .ok_or_else(|| RpcError::protocol(format!("unknown status code {status_str:?}")))?;

        if status == Status::SUCCESS {
            let value = decode_body(self.mappers, return_type_fqn, body)
                .map_err(|e| RpcError::protocol(e.to_string()))?;
            Ok(ParsedResponse {
                status,
                body: ResponseOutcome::Success(value),
            })
        } else {
            let decoded_body =
                base64url::decode_str(body).map_err(|_| RpcError::protocol("invalid base64 body"))?;
            let err = RpcError::from_wire_body(status, &decoded_body);
            Ok(ParsedResponse {
                status,
                body: ResponseOutcome::Failure(err),
            })
        }
    }
}
