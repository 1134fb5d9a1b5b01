//! Server-side response encoding: turns a call outcome (a returned value or
//! a thrown error) into the status-tagged wire frame.

use tcprest_compress::CompressionConfig;
use tcprest_error::{RpcError, Status};
use tcprest_mapper::{MapperRegistry, Value};
use tcprest_proto::{base64url, Version};
use tcprest_security::SecurityConfig;

use crate::assemble::assemble;
use crate::converter::encode_body;

/// Encodes outbound v2 response frames.
pub struct ResponseEncoder<'a> {
    mappers: &'a MapperRegistry,
    security: &'a SecurityConfig,
    compression: &'a CompressionConfig,
}

impl<'a> ResponseEncoder<'a> {
    /// Build an encoder over the given mapper registry and security/
    /// compression configuration.
    pub fn new(
        mappers: &'a MapperRegistry,
        security: &'a SecurityConfig,
        compression: &'a CompressionConfig,
    ) -> Self {
        Self {
            mappers,
            security,
            compression,
        }
    }

    /// Encode the outcome of a call declared to return `return_type_fqn`.
    ///
    /// A null return value is carried by the null sentinel, the same as a
    /// user-supplied `"NULL"` string would be carried by a mapper-encoded
    /// literal. The two remain distinguishable because only [`Value::Null`]
    /// triggers the sentinel.
    pub fn encode(&self, return_type_fqn: &str, outcome: Result<Value, RpcError>) -> Result<Vec<u8>, RpcError> {
        let (status, body) = match outcome {
            Ok(value) => {
                let body = encode_body(self.mappers, return_type_fqn, &value)
                    .map_err(|e| RpcError::server("tcprest.EncodeError", e.to_string()))?;
                (Status::SUCCESS, body)
            }
            Err(err) => {
                let status = Status::from(err.kind);
                let body = base64url::encode_str(&err.to_wire_body());
                (status, body)
            }
        };
        assemble(
            Version::V1,
            &status.to_string(),
            &body,
            self.security,
            self.compression,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::response_parser::ResponseParser;
    use crate::response::ResponseOutcome;
    use tcprest_error::ErrorKind;

    #[test]
    fn encodes_and_parses_success() {
        let mappers = MapperRegistry::with_builtins();
        let security = SecurityConfig::none();
        let compression = CompressionConfig::disabled();
        let encoder = ResponseEncoder::new(&mappers, &security, &compression);

        let wire = encoder
            .encode("java.lang.String", Ok(Value::Str("Hello, world!".to_string())))
            .unwrap();
        let decompressed = tcprest_compress::unwrap(&wire).unwrap();
        let line = String::from_utf8(decompressed).unwrap();

        let parser = ResponseParser::new(&mappers, &security);
        let parsed = parser.parse(&line, "java.lang.String").unwrap();
        match parsed.body {
            ResponseOutcome::Success(v) => assert_eq!(v, Value::Str("Hello, world!".to_string())),
            ResponseOutcome::Failure(_) => panic!("expected success"),
        }
    }

    #[test]
    fn encodes_and_parses_business_error() {
        let mappers = MapperRegistry::with_builtins();
        let security = SecurityConfig::none();
        let compression = CompressionConfig::disabled();
        let encoder = ResponseEncoder::new(&mappers, &security, &compression);

        let err = RpcError::business("com.example.TooSlow", "deadline exceeded");
        let wire = encoder.encode("void", Err(err.clone())).unwrap();
        let decompressed = tcprest_compress::unwrap(&wire).unwrap();
        let line = String::from_utf8(decompressed).unwrap();

        let parser = ResponseParser::new(&mappers, &security);
        let parsed = parser.parse(&line, "void").unwrap();
        match parsed.body {
            ResponseOutcome::Failure(decoded) => {
                assert_eq!(decoded.kind, ErrorKind::Business);
                assert_eq!(decoded.type_fqn, err.type_fqn);
                assert_eq!(decoded.message, err.message);
            }
            ResponseOutcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn null_return_round_trips_as_null_not_string_null() {
        let mappers = MapperRegistry::with_builtins();
        let security = SecurityConfig::none();
        let compression = CompressionConfig::disabled();
        let encoder = ResponseEncoder::new(&mappers, &security, &compression);

        let wire = encoder.encode("java.lang.String", Ok(Value::Null)).unwrap();
        let decompressed = tcprest_compress::unwrap(&wire).unwrap();
        let line = String::from_utf8(decompressed).unwrap();
        let parser = ResponseParser::new(&mappers, &security);
        let parsed = parser.parse(&line, "java.lang.String").unwrap();
        match parsed.body {
            ResponseOutcome::Success(v) => assert!(v.is_null()),
            ResponseOutcome::Failure(_) => panic!("expected success"),
        }
    }
}
