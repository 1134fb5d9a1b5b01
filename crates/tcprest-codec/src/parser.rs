//! `RequestParser::parse`: frame-level decode of one request line into a
//! [`ParsedRequest`], including the metadata split into class and method
//! name. Identifier validation and the class whitelist are enforced
//! downstream by [`tcprest_dispatch::Invoker`], which also resolves the
//! overload and performs the actual call.

use tcprest_error::RpcError;
use tcprest_mapper::MapperRegistry;
use tcprest_proto::{sniff, FrameForm};
use tcprest_security::SecurityConfig;

use crate::converter::{decode_meta, decode_params, parse_legacy_request};
use crate::request::ParsedRequest;
use crate::suffix::split_suffixes;
use crate::verify::{verify_checksum, verify_signature};

/// Parses request frames into [`ParsedRequest`]s.
pub struct RequestParser<'a> {
    mappers: &'a MapperRegistry,
    security: &'a SecurityConfig,
}

impl<'a> RequestParser<'a> {
    /// Build a parser using `mappers` for argument decoding and `security`
    /// for checksum/signature verification.
    pub fn new(mappers: &'a MapperRegistry, security: &'a SecurityConfig) -> Self {
        Self { mappers, security }
    }

    /// Parse one already-decompressed request line.
    ///
    /// Compression is handled by the caller: the transport layer strips it
    /// before a line is even available to parse.
    pub fn parse(&self, line: &str) -> Result<ParsedRequest, RpcError> {
        match sniff(line) {
            FrameForm::BracketLegacy => self.parse_legacy(line),
            FrameForm::Pipe(version) => self.parse_pipe(line, version),
        }
    }

    fn parse_legacy(&self, line: &str) -> Result<ParsedRequest, RpcError> {
        let (class_fqn, method, tokens) =
            parse_legacy_request(line).map_err(|e| RpcError::protocol(e.to_string()))?;

        let mut args = Vec::with_capacity(tokens.len());
        let mut param_type_fqns = Vec::with_capacity(tokens.len());
        for (value, type_fqn) in tokens {
            let decoded = self
                .mappers
                .decode(&type_fqn, &value)
                .map_err(|e| RpcError::protocol(e.to_string()))?;
            args.push(decoded);
            param_type_fqns.push(type_fqn);
        }

        Ok(ParsedRequest {
            version: None,
            class_fqn,
            method,
            param_type_fqns,
            args,
        })
    }

    fn parse_pipe(&self, line: &str, version: tcprest_proto::Version) -> Result<ParsedRequest, RpcError> {
        let split = split_suffixes(line);
        verify_signature(self.security, &split)?;
        verify_checksum(self.security, &split)?;

        let fields: Vec<&str> = split.core.split('|').collect();
        let [_tag, meta, params] = fields[..] else {
            return Err(RpcError::protocol(format!(
                "malformed request frame: expected 3 fields, found {}",
                fields.len()
            )));
        };

        let (class_fqn, method) = decode_meta(meta).map_err(|e| RpcError::protocol(e.to_string()))?;
        let (args, param_type_fqns) = decode_params(self.mappers, params)
            .map_err(|e| RpcError::protocol(e.to_string()))?;

        Ok(ParsedRequest {
            version: Some(version),
            class_fqn,
            method,
            param_type_fqns,
            args,
        })
    }

}

#[cfg(test)]
mod test {
    use super::*;
    use crate::converter::{encode_meta, encode_params};
    use tcprest_mapper::Value;
    use tcprest_security::{ChecksumAlgorithmConfig, SecurityConfig};

    #[test]
    fn parses_pipe_request_with_no_security() {
        let mappers = MapperRegistry::with_builtins();
        let meta = encode_meta("com.example.HelloWorld", "helloWorld");
        let params = encode_params(&mappers, &[]).unwrap();
        let frame = format!("1|{meta}|{params}");

        let security = SecurityConfig::none();
        let parser = RequestParser::new(&mappers, &security);
        let parsed = parser.parse(&frame).unwrap();
        assert_eq!(parsed.class_fqn, "com.example.HelloWorld");
        assert_eq!(parsed.method, "helloWorld");
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn parses_legacy_request() {
        let mappers = MapperRegistry::with_builtins();
        let security = SecurityConfig::none();
        let parser = RequestParser::new(&mappers, &security);

        let parsed = parser
            .parse("com.example.HelloWorld/oneTwoThree({{x}}java.lang.String,{{2}}int,{{false}}boolean)")
            .unwrap();
        assert_eq!(parsed.class_fqn, "com.example.HelloWorld");
        assert_eq!(parsed.method, "oneTwoThree");
        assert_eq!(
            parsed.args,
            vec![Value::Str("x".to_string()), Value::Int(2), Value::Bool(false)]
        );
        assert!(parsed.version.is_none());
    }

    #[test]
    fn rejects_missing_checksum_when_required() {
        let mappers = MapperRegistry::with_builtins();
        let meta = encode_meta("com.example.HelloWorld", "helloWorld");
        let params = encode_params(&mappers, &[]).unwrap();
        let frame = format!("1|{meta}|{params}");

        let security = SecurityConfig {
            checksum: ChecksumAlgorithmConfig::Crc32,
            ..SecurityConfig::none()
        };
        let parser = RequestParser::new(&mappers, &security);
        assert!(parser.parse(&frame).is_err());
    }

    #[test]
    fn accepts_valid_checksum_and_rejects_tampered_frame() {
        let mappers = MapperRegistry::with_builtins();
        let meta = encode_meta("com.example.HelloWorld", "helloWorld");
        let params = encode_params(&mappers, &[]).unwrap();
        let core = format!("1|{meta}|{params}");
        let chk = tcprest_security::ChecksumAlgorithm::Crc32
            .compute(core.as_bytes())
            .unwrap();
        let frame = format!("{core}|CHK:{chk}");

        let security = SecurityConfig {
            checksum: ChecksumAlgorithmConfig::Crc32,
            ..SecurityConfig::none()
        };
        let parser = RequestParser::new(&mappers, &security);
        assert!(parser.parse(&frame).is_ok());

        let mut tampered = frame.clone();
        tampered.replace_range(3..4, "9");
        // If the flipped byte happened to land inside CHK itself, still
        // exercise the property against the metadata byte directly.
        let tampered = if tampered == frame { format!("{core}X|CHK:{chk}") } else { tampered };
        assert!(parser.parse(&tampered).is_err());
    }
}
