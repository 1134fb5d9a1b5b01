//! One request/response exchange: parse the request line, dispatch it, and
//! encode the result, with every failure turned into a protocol-encoded
//! response rather than let loose on the accept loop.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

use tcprest_codec::{RequestParser, ResponseEncoder};
use tcprest_compress::CompressionConfig;
use tcprest_dispatch::{Invoker, ResourceRegistry};
use tcprest_error::RpcError;
use tcprest_mapper::{MapperRegistry, Value};
use tcprest_security::SecurityConfig;

/// Handle exactly one request/response exchange on `stream`, then return.
///
/// A connection handles exactly one request and is then closed. Only a
/// failure to read or write the socket itself returns `Err`; every failure
/// in the pipeline becomes a response line.
pub fn handle_connection(
    mut stream: TcpStream,
    registry: &ResourceRegistry,
    mappers: &MapperRegistry,
    security: &SecurityConfig,
    compression: &CompressionConfig,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut raw_line = Vec::new();
    let n = reader.read_until(b'\n', &mut raw_line)?;
    if n == 0 {
        return Ok(());
    }
    while matches!(raw_line.last(), Some(b'\n') | Some(b'\r')) {
        raw_line.pop();
    }

    let response = process(&raw_line, registry, mappers, security, compression);

    stream.write_all(&response)?;
    stream.write_all(b"\n")?;
    stream.flush()
}

/// Run the parse → dispatch → encode pipeline over one already-delimited
/// line, returning the fully encoded response bytes (compressed and
/// checksummed/signed per `security`/`compression` if configured).
pub(crate) fn process(
    raw_line: &[u8],
    registry: &ResourceRegistry,
    mappers: &MapperRegistry,
    security: &SecurityConfig,
    compression: &CompressionConfig,
) -> Vec<u8> {
    let encoder = ResponseEncoder::new(mappers, security, compression);

    let (return_type_fqn, outcome) = match dispatch(raw_line, registry, mappers, security) {
        Ok((value, return_type_fqn)) => (return_type_fqn, Ok(value)),
        Err(err) => ("void".to_string(), Err(err)),
    };

    encoder.encode(&return_type_fqn, outcome).unwrap_or_else(|_| {
        // Even encoding the error response failed (e.g. a signature handler
        // itself errored); fall back to a bare, unsigned frame so the
        // client still gets something well-formed rather than a dropped
        // connection.
        let body = tcprest_proto::base64url::encode_str("tcprest.EncodeError:failed to encode response");
        format!("0|1|3|{body}").into_bytes()
    })
}

fn dispatch(
    raw_line: &[u8],
    registry: &ResourceRegistry,
    mappers: &MapperRegistry,
    security: &SecurityConfig,
) -> Result<(Value, String), RpcError> {
    let decompressed = tcprest_compress::unwrap(raw_line)
        .map_err(|e| RpcError::protocol(format!("failed to decompress request: {e}")))?;
    let line = String::from_utf8(decompressed)
        .map_err(|_| RpcError::protocol("request was not valid UTF-8"))?;

    let parsed = RequestParser::new(mappers, security).parse(&line)?;

    Invoker::new(registry, &security.class_whitelist).invoke(
        &parsed.class_fqn,
        &parsed.method,
        &parsed.param_type_fqns,
        &parsed.args,
    )
}
