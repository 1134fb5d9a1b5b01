//! `RpcClient`: a connect-per-call blocking transport. Reads and writes go
//! through plain `io::BufRead`/`io::Write` handles, newline-delimited, the
//! same shape a low-level line reader/writer pair would use -- but a fresh
//! [`TcpStream`] is opened for each call instead of multiplexing requests
//! over one long-lived connection, since a connection handles exactly one
//! request/response exchange on both ends of TCPREST.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tcprest_codec::{RequestEncoder, ResponseOutcome, ResponseParser};
use tcprest_compress::CompressionConfig;
use tcprest_error::RpcError;
use tcprest_mapper::MapperRegistry;
use tcprest_security::SecurityConfig;

use crate::wire_value::{Arg, FromValue};

/// Per-call timeout used when the caller passes [`Duration::ZERO`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A blocking TCPREST client: one [`TcpStream`] per call, torn down after
/// the response line is read.
pub struct RpcClient {
    host: String,
    port: u16,
    pub(crate) mappers: MapperRegistry,
    pub(crate) security: SecurityConfig,
    pub(crate) compression: CompressionConfig,
    pub(crate) default_timeout: Duration,
}

impl RpcClient {
    /// A client with default mappers, no security, and no compression,
    /// targeting `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            mappers: MapperRegistry::with_builtins(),
            security: SecurityConfig::none(),
            compression: CompressionConfig::disabled(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Invoke `class_fqn/method(args)`, decoding the response as `R`, with
    /// the default call timeout.
    pub fn call<R: FromValue>(
        &self,
        class_fqn: &str,
        method: &str,
        args: Vec<Arg>,
    ) -> Result<R, RpcError> {
        self.call_with_timeout(class_fqn, method, args, Duration::ZERO)
    }

    /// Invoke `class_fqn/method(args)`, decoding the response as `R`.
    ///
    /// `timeout` bounds both connect and read; [`Duration::ZERO`] selects
    /// [`DEFAULT_TIMEOUT`].
    pub fn call_with_timeout<R: FromValue>(
        &self,
        class_fqn: &str,
        method: &str,
        args: Vec<Arg>,
        timeout: Duration,
    ) -> Result<R, RpcError> {
        let effective_timeout = if timeout.is_zero() { self.default_timeout } else { timeout };
        let params: Vec<_> = args.into_iter().map(Arg::into_pair).collect();

        let encoder = RequestEncoder::new(&self.mappers, &self.security, &self.compression);
        let wire = encoder.encode(class_fqn, method, &params)?;

        let line = self.round_trip(&wire, effective_timeout)?;

        let parsed = ResponseParser::new(&self.mappers, &self.security).parse(&line, R::type_fqn())?;
        match parsed.body {
            ResponseOutcome::Success(value) => R::from_value(value),
            ResponseOutcome::Failure(err) => Err(err),
        }
    }

    fn round_trip(&self, wire: &[u8], timeout: Duration) -> Result<String, RpcError> {
        let addr = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| RpcError::transport(format!("failed to resolve {}:{}: {e}", self.host, self.port)))?
            .next()
            .ok_or_else(|| RpcError::transport(format!("no address for {}:{}", self.host, self.port)))?;

        let stream = TcpStream::connect_timeout(&addr, timeout)
            .map_err(|e| RpcError::transport(format!("failed to connect: {e}")))?;
        stream
            .set_read_timeout(Some(timeout))
            .map_err(|e| RpcError::transport(format!("failed to set read timeout: {e}")))?;
        stream
            .set_write_timeout(Some(timeout))
            .map_err(|e| RpcError::transport(format!("failed to set write timeout: {e}")))?;

        let mut writer = stream.try_clone().map_err(|e| RpcError::transport(e.to_string()))?;
        writer
            .write_all(wire)
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush())
            .map_err(|e| RpcError::transport(format!("failed to send request: {e}")))?;

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        let n = reader
            .read_line(&mut line)
            .map_err(|e| RpcError::transport(format!("failed to read response: {e}")))?;
        if n == 0 {
            return Err(RpcError::transport(
                "connection closed before a response was received",
            ));
        }
        while matches!(line.as_bytes().last(), Some(b'\n') | Some(b'\r')) {
            line.pop();
        }
        Ok(line)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tcprest_dispatch::{ClassDescriptor, MethodDescriptor};
    use tcprest_mapper::Value;
    use tcprest_server::TcpServer;

    fn running_hello_world() -> (Arc<TcpServer>, std::net::SocketAddr) {
        let server = Arc::new(TcpServer::new());
        server
            .add_resource(ClassDescriptor::new(
                "com.example.HelloWorld",
                vec![MethodDescriptor::new(
                    "helloWorld",
                    vec![],
                    "java.lang.String",
                    |_instance, _args| Ok(Value::Str("Hello, world!".to_string())),
                )],
                || Arc::new(()),
            ))
            .unwrap();
        let addr: std::net::SocketAddr = "127.0.0.1:0".parse().unwrap();
        server.up(addr).unwrap();
        let bound = server.local_addr().unwrap();
        (server, bound)
    }

    #[test]
    fn round_trips_a_zero_arg_call() {
        let (server, addr) = running_hello_world();
        let client = RpcClient::new(addr.ip().to_string(), addr.port());

        let result: String = client.call("com.example.HelloWorld", "helloWorld", vec![]).unwrap();
        assert_eq!(result, "Hello, world!");

        server.down();
    }

    #[test]
    fn unknown_class_surfaces_as_protocol_error() {
        let (server, addr) = running_hello_world();
        let client = RpcClient::new(addr.ip().to_string(), addr.port());

        let err = client
            .call::<String>("com.example.Missing", "anything", vec![])
            .unwrap_err();
        assert_eq!(err.kind, tcprest_error::ErrorKind::Protocol);

        server.down();
    }

    #[test]
    fn connecting_to_a_closed_port_is_a_transport_error_not_a_panic() {
        let addr: std::net::SocketAddr = "127.0.0.1:1".parse().unwrap();
        let client = RpcClient::new(addr.ip().to_string(), addr.port());
        let err = client
            .call_with_timeout::<String>(
                "com.example.Anything",
                "anything",
                vec![],
                Duration::from_millis(200),
            )
            .unwrap_err();
        assert_eq!(err.kind, tcprest_error::ErrorKind::Transport);
    }

    #[test]
    fn args_round_trip_through_the_tuple_formatter() {
        let server = Arc::new(TcpServer::new());
        server
            .add_resource(ClassDescriptor::new(
                "com.example.HelloWorld",
                vec![MethodDescriptor::new(
                    "oneTwoThree",
                    vec![
                        "java.lang.String".to_string(),
                        "int".to_string(),
                        "boolean".to_string(),
                    ],
                    "java.lang.String",
                    |_instance, args| {
                        let s = match &args[0] {
                            Value::Str(s) => s.clone(),
                            _ => unreachable!(),
                        };
                        let i = match &args[1] {
                            Value::Int(i) => *i,
                            _ => unreachable!(),
                        };
                        let b = match &args[2] {
                            Value::Bool(b) => *b,
                            _ => unreachable!(),
                        };
                        Ok(Value::Str(format!("{s},{i},{b}")))
                    },
                )],
                || Arc::new(()),
            ))
            .unwrap();
        let addr: std::net::SocketAddr = "127.0.0.1:0".parse().unwrap();
        server.up(addr).unwrap();
        let bound = server.local_addr().unwrap();

        let client = RpcClient::new(bound.ip().to_string(), bound.port());
        let result: String = client
            .call(
                "com.example.HelloWorld",
                "oneTwoThree",
                vec![Arg::from("x"), Arg::from(2i64), Arg::from(false)],
            )
            .unwrap();
        assert_eq!(result, "x,2,false");

        server.down();
    }

    #[test]
    fn concurrent_calls_each_get_their_own_connection() {
        let (server, addr) = running_hello_world();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let host = addr.ip().to_string();
                let port = addr.port();
                thread::spawn(move || {
                    let client = RpcClient::new(host, port);
                    client
                        .call::<String>("com.example.HelloWorld", "helloWorld", vec![])
                        .unwrap()
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), "Hello, world!");
        }
        server.down();
    }
}
