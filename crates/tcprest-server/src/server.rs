//! `TcpServer`: the blocking accept-loop implementation of the server
//! lifecycle API (`up`/`down`/`addResource`/`addSingletonResource`/
//! `setSecurityConfig`/`setCompressionConfig`/`setMappers`), built on a
//! single accept thread.

use std::any::Any;
use std::fmt;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tcprest_compress::CompressionConfig;
use tcprest_dispatch::{ClassDescriptor, ResourceRegistry};
use tcprest_mapper::MapperRegistry;
use tcprest_security::SecurityConfig;

use crate::connection::handle_connection;
use crate::lifecycle::{ServerLifecycle, StartupError};
use crate::transport::ConnectionTransport;

/// How long [`TcpServer::down`] waits for the accept thread to exit before
/// giving up on joining it.
const SHUTDOWN_JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// A registry, mapper table, or security/compression config was changed
/// after the server left the `PASSIVE` state.
///
/// The resource registry is writable only before the server transitions
/// out of `PASSIVE`; once `RUNNING`, it is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotPassive;

impl fmt::Display for NotPassive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("server configuration can only change while PASSIVE")
    }
}

impl std::error::Error for NotPassive {}

/// A blocking, single-accept-thread TCPREST server.
pub struct TcpServer {
    registry: ResourceRegistry,
    mappers: RwLock<MapperRegistry>,
    security: RwLock<SecurityConfig>,
    compression: RwLock<CompressionConfig>,
    lifecycle: Mutex<ServerLifecycle>,
    listener: Mutex<Option<TcpListener>>,
    accept_thread: Mutex<Option<JoinHandle<()>>>,
}

impl Default for TcpServer {
    fn default() -> Self {
        Self::new()
    }
}

impl TcpServer {
    /// A `PASSIVE` server with default mappers, no security, and no
    /// compression.
    pub fn new() -> Self {
        Self {
            registry: ResourceRegistry::new(),
            mappers: RwLock::new(MapperRegistry::with_builtins()),
            security: RwLock::new(SecurityConfig::none()),
            compression: RwLock::new(CompressionConfig::default()),
            lifecycle: Mutex::new(ServerLifecycle::Passive),
            listener: Mutex::new(None),
            accept_thread: Mutex::new(None),
        }
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> ServerLifecycle {
        *self.lifecycle.lock().expect("lifecycle lock poisoned")
    }

    /// The address actually bound, if `RUNNING` (useful when `up` was
    /// called with port `0` and the OS picked one).
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener
            .lock()
            .expect("listener lock poisoned")
            .as_ref()
            .and_then(|l| l.local_addr().ok())
    }

    fn require_passive(&self) -> Result<(), NotPassive> {
        if self.lifecycle() == ServerLifecycle::Passive {
            Ok(())
        } else {
            Err(NotPassive)
        }
    }

    /// Register a class-only resource: every call gets a fresh instance.
    pub fn add_resource(&self, descriptor: ClassDescriptor) -> Result<(), NotPassive> {
        self.require_passive()?;
        self.registry.register_class(descriptor);
        Ok(())
    }

    /// Register a singleton resource: every call shares `instance`.
    pub fn add_singleton_resource(
        &self,
        descriptor: ClassDescriptor,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Result<(), NotPassive> {
        self.require_passive()?;
        self.registry.register_singleton(descriptor, instance);
        Ok(())
    }

    /// Replace the security configuration (checksum, signature, whitelist).
    pub fn set_security_config(&self, config: SecurityConfig) -> Result<(), NotPassive> {
        self.require_passive()?;
        *self.security.write().expect("security lock poisoned") = config;
        Ok(())
    }

    /// Replace the compression configuration.
    pub fn set_compression_config(&self, config: CompressionConfig) -> Result<(), NotPassive> {
        self.require_passive()?;
        *self.compression.write().expect("compression lock poisoned") = config;
        Ok(())
    }

    /// Replace the mapper registry.
    pub fn set_mappers(&self, mappers: MapperRegistry) -> Result<(), NotPassive> {
        self.require_passive()?;
        *self.mappers.write().expect("mapper lock poisoned") = mappers;
        Ok(())
    }

    /// Bind to `addr` and start serving on a background accept thread.
    ///
    /// Idempotent: a no-op returning `Ok(())` if already `RUNNING`.
    pub fn up(self: &Arc<Self>, addr: SocketAddr) -> Result<(), StartupError> {
        let mut lifecycle = self.lifecycle.lock().expect("lifecycle lock poisoned");
        if *lifecycle != ServerLifecycle::Passive {
            return Ok(());
        }

        let listener =
            TcpListener::bind(addr).map_err(|e| StartupError::BindFailed(e.to_string()))?;
        let listener_for_thread = listener
            .try_clone()
            .map_err(|e| StartupError::BindFailed(e.to_string()))?;

        *lifecycle = ServerLifecycle::Running;
        drop(lifecycle);

        *self.listener.lock().expect("listener lock poisoned") = Some(listener);

        let server = Arc::clone(self);
        let handle = thread::spawn(move || server.accept_loop(listener_for_thread));
        *self.accept_thread.lock().expect("accept thread lock poisoned") = Some(handle);
        Ok(())
    }

    /// The blocking accept loop: accept, read a line, process it, respond,
    /// close, run on its own thread for the lifetime of the server.
    fn accept_loop(&self, listener: TcpListener) {
        loop {
            let stream = match listener.accept() {
                Ok((stream, _addr)) => stream,
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed; stopping accept loop");
                    break;
                }
            };

            if self.lifecycle() != ServerLifecycle::Running {
                // This is either the self-connect unblocking down() sent,
                // or a connection that raced a concurrent shutdown. Either
                // way, stop serving.
                break;
            }

            self.serve_one(stream);
        }
    }

    fn serve_one(&self, stream: TcpStream) {
        let mappers = self.mappers.read().expect("mapper lock poisoned");
        let security = self.security.read().expect("security lock poisoned");
        let compression = *self.compression.read().expect("compression lock poisoned");

        if let Err(e) = handle_connection(stream, &self.registry, &mappers, &security, &compression)
        {
            tracing::warn!(error = %e, "connection ended with an I/O error");
        }
    }

    /// Begin shutdown: stop accepting new connections, join the accept
    /// thread (bounded to 5 s), and release the port. Idempotent: a second
    /// call after the first returns immediately.
    pub fn down(&self) {
        let mut lifecycle = self.lifecycle.lock().expect("lifecycle lock poisoned");
        if *lifecycle != ServerLifecycle::Running {
            return;
        }
        *lifecycle = ServerLifecycle::Closing;
        drop(lifecycle);

        let local_addr = self
            .listener
            .lock()
            .expect("listener lock poisoned")
            .as_ref()
            .and_then(|l| l.local_addr().ok());

        // `accept()` has no interrupt primitive on a std TcpListener; force
        // it to return once by connecting to our own listening address.
        if let Some(addr) = local_addr {
            let _ = TcpStream::connect_timeout(&addr, Duration::from_millis(200));
        }

        if let Some(handle) = self
            .accept_thread
            .lock()
            .expect("accept thread lock poisoned")
            .take()
        {
            let deadline = Instant::now() + SHUTDOWN_JOIN_TIMEOUT;
            while !handle.is_finished() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(10));
            }
            if handle.is_finished() {
                let _ = handle.join();
            } else {
                tracing::warn!("accept thread did not exit within the 5s shutdown timeout");
            }
        }

        *self.listener.lock().expect("listener lock poisoned") = None;
        *self.lifecycle.lock().expect("lifecycle lock poisoned") = ServerLifecycle::Passive;
    }
}

impl ConnectionTransport for TcpServer {
    fn up(self: &Arc<Self>, addr: SocketAddr) -> Result<(), StartupError> {
        TcpServer::up(self, addr)
    }

    fn down(&self) {
        TcpServer::down(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;
    use tcprest_dispatch::MethodDescriptor;
    use tcprest_mapper::Value;

    fn counter_server() -> Arc<TcpServer> {
        let server = Arc::new(TcpServer::new());
        server
            .add_singleton_resource(
                ClassDescriptor::new(
                    "com.example.Counter",
                    vec![MethodDescriptor::new(
                        "next",
                        vec![],
                        "int",
                        |instance, _args| {
                            let counter = instance
                                .downcast_ref::<std::sync::atomic::AtomicI64>()
                                .expect("type mismatch");
                            Ok(Value::Int(
                                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1,
                            ))
                        },
                    )],
                    || Arc::new(std::sync::atomic::AtomicI64::new(0)),
                ),
                Arc::new(std::sync::atomic::AtomicI64::new(0)),
            )
            .unwrap();
        server
    }

    #[test]
    fn up_down_is_idempotent_and_leaves_the_port_rebindable() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let server = counter_server();
        server.up(addr).unwrap();
        assert_eq!(server.lifecycle(), ServerLifecycle::Running);

        let bound_addr = {
            let listener = server.listener.lock().unwrap();
            listener.as_ref().unwrap().local_addr().unwrap()
        };

        server.down();
        assert_eq!(server.lifecycle(), ServerLifecycle::Passive);
        // Repeated calls after the first are no-ops.
        server.down();
        server.down();
        assert_eq!(server.lifecycle(), ServerLifecycle::Passive);

        // The port is immediately re-bindable by a fresh server.
        let server2 = Arc::new(TcpServer::new());
        server2.up(bound_addr).unwrap();
        assert_eq!(server2.lifecycle(), ServerLifecycle::Running);
        server2.down();
    }

    #[test]
    fn up_then_down_then_up_succeeds_on_the_same_port() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let server = counter_server();
        server.up(addr).unwrap();
        let bound_addr = {
            let listener = server.listener.lock().unwrap();
            listener.as_ref().unwrap().local_addr().unwrap()
        };
        server.down();

        server.up(bound_addr).unwrap();
        assert_eq!(server.lifecycle(), ServerLifecycle::Running);
        server.down();
    }

    #[test]
    fn configuration_is_rejected_once_running() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let server = counter_server();
        server.up(addr).unwrap();

        let err = server.set_compression_config(CompressionConfig::disabled());
        assert_eq!(err, Err(NotPassive));

        server.down();
    }

    #[test]
    fn singleton_counter_observes_monotone_identity_over_real_connections() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let server = counter_server();
        server.up(addr).unwrap();
        let bound_addr = {
            let listener = server.listener.lock().unwrap();
            listener.as_ref().unwrap().local_addr().unwrap()
        };

        let mut seen = Vec::new();
        for _ in 0..3 {
            use std::io::{BufRead, BufReader, Write};
            let mut stream = TcpStream::connect(bound_addr).unwrap();
            stream
                .write_all(b"com.example.Counter/next()\n")
                .unwrap();
            stream.flush().unwrap();
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            seen.push(line.trim().to_string());
            // Give the single accept thread a moment between connections.
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(seen.len(), 3);
        server.down();
    }
}
