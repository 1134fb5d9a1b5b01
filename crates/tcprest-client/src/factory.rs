//! `ClientFactory<T>`: builds typed-dispatcher proxies sharing one
//! configured [`RpcClient`] -- configure the connection's settings once,
//! then produce as many typed handles from it as callers need, each call
//! still opening its own connection.

use std::sync::Arc;

use tcprest_compress::CompressionConfig;
use tcprest_mapper::MapperRegistry;
use tcprest_security::SecurityConfig;

use crate::client::RpcClient;

/// Produces instances of a caller-defined typed-dispatcher type `T` that
/// wrap a shared, pre-configured [`RpcClient`].
///
/// A typed dispatcher is any type a caller writes by hand that holds an
/// `Arc<RpcClient>` and exposes one method per remote method, each calling
/// `RpcClient::call` with the right type FQNs -- TCPREST has no reflection
/// or codegen layer to synthesize this automatically, so callers hand-write
/// a typed wrapper over the transport.
pub struct ClientFactory<T> {
    client: Arc<RpcClient>,
    build: Box<dyn Fn(Arc<RpcClient>) -> T + Send + Sync>,
}

impl<T> ClientFactory<T> {
    /// Start building a factory targeting `host:port`. `build` constructs
    /// one `T` from a shared client handle; it's called once per
    /// `get_client`.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        build: impl Fn(Arc<RpcClient>) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            client: Arc::new(RpcClient::new(host, port)),
            build: Box::new(build),
        }
    }

    /// Replace the security configuration used for every call this factory
    /// produces clients for.
    ///
    /// Panics if a client has already been handed out via `get_client` and
    /// is still alive, since that client's configuration would otherwise
    /// change out from under it; call all `with_*` methods before the
    /// first `get_client`.
    pub fn with_security(mut self, config: SecurityConfig) -> Self {
        self.configure(|c| c.security = config);
        self
    }

    /// Replace the compression configuration.
    pub fn with_compression(mut self, config: CompressionConfig) -> Self {
        self.configure(|c| c.compression = config);
        self
    }

    /// Replace the mapper registry.
    pub fn with_mappers(mut self, mappers: MapperRegistry) -> Self {
        self.configure(|c| c.mappers = mappers);
        self
    }

    /// Set the default per-call timeout (used when a call passes
    /// [`std::time::Duration::ZERO`]).
    pub fn with_default_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.configure(|c| c.default_timeout = timeout);
        self
    }

    fn configure(&mut self, f: impl FnOnce(&mut RpcClient)) {
        let client = Arc::get_mut(&mut self.client)
            .expect("ClientFactory must be fully configured before the first get_client call");
        f(client);
    }

    /// Produce a new typed-dispatcher instance sharing this factory's
    /// configured client.
    pub fn get_client(&self) -> T {
        (self.build)(Arc::clone(&self.client))
    }
}
