//! # Loopback Transport Implementation
//!
//! Serves a registry over real gRPC on an ephemeral localhost port inside the
//! current process. Tests use it as the in-process server channel: build a
//! store, spawn the loopback server, connect a client to its endpoint.
//!
//! The server runs as a background task of the current tokio runtime and is
//! aborted when the [`LoopbackRegistry`] handle is dropped.

use std::net::SocketAddr;

use tokio::{net::TcpListener, task::JoinHandle};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tower::Service;
use tracing::{error, info};

use crate::{
    registry::{
        api::types::{RegistrationRequest, RegistrationResponse},
        error::RegistryError,
        init_registry,
        services::store::VehicleStore,
    },
    transport::grpc::{CarrosGrpc, CarrosHandler, proto::carros_server::CarrosServer},
};

/// Handle on a registry served over loopback gRPC.
#[derive(Debug)]
pub struct LoopbackRegistry {
    /// Address the server is bound to.
    local_addr: SocketAddr,
    /// Background task running the server.
    server: JoinHandle<()>,
}

impl LoopbackRegistry {
    /// Server URL suitable for tonic clients, e.g. `http://127.0.0.1:40213`.
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Connects a new gRPC client to this server.
    pub async fn connect(&self) -> Result<CarrosGrpc, RegistryError> {
        CarrosGrpc::connect(self.endpoint()).await
    }
}

impl Drop for LoopbackRegistry {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Spawns the default registry stack on top of `store`, served over loopback gRPC.
///
/// The caller keeps its own clone of `store` to inspect or reset the content
/// while the server runs.
///
/// # Errors
///
/// Returns `TransportFailure` if no localhost port can be bound.
pub async fn spawn_loopback_registry(store: VehicleStore) -> Result<LoopbackRegistry, RegistryError> {
    spawn_loopback_with_registry(init_registry(store)).await
}

/// Spawns any registration service, served over loopback gRPC.
pub async fn spawn_loopback_with_registry<R>(registry: R) -> Result<LoopbackRegistry, RegistryError>
where
    R: Service<RegistrationRequest, Response = RegistrationResponse, Error = RegistryError>
        + Clone
        + Sync
        + Send
        + 'static,
    R::Future: Send,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|e| RegistryError::TransportFailure(e.to_string()))?;
    let local_addr = listener.local_addr().map_err(|e| RegistryError::TransportFailure(e.to_string()))?;

    let server = tokio::spawn(async move {
        info!(%local_addr, "[loopback] serving registry");
        if let Err(e) = Server::builder()
            .add_service(CarrosServer::new(CarrosHandler::new(registry)))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
        {
            error!(%local_addr, error = %e, "[loopback] server stopped");
        }
    });

    Ok(LoopbackRegistry { local_addr, server })
}
