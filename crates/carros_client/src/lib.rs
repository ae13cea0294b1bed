//! Blocking client for the carros vehicle registry.
//!
//! Lets synchronous code register vehicles without running its own async
//! runtime. Calls are driven on a process-wide tokio runtime created on first
//! use. When called from inside a multi-threaded tokio runtime, the calling
//! worker is handed over with [`tokio::task::block_in_place`]; calling from a
//! current-thread runtime panics.
//!
//! Registry errors arrive as [`tonic::Status`]: `INVALID_ARGUMENT` for blank
//! fields, `ALREADY_EXISTS` for a plate already registered.

use std::future::Future;

use carros_core::{
    registry::{error::RegistryError, infrastructure::naming::VehicleRecord},
    transport::grpc::proto::{VehicleRequest, carros_client::CarrosClient},
};
use once_cell::sync::OnceCell;
use tokio::{
    runtime::{Handle, Runtime},
    task::block_in_place,
};
use tonic::{Request, Status, transport::Channel};

/// The URL of the local registry server
pub const GRPC_URL: &str = "http://[::1]:50051";

static TOKIO_RUNTIME: OnceCell<Runtime> = OnceCell::new();
static GRPC_CLIENT: OnceCell<CarrosClient<Channel>> = OnceCell::new();

fn runtime() -> Result<&'static Runtime, Status> {
    TOKIO_RUNTIME.get_or_try_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| Status::internal(format!("failed to start client runtime: {e}")))
    })
}

fn block_on<F: Future>(future: F) -> Result<F::Output, Status> {
    let runtime = runtime()?;
    if Handle::try_current().is_ok() {
        Ok(block_in_place(|| runtime.block_on(future)))
    } else {
        Ok(runtime.block_on(future))
    }
}

/// Blocking handle on a registry server.
#[derive(Debug, Clone)]
pub struct CarrosBlockingClient {
    client: CarrosClient<Channel>,
}

impl CarrosBlockingClient {
    /// Connects to the registry server at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an `UNAVAILABLE` status if the server cannot be reached.
    pub fn connect(endpoint: impl Into<String>) -> Result<Self, Status> {
        let endpoint = endpoint.into();
        block_on(CarrosClient::connect(endpoint))?
            .map(|client| Self { client })
            .map_err(|e| Status::unavailable(e.to_string()))
    }

    /// Registers a vehicle and returns the stored record.
    pub fn register(&mut self, model: &str, plate: &str) -> Result<VehicleRecord, Status> {
        let request = Request::new(VehicleRequest { model: model.to_owned(), plate: plate.to_owned() });
        let response = block_on(self.client.register(request))??.into_inner();
        VehicleRecord::try_from(response).map_err(Status::from)
    }
}

/// Registers a vehicle on the registry listening at [`GRPC_URL`].
///
/// The connection is established on first use and shared by later calls.
pub fn register(model: &str, plate: &str) -> Result<VehicleRecord, Status> {
    let client = GRPC_CLIENT.get_or_try_init(|| {
        block_on(CarrosClient::connect(GRPC_URL))?.map_err(|e| Status::unavailable(e.to_string()))
    })?;
    CarrosBlockingClient { client: client.clone() }.register(model, plate)
}

/// Maps a status returned by the registry to its error, for callers that prefer
/// matching on [`RegistryError`].
pub fn registry_error(status: Status) -> RegistryError {
    RegistryError::from(status)
}
