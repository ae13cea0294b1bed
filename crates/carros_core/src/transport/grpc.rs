//! # gRPC Transport Implementation
//!
//! This module exposes the registry over gRPC using Protocol Buffers and the
//! Tonic framework, and provides the matching client.
//!
//! ## Components
//!
//! - **CarrosHandler**: server implementation routing `Register` calls to a
//!   registration service
//! - **CarrosGrpc**: client service making outbound `Register` calls
//! - **Protocol Buffer Conversions**: conversions between internal and protobuf
//!   types
//!
//! ## Status Mapping
//!
//! Registry errors travel as gRPC status codes with the error's display text as
//! message:
//!
//! | error                | status             | message                       |
//! |----------------------|--------------------|-------------------------------|
//! | `InvalidInput`       | `INVALID_ARGUMENT` | "invalid input data"          |
//! | `PlateAlreadyExists` | `ALREADY_EXISTS`   | "vehicle with existing plate" |
//! | anything else        | `INTERNAL`         | error display text            |
//!
//! The client maps the first two codes back to the same errors.

use std::{future::Future, pin::Pin, task::Poll};

use tonic::{Code, Request, Response, Status, transport::Channel};
use tower::{Service, ServiceExt};

/// Default port the registry server listens on.
pub const DEFAULT_GRPC_PORT: u16 = 50051;

/// Protocol Buffer definitions and descriptor set for the carros gRPC service.
pub mod proto {
    tonic::include_proto!("carros");

    /// Pre-compiled Protocol Buffer descriptor set for service reflection.
    pub const CARROS_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("carros_descriptor");
}

use crate::registry::{
    api::types::{RegistrationRequest, RegistrationResponse},
    error::RegistryError,
    infrastructure::naming::{VehicleId, VehicleRecord},
};

/// Converts registry errors to gRPC Status codes for wire transmission.
impl From<RegistryError> for Status {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::InvalidInput => Status::invalid_argument(error.to_string()),
            RegistryError::PlateAlreadyExists => Status::already_exists(error.to_string()),
            _ => Status::internal(error.to_string()),
        }
    }
}

/// Converts gRPC Status codes received by the client back to registry errors.
impl From<Status> for RegistryError {
    fn from(status: Status) -> Self {
        match status.code() {
            Code::InvalidArgument => RegistryError::InvalidInput,
            Code::AlreadyExists => RegistryError::PlateAlreadyExists,
            _ => RegistryError::TransportFailure(status.message().to_string()),
        }
    }
}

/// gRPC server handler for vehicle registration.
///
/// `CarrosHandler` accepts incoming `Register` calls, converts them to
/// [`RegistrationRequest`]s and forwards them to the wrapped registration
/// service, usually [`crate::registry::RegistryApiDefaultStack`].
pub struct CarrosHandler<RegistryApi> {
    /// Registration service handler.
    registry: RegistryApi,
}

impl<RegistryApi> CarrosHandler<RegistryApi> {
    /// Creates a new handler around the given registration service.
    pub fn new(registry: RegistryApi) -> Self {
        Self { registry }
    }
}

#[tonic::async_trait]
impl<RegistryApi> proto::carros_server::Carros for CarrosHandler<RegistryApi>
where
    RegistryApi: Service<RegistrationRequest, Response = RegistrationResponse, Error = RegistryError>
        + Clone
        + Sync
        + Send
        + 'static,
    RegistryApi::Future: Send,
{
    /// Handles vehicle registration requests.
    ///
    /// Absent fields arrive as empty strings and are rejected by validation.
    async fn register(
        &self,
        request: Request<proto::VehicleRequest>,
    ) -> Result<Response<proto::VehicleResponse>, Status> {
        let req = request.into_inner();
        match self.registry.clone().oneshot(RegistrationRequest::from(req)).await? {
            RegistrationResponse::Registered(record) => Ok(Response::new(record.into())),
        }
    }
}

/// gRPC client service for vehicle registration.
///
/// Wraps a tonic channel to a remote registry and speaks the same
/// [`RegistrationRequest`]/[`RegistrationResponse`] types as the local stack,
/// so remote and in-process registries are interchangeable behind
/// `tower::Service`.
#[derive(Debug, Clone)]
pub struct CarrosGrpc {
    client: proto::carros_client::CarrosClient<Channel>,
}

impl CarrosGrpc {
    /// Connects to a registry server.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Server URL, e.g. `http://[::1]:50051`
    ///
    /// # Errors
    ///
    /// Returns `TransportFailure` if the connection cannot be established.
    pub async fn connect(endpoint: String) -> Result<Self, RegistryError> {
        proto::carros_client::CarrosClient::connect(endpoint)
            .await
            .map(|client| Self { client })
            .map_err(|error| RegistryError::TransportFailure(error.to_string()))
    }

    /// Builds the client on top of an existing channel.
    pub fn with_channel(channel: Channel) -> Self {
        Self { client: proto::carros_client::CarrosClient::new(channel) }
    }
}

impl Service<RegistrationRequest> for CarrosGrpc {
    type Response = RegistrationResponse;
    type Error = RegistryError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: RegistrationRequest) -> Self::Future {
        let mut client = self.client.clone();
        Box::pin(async move {
            let response = client.register(Request::new(request.into())).await?.into_inner();
            Ok(RegistrationResponse::Registered(response.try_into()?))
        })
    }
}

// Protocol Buffer conversions

/// Converts Protocol Buffer VehicleRequest to internal registration request.
impl From<proto::VehicleRequest> for RegistrationRequest {
    fn from(req: proto::VehicleRequest) -> Self {
        RegistrationRequest { model: req.model, plate: req.plate }
    }
}

/// Converts internal registration request to Protocol Buffer VehicleRequest.
impl From<RegistrationRequest> for proto::VehicleRequest {
    fn from(req: RegistrationRequest) -> Self {
        proto::VehicleRequest { model: req.model, plate: req.plate }
    }
}

/// Converts internal vehicle record to Protocol Buffer VehicleResponse.
impl From<VehicleRecord> for proto::VehicleResponse {
    fn from(record: VehicleRecord) -> Self {
        proto::VehicleResponse { id: record.id.to_string(), model: record.model, plate: record.plate }
    }
}

/// Converts Protocol Buffer VehicleResponse to internal vehicle record.
///
/// Fails with `TransportFailure` when the server sent an identifier that is not
/// a vehicle id.
impl TryFrom<proto::VehicleResponse> for VehicleRecord {
    type Error = RegistryError;

    fn try_from(response: proto::VehicleResponse) -> Result<Self, Self::Error> {
        let id = response
            .id
            .parse::<VehicleId>()
            .map_err(|_| RegistryError::TransportFailure(format!("malformed vehicle id '{}'", response.id)))?;
        Ok(VehicleRecord { id, model: response.model, plate: response.plate })
    }
}
