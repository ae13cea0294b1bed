//! Registration API service implementation.
//!
//! The registrar turns a validated [`RegistrationRequest`] into a stored
//! vehicle record while keeping plates unique:
//!
//! 1. **Existence check**: ask the store whether the plate is taken. A taken
//!    plate ends the request with `PlateAlreadyExists` and nothing is written.
//! 2. **Insert**: save the record; the store assigns the identifier.
//!
//! The store performs its own insert-if-absent on `Save`, so a concurrent
//! registration of the same plate slipping between the two steps surfaces as
//! the same `PlateAlreadyExists` outcome instead of a duplicate record.
//!
//! Any other store failure is passed through untouched.

use std::{future::Future, pin::Pin, task::Poll};

use tower::Service;
use tracing::{info, warn};

use crate::registry::{
    api::types::{RegistrationRequest, RegistrationResponse, StoreRequest, StoreResponse},
    error::RegistryError,
};

/// Registration API Service
///
/// Enforces plate uniqueness and inserts new vehicle records through the
/// store service it wraps.
#[derive(Debug, Clone)]
pub struct RegistrationApiService<St> {
    /// Service persisting vehicle records
    store: St,
}

impl<St> RegistrationApiService<St> {
    /// Creates a new registrar on top of the provided store service
    pub fn new(store: St) -> Self {
        Self { store }
    }
}

impl<St> Service<RegistrationRequest> for RegistrationApiService<St>
where
    St: Service<StoreRequest, Response = StoreResponse, Error = RegistryError>
        + Clone
        + Send
        + 'static,
    St::Future: Send,
{
    type Response = RegistrationResponse;
    type Error = RegistryError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: RegistrationRequest) -> Self::Future {
        let mut store = self.store.clone();
        Box::pin(async move {
            let RegistrationRequest { model, plate } = request;
            info!(%model, %plate, "[registration] Register");

            match store.call(StoreRequest::ExistsByPlate(plate.clone())).await? {
                StoreResponse::Exists(false) => {}
                StoreResponse::Exists(true) => {
                    warn!(%plate, "[registration] plate already registered");
                    return Err(RegistryError::PlateAlreadyExists);
                }
                _ => return Err(RegistryError::InternalRegistryError),
            }

            match store.call(StoreRequest::Save { model, plate }).await {
                Ok(StoreResponse::Saved(record)) => {
                    info!(id = %record.id, plate = %record.plate, "[registration] Registered");
                    Ok(RegistrationResponse::Registered(record))
                }
                Ok(_) => Err(RegistryError::InternalRegistryError),
                Err(RegistryError::PlateAlreadyExists) => {
                    warn!("[registration] plate registered concurrently");
                    Err(RegistryError::PlateAlreadyExists)
                }
                Err(error) => Err(error),
            }
        })
    }
}
