//! In-memory vehicle store.
//!
//! Records are kept in a concurrent map keyed by plate, which makes the plate
//! uniqueness check and the insert one atomic step on the map entry. Handles
//! are cheap to clone and share the same content.
use std::{pin::Pin, sync::Arc, task::Poll};

use dashmap::{DashMap, mapref::entry::Entry};
use tower::Service;
use tracing::debug;

use crate::registry::{
    api::types::{StoreRequest, StoreResponse},
    error::RegistryError,
    infrastructure::naming::{VehicleId, VehicleRecord},
};

type PlateMap = DashMap<String, VehicleRecord>;

/// Vehicle store service
#[derive(Debug, Default, Clone)]
pub struct VehicleStore {
    vehicles: Arc<PlateMap>,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn exists_by_plate(&self, plate: &str) -> bool {
        self.vehicles.contains_key(plate)
    }

    fn find_by_id(&self, id: &VehicleId) -> Option<VehicleRecord> {
        self.vehicles.iter().find(|entry| entry.value().id == *id).map(|entry| entry.value().to_owned())
    }

    /// Insert the record unless its plate is already taken.
    ///
    /// The entry lock on the plate is held from the lookup to the insert.
    fn save(&self, model: String, plate: String) -> Result<VehicleRecord, RegistryError> {
        match self.vehicles.entry(plate) {
            Entry::Occupied(_) => Err(RegistryError::PlateAlreadyExists),
            Entry::Vacant(entry) => {
                let record = VehicleRecord::new(model, entry.key().to_owned());
                entry.insert(record.clone());
                Ok(record)
            }
        }
    }

    fn delete_all(&self) {
        self.vehicles.clear();
    }
}

impl Service<StoreRequest> for VehicleStore {
    type Response = StoreResponse;
    type Error = RegistryError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: StoreRequest) -> Self::Future {
        let this = self.clone();
        Box::pin(async move {
            match request {
                StoreRequest::ExistsByPlate(plate) => {
                    let exists = this.exists_by_plate(&plate);
                    debug!(%plate, exists, "[store] ExistsByPlate");
                    Ok(StoreResponse::Exists(exists))
                }
                StoreRequest::ExistsById(id) => {
                    let exists = this.find_by_id(&id).is_some();
                    debug!(%id, exists, "[store] ExistsById");
                    Ok(StoreResponse::Exists(exists))
                }
                StoreRequest::FindById(id) => {
                    debug!(%id, "[store] FindById");
                    Ok(StoreResponse::Record(this.find_by_id(&id)))
                }
                StoreRequest::Save { model, plate } => {
                    let record = this.save(model, plate)?;
                    debug!(id = %record.id, plate = %record.plate, "[store] Save");
                    Ok(StoreResponse::Saved(record))
                }
                StoreRequest::Count => Ok(StoreResponse::Count(this.vehicles.len())),
                StoreRequest::DeleteAll => {
                    debug!("[store] DeleteAll");
                    this.delete_all();
                    Ok(StoreResponse::Ack)
                }
            }
        })
    }
}
