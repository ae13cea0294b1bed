//! Registry API type definitions.
//!
//! Request and response values for the two service boundaries of the registry:
//!
//! ## Registration API
//! What a client submits to register a vehicle, and the record it gets back.
//! This is the internal form of the `Register` RPC.
//!
//! ## Store API
//! What the registrar asks of the persistence store. Any backend answering
//! these requests can stand in for the in-memory store.

use crate::registry::infrastructure::naming::{VehicleId, VehicleRecord};

/// Request to register a new vehicle.
///
/// Fields are carried as received; blank values are rejected by the validation
/// layer before the registrar sees them.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RegistrationRequest {
    /// Model label of the vehicle
    pub model: String,
    /// Plate of the vehicle, the uniqueness key
    pub plate: String,
}

impl RegistrationRequest {
    pub fn new(model: impl Into<String>, plate: impl Into<String>) -> Self {
        Self { model: model.into(), plate: plate.into() }
    }
}

/// Response to a successful registration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RegistrationResponse {
    /// The vehicle was inserted; carries the stored record and its new identifier.
    Registered(VehicleRecord),
}

/// Store request types.
///
/// `ExistsByPlate`, `Save` and `DeleteAll` form the contract the registrar and
/// the administrative tooling rely on; the remaining queries serve
/// verification and reporting.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StoreRequest {
    /// Whether any record holds this plate.
    ExistsByPlate(String),

    /// Whether a record with this identifier exists.
    ExistsById(VehicleId),

    /// Look up a record by identifier.
    FindById(VehicleId),

    /// Insert a new record if no record holds the plate yet.
    ///
    /// The check and the insert are a single atomic step: when the plate is
    /// taken the store answers with `RegistryError::PlateAlreadyExists` and
    /// leaves its content untouched.
    Save {
        /// Model label of the new record
        model: String,
        /// Plate of the new record
        plate: String,
    },

    /// Number of stored records.
    Count,

    /// Remove every record. Administrative reset, not reachable over RPC.
    DeleteAll,
}

/// Store response types.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StoreResponse {
    /// Answer to `ExistsByPlate` and `ExistsById`.
    Exists(bool),

    /// Answer to `FindById`; `None` when no record matches.
    Record(Option<VehicleRecord>),

    /// Answer to `Save`: the inserted record with its assigned identifier.
    Saved(VehicleRecord),

    /// Answer to `Count`.
    Count(usize),

    /// Acknowledgment of `DeleteAll`.
    Ack,
}
