//! Vehicle naming and identification.
//!
//! A vehicle is known by two names: the opaque [`VehicleId`] the store assigns
//! when the record is created, and its plate, the business key the registry
//! keeps unique. [`VehicleRecord`] carries both along with the model label.

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use uuid::Uuid;

use crate::registry::error::RegistryError;

/// Opaque identifier of a registered vehicle.
///
/// Assigned once by the store and never reused. Rendered on the wire as the
/// canonical hyphenated UUID text.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct VehicleId(Uuid);

impl VehicleId {
    /// Creates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VehicleId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Debug for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VehicleId({self})")
    }
}

impl FromStr for VehicleId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| RegistryError::InvalidInput)
    }
}

/// A registered vehicle.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct VehicleRecord {
    /// Identifier assigned by the store at creation time
    pub id: VehicleId,
    /// Free-form model label, e.g. "Gol"
    pub model: String,
    /// Plate, unique across all records, e.g. "HPX-1234"
    pub plate: String,
}

impl VehicleRecord {
    /// Builds a record with a freshly assigned identifier.
    pub fn new(model: String, plate: String) -> Self {
        Self { id: VehicleId::new(), model, plate }
    }
}

impl Display for VehicleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vehicle[{}] {} ({})", self.id, self.plate, self.model)
    }
}
