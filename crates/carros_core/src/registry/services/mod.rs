//! Backing services for the registry.
//!
//! - **Store**: concurrent in-memory persistence of vehicle records, keyed by plate

pub mod store;
