//! External-facing API of the registry.
//!
//! - **Registration**: the registrar service behind the `Register` RPC
//! - **Types**: request and response values exchanged between the registry
//!   components

pub mod registration;
pub mod types;

pub use types::*;
