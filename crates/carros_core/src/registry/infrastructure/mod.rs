//! Infrastructure primitives for the registry.
//!
//! Vehicle identification and request validation shared by every layer.

pub mod naming;
pub mod validation;
