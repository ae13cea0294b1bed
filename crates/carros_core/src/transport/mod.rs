//! Transports exposing the registry.
//!
//! - [`grpc`]: tonic server handler and client service for the `Carros` RPC
//! - [`loopback`]: in-process gRPC server on an ephemeral port, for tests and
//!   embedding

pub mod grpc;
pub mod loopback;
