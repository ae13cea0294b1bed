//! A vehicle registration service.
//!
//! This software registers vehicle records behind a single gRPC method. A
//! request carries a model and a plate; blank values are rejected before any
//! store access, and a plate already present in the store is rejected as a
//! conflict. Accepted requests insert one record and return its generated
//! identifier.
//!
//! Every component is a [`tower::Service`], so the validation layer, the
//! registrar and the store compose with `tower::ServiceBuilder` and can be
//! driven directly in tests without a network.
//!
//! Client/server communication relies on [`tonic`], a Rust implementation of
//! gRPC.
//!
//! [`tonic`]: https://docs.rs/tonic

#[cfg(test)]
pub mod tests;

pub mod registry;
pub mod transport;

pub mod carros_tracing {
    use std::sync::Once;

    use tracing_subscriber::{EnvFilter, fmt};

    static INIT: Once = Once::new();

    /// Initialize tracing for tests.
    ///
    /// Logs are written through the test writer and filtered with `RUST_LOG`,
    /// silent when the variable is unset.
    pub fn init() {
        init_with_default("off", true);
    }

    /// Initialize tracing for the server binary, `info` unless `RUST_LOG` says otherwise.
    pub fn init_for_server() {
        init_with_default("info", false);
    }

    fn init_with_default(default_directive: &str, test_writer: bool) {
        INIT.call_once(|| {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive));

            let builder = fmt().with_target(false).with_env_filter(filter);
            // A subscriber may already be installed by the embedding process.
            let _ = if test_writer {
                builder.with_test_writer().try_init()
            } else {
                builder.try_init()
            };
        });
    }
}
