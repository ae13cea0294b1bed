//! Registry module.
//!
//! Vehicle registration is split into two responsibilities composed per
//! request:
//!
//! - **Validator**: a [`tower::Layer`] rejecting blank models and plates before
//!   anything else runs ([`infrastructure::validation`]).
//! - **Registrar**: checks the plate against the store and inserts the record
//!   ([`api::registration`]).
//!
//! The store ([`services::store`]) is reached through a `tower::Service` seam,
//! so the registrar is generic over any backend speaking
//! [`api::StoreRequest`]/[`api::StoreResponse`].
//!
//! ## Default Service Stack
//!
//! [`RegistryApiDefaultStack`] wires the validation layer in front of the
//! registrar backed by the in-memory [`services::store::VehicleStore`], and
//! [`init_registry()`] builds it.
pub mod api;
pub mod error;
pub mod infrastructure;
pub mod services;

/// Standard registration stack: validation in front of the registrar.
pub type RegistryApiDefaultStack = infrastructure::validation::ValidationService<
    api::registration::RegistrationApiService<services::store::VehicleStore>,
>;

/// Initialize the default registration stack on top of the given store.
///
/// The store handle is shared: the caller keeps its own clone for
/// administrative access (counting, resetting) while the stack serves
/// requests.
pub fn init_registry(store: services::store::VehicleStore) -> RegistryApiDefaultStack {
    init_registry_with_store(store)
}

/// Initialize a registration stack on top of any store service.
///
/// # Type Parameters
/// * `St` - store type answering [`api::StoreRequest`]s
pub fn init_registry_with_store<St>(
    store: St,
) -> infrastructure::validation::ValidationService<api::registration::RegistrationApiService<St>>
where
    St: tower::Service<api::StoreRequest, Response = api::StoreResponse, Error = error::RegistryError>
        + Clone
        + Send
        + 'static,
    St::Future: Send,
{
    tower::ServiceBuilder::new()
        .layer(infrastructure::validation::ValidationLayer)
        .service(api::registration::RegistrationApiService::new(store))
}
