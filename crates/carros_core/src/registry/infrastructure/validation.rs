//! Request validation for registrations.
//!
//! Registrations must carry a model and a plate with visible content. The
//! check runs as a [`tower::Layer`] in front of the registrar so that an
//! invalid request is rejected before any store access.
//!
//! ## Validation Rules
//!
//! - **Model**: must contain at least one non-whitespace character
//! - **Plate**: must contain at least one non-whitespace character
//!
//! Values are forwarded unchanged; the validator never trims or normalizes.
//! Which field failed is not reported: every rejection is the same
//! `RegistryError::InvalidInput`.

use std::{pin::Pin, task::Poll};

use tower::{Layer, Service};
use tracing::warn;

use crate::registry::{api::types::RegistrationRequest, error::RegistryError};

/// Field validator for registration requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator;

impl InputValidator {
    /// Returns `true` if the label is neither empty nor whitespace-only.
    pub fn is_valid_label(&self, label: &str) -> bool {
        !label.trim().is_empty()
    }

    /// Validates both fields of a registration request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either the model or the plate is blank.
    pub fn validate(&self, request: &RegistrationRequest) -> Result<(), RegistryError> {
        if self.is_valid_label(&request.model) && self.is_valid_label(&request.plate) {
            Ok(())
        } else {
            Err(RegistryError::InvalidInput)
        }
    }
}

/// Layer wrapping a registration service with [`ValidationService`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationLayer;

impl<S> Layer<S> for ValidationLayer {
    type Service = ValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ValidationService::new(inner)
    }
}

/// Registration service guarded by input validation.
///
/// Requests failing [`InputValidator::validate`] are answered with
/// `InvalidInput` and never reach the inner service.
#[derive(Debug, Clone)]
pub struct ValidationService<S> {
    validator: InputValidator,
    inner: S,
}

impl<S> ValidationService<S> {
    pub fn new(inner: S) -> Self {
        Self { validator: InputValidator, inner }
    }
}

impl<S> Service<RegistrationRequest> for ValidationService<S>
where
    S: Service<RegistrationRequest, Error = RegistryError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = RegistryError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: RegistrationRequest) -> Self::Future {
        if let Err(error) = self.validator.validate(&request) {
            warn!(model = %request.model, plate = %request.plate, "[validation] rejected registration");
            return Box::pin(async move { Err(error) });
        }
        // Take the instance that was driven to readiness, leave a fresh clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(request).await })
    }
}
