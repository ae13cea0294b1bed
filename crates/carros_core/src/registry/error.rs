use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("invalid input data")]
    InvalidInput,

    #[error("vehicle with existing plate")]
    PlateAlreadyExists,

    #[error("Registry error, internal carros API error")]
    InternalRegistryError,

    #[error("Registry error, store unavailable ({0})")]
    StoreUnavailable(String),

    #[error("Registry error, transport failure ({0})")]
    TransportFailure(String),
}
