// Error types for the persistence path
//
// Every failure between the API handler and the store is reduced to one of
// these variants before it reaches the handler, which switches on them to pick
// an HTTP status. Driver errors are flattened to strings so the type stays
// `Clone` (a pending connection attempt hands the same error to every waiter).

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while validating or persisting records
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// One or more fields failed validation
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A write violated a unique index (slug)
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The store could not be reached
    #[error("connection failed: {0}")]
    Connection(String),

    /// The store target is not configured
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A booking referenced an event that does not exist
    #[error("Event with ID {0} does not exist")]
    MissingReference(Uuid),

    /// Anything the store reported that is not classified above
    #[error("store error: {0}")]
    Unknown(String),
}

impl StoreError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        StoreError::Connection(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        StoreError::Configuration(msg.into())
    }

    /// Create an unclassified store error
    pub fn unknown(msg: impl Into<String>) -> Self {
        StoreError::Unknown(msg.into())
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(errors: ValidationErrors) -> Self {
        StoreError::Validation(errors)
    }
}
