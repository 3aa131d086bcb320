//! Vehicles errors.

use thiserror::Error;

use crate::store::StoreError;

/// Errors related to vehicle persistence.
#[derive(Debug, Error)]
pub enum VehiclesError {
    /// The vehicle no longer exists.
    #[error("vehicle not found")]
    NotFound,

    /// Store error other than a missing document.
    #[error("storage error")]
    Store(#[source] StoreError),

    /// A vehicle could not be converted to a document.
    #[error("invalid vehicle document")]
    Encoding(#[from] serde_json::Error),
}

impl From<StoreError> for VehiclesError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(_) => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

/// Errors raised while normalising form input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// Category is not one of the known spellings.
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}
