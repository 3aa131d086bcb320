//! Store errors.

use thiserror::Error;

/// Errors related to document store access.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document with the given id.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The store refused the credentials.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The store could not be reached or is overloaded.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with something that could not be understood.
    #[error("unexpected store response: {0}")]
    UnexpectedResponse(String),

    /// The request never completed.
    #[error("store transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}
