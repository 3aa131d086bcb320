//! Firestore Errors

use autovault::store::StoreError;
use thiserror::Error;

/// Errors that can occur when communicating with Firestore.
#[derive(Debug, Error)]
pub enum FirestoreError {
    /// An HTTP transport or body decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Firestore answered with a non-2xx status.
    #[error("firestore returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A typed value carried a tag this client does not understand.
    #[error("unsupported firestore value type: {0}")]
    UnsupportedValue(String),

    /// A typed value's payload did not match its tag.
    #[error("malformed firestore value: {0}")]
    MalformedValue(String),

    /// A document resource name had no id segment.
    #[error("malformed document name: {0}")]
    DocumentName(String),
}

impl From<FirestoreError> for StoreError {
    fn from(error: FirestoreError) -> Self {
        match error {
            FirestoreError::Status { status: 404, body } => StoreError::NotFound(body),
            FirestoreError::Status {
                status: 401 | 403,
                body,
            } => StoreError::PermissionDenied(body),
            FirestoreError::Status { status, body } if status == 429 || status >= 500 => {
                StoreError::Unavailable(format!("status {status}: {body}"))
            }
            error @ FirestoreError::Http(_) => StoreError::Transport(Box::new(error)),
            error => StoreError::UnexpectedResponse(error.to_string()),
        }
    }
}
