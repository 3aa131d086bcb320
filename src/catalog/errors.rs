//! Catalog errors.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::vehicles::{FormError, VehiclesError};

/// Mutation that failed against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    /// Inserting a new vehicle.
    Add,

    /// Writing an edit.
    Update,

    /// Deleting a vehicle.
    Remove,
}

impl Display for WriteOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            WriteOperation::Add => "add",
            WriteOperation::Update => "update",
            WriteOperation::Remove => "remove",
        })
    }
}

/// Errors related to catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Another vehicle already uses the chassis number.
    #[error("chassis number {0} already exists")]
    DuplicateChassis(String),

    /// The submitted form could not be normalised.
    #[error("invalid vehicle form")]
    InvalidForm(#[from] FormError),

    /// Reading the collection failed.
    #[error("failed to load vehicles")]
    Read(#[source] VehiclesError),

    /// A mutation failed.
    #[error("failed to {operation} vehicle")]
    Write {
        /// Mutation that was attempted.
        operation: WriteOperation,

        /// Underlying service error.
        #[source]
        source: VehiclesError,
    },
}
