//! Vehicles

pub mod data;
pub mod errors;
pub mod form;
mod numbers;
pub mod records;
mod repository;
pub mod service;

pub use errors::{FormError, VehiclesError};
pub use service::*;
