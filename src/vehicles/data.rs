//! Vehicles Data

use jiff::Timestamp;

use crate::vehicles::records::Category;

/// New Vehicle Data
///
/// Carries no id; the store assigns one on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    /// Manufacturer.
    pub make: String,

    /// Model name.
    pub model: String,

    /// Normalised chassis number.
    pub chassis: String,

    /// Body category.
    pub category: Category,

    /// Model year, `None` when not numeric.
    pub year: Option<i64>,

    /// Price, `None` when not numeric.
    pub price: Option<f64>,

    /// Creation time.
    pub created_at: Timestamp,
}

/// Vehicle Update Data
///
/// Chassis numbers are fixed once created, so there is no chassis here.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleUpdate {
    /// Manufacturer.
    pub make: String,

    /// Model name.
    pub model: String,

    /// Body category.
    pub category: Category,

    /// Model year, `None` when not numeric.
    pub year: Option<i64>,

    /// Price, `None` when not numeric.
    pub price: Option<f64>,

    /// Edit time.
    pub updated_at: Timestamp,
}
