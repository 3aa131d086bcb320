//! Vehicle Forms
//!
//! Raw field values as typed by the user, and their normalisation into
//! [`NewVehicle`] and [`VehicleUpdate`] payloads. Numeric fields are parsed
//! leniently and never rejected; only the category is validated.

use jiff::Timestamp;

use crate::vehicles::{
    data::{NewVehicle, VehicleUpdate},
    errors::FormError,
    numbers::{parse_float_prefix, parse_int_prefix},
    records::{Category, Vehicle, VehicleId},
};

/// Create Form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleForm {
    /// Manufacturer.
    pub make: String,

    /// Model name.
    pub model: String,

    /// Chassis number as typed.
    pub chassis: String,

    /// Category spelling, e.g. `"SUV"`.
    pub category: String,

    /// Model year as typed.
    pub year: String,

    /// Price as typed.
    pub price: String,
}

impl VehicleForm {
    /// Normalise the form into an insert payload stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownCategory`] when the category is not one of
    /// the known categories.
    pub fn normalize(&self, now: Timestamp) -> Result<NewVehicle, FormError> {
        Ok(NewVehicle {
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            chassis: normalize_chassis(&self.chassis),
            category: self.category.parse()?,
            year: parse_int_prefix(&self.year),
            price: parse_float_prefix(&self.price),
            created_at: now,
        })
    }
}

/// Edit Form
///
/// `chassis` is shown for reference only and is never written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    /// Vehicle being edited.
    pub id: VehicleId,

    /// Manufacturer.
    pub make: String,

    /// Model name.
    pub model: String,

    /// Stored chassis number, read-only.
    pub chassis: String,

    /// Category spelling.
    pub category: String,

    /// Model year; empty when the stored year is not numeric.
    pub year: String,

    /// Price; empty when the stored price is not numeric.
    pub price: String,
}

impl EditForm {
    /// Populate an edit form from a loaded vehicle.
    #[must_use]
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            chassis: vehicle.chassis.clone(),
            category: vehicle.category.to_string(),
            year: vehicle.year.map(|year| year.to_string()).unwrap_or_default(),
            price: vehicle
                .price
                .map(|price| price.to_string())
                .unwrap_or_default(),
        }
    }

    /// Normalise the form into an update payload stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownCategory`] when the category is not one of
    /// the known categories.
    pub fn normalize(&self, now: Timestamp) -> Result<VehicleUpdate, FormError> {
        let category: Category = self.category.parse()?;

        Ok(VehicleUpdate {
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            category,
            year: parse_int_prefix(&self.year),
            price: parse_float_prefix(&self.price),
            updated_at: now,
        })
    }
}

/// Chassis numbers are compared and stored uppercased and trimmed.
#[must_use]
pub fn normalize_chassis(raw: &str) -> String {
    raw.to_uppercase().trim().to_string()
}
