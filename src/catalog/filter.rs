//! Filter & search pipeline.

use crate::vehicles::records::{CategoryFilter, Vehicle};

/// Current category selection and free-text search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Category constraint.
    pub category: CategoryFilter,

    /// Case-insensitive substring matched against make, model and chassis.
    pub search: String,
}

impl FilterState {
    /// Filter state with the given category and search term.
    #[must_use]
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    /// Vehicles passing both constraints, in source order.
    #[must_use]
    pub fn apply<'a>(&self, vehicles: &'a [Vehicle]) -> Vec<&'a Vehicle> {
        let needle = self.search.to_lowercase();

        vehicles
            .iter()
            .filter(|vehicle| self.category.admits(vehicle.category))
            .filter(|vehicle| needle.is_empty() || matches_search(vehicle, &needle))
            .collect()
    }
}

fn matches_search(vehicle: &Vehicle, needle: &str) -> bool {
    [&vehicle.make, &vehicle.model, &vehicle.chassis]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}
