//! Catalog statistics.

use crate::vehicles::records::{Category, Vehicle};

/// Aggregates over the full in-memory sequence, independent of any filter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    /// Number of vehicles.
    pub total: usize,

    /// Sum of prices; non-numeric prices count as zero.
    pub total_value: f64,

    /// SUV count.
    pub suv: usize,

    /// Sedan count.
    pub sedan: usize,

    /// Hatchback count.
    pub hatchback: usize,

    /// Sub4m count.
    pub sub4m: usize,
}

impl Statistics {
    /// Aggregate over `vehicles`.
    #[must_use]
    pub fn from_vehicles(vehicles: &[Vehicle]) -> Self {
        vehicles
            .iter()
            .fold(Self::default(), |mut statistics, vehicle| {
                statistics.total += 1;
                statistics.total_value += vehicle.price.unwrap_or(0.0);

                match vehicle.category {
                    Category::Suv => statistics.suv += 1,
                    Category::Sedan => statistics.sedan += 1,
                    Category::Hatchback => statistics.hatchback += 1,
                    Category::Sub4m => statistics.sub4m += 1,
                }

                statistics
            })
    }

    /// Vehicle count for one category.
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Suv => self.suv,
            Category::Sedan => self.sedan,
            Category::Hatchback => self.hatchback,
            Category::Sub4m => self.sub4m,
        }
    }
}
