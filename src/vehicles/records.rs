//! Vehicle Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::vehicles::errors::FormError;

/// Store-assigned vehicle id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    /// Wrap an id handed out by the document store.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as handed out by the store.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VehicleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<String> for VehicleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Vehicle body category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Sport utility vehicle, stored as `"SUV"`.
    #[serde(rename = "SUV")]
    Suv,

    /// Sedan
    Sedan,

    /// Hatchback
    Hatchback,

    /// Sub four metre compact.
    Sub4m,
}

impl Category {
    /// Every known category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Suv,
        Category::Sedan,
        Category::Hatchback,
        Category::Sub4m,
    ];

    /// Stored and displayed spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Suv => "SUV",
            Category::Sedan => "Sedan",
            Category::Hatchback => "Hatchback",
            Category::Sub4m => "Sub4m",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| FormError::UnknownCategory(value.to_string()))
    }
}

/// Category constraint applied to the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every category passes.
    #[default]
    All,

    /// Only the given category passes.
    Only(Category),
}

impl CategoryFilter {
    /// Whether a vehicle of `category` passes this filter.
    #[must_use]
    pub fn admits(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => only == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => Display::fmt(category, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "All" {
            return Ok(CategoryFilter::All);
        }

        value.parse().map(CategoryFilter::Only)
    }
}

/// Vehicle Record
///
/// `year` and `price` are `None` when the stored value is not numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Store-assigned id.
    pub id: VehicleId,

    /// Manufacturer.
    pub make: String,

    /// Model name.
    pub model: String,

    /// Chassis (VIN) number, uppercased on entry and never edited.
    pub chassis: String,

    /// Body category.
    pub category: Category,

    /// Model year.
    pub year: Option<i64>,

    /// Price in rupees.
    pub price: Option<f64>,

    /// When the vehicle was added.
    pub created_at: Option<Timestamp>,

    /// When the vehicle was last edited.
    pub updated_at: Option<Timestamp>,
}
