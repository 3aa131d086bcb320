//! Card and statistics view models.

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};
use rusty_money::iso;

use crate::{
    catalog::statistics::Statistics,
    vehicles::records::{Category, Vehicle, VehicleId},
};

/// Shown in place of cards when nothing matches.
pub const PLACEHOLDER: &str = "No vehicles found matching your criteria.";

/// Action handle attached to a card; the surface hands it back as an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Open the edit form for the vehicle.
    Edit(VehicleId),

    /// Ask to remove the vehicle.
    Remove(VehicleId),
}

/// Display model for a single vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Vehicle the card shows.
    pub id: VehicleId,

    /// `"VIN: {chassis}"`
    pub chassis: String,

    /// `"{make} {model}"`
    pub title: String,

    /// `"{year} | {category}"`
    pub subtitle: String,

    /// Formatted rupee price.
    pub price: String,

    /// Edit and remove handles, in that order.
    pub actions: [CardAction; 2],
}

impl Card {
    /// Build the card for one vehicle.
    #[must_use]
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        let year = vehicle
            .year
            .map_or_else(|| "NaN".to_string(), |year| year.to_string());

        Self {
            id: vehicle.id.clone(),
            chassis: format!("VIN: {}", vehicle.chassis),
            title: format!("{} {}", vehicle.make, vehicle.model),
            subtitle: format!("{year} | {}", vehicle.category),
            price: format_price(vehicle.price),
            actions: [
                CardAction::Edit(vehicle.id.clone()),
                CardAction::Remove(vehicle.id.clone()),
            ],
        }
    }
}

/// Rendered grid of cards plus its count label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGrid {
    /// Cards in display order.
    pub cards: Vec<Card>,

    /// Result of [`count_label`] for the visible cards.
    pub count_label: String,
}

impl CardGrid {
    /// Build the grid for the visible vehicles.
    #[must_use]
    pub fn from_vehicles(vehicles: &[&Vehicle]) -> Self {
        Self {
            cards: vehicles.iter().map(|vehicle| Card::from_vehicle(vehicle)).collect(),
            count_label: count_label(vehicles.len()),
        }
    }

    /// Placeholder text, present only when there are no cards.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some(PLACEHOLDER)
    }
}

/// Formatted statistics panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsPanel {
    /// Total vehicle count.
    pub total: String,

    /// Sum of prices as a rupee amount.
    pub total_value: String,

    /// SUV count.
    pub suv: String,

    /// Sedan count.
    pub sedan: String,

    /// Hatchback count.
    pub hatchback: String,

    /// Sub4m count.
    pub sub4m: String,
}

impl From<&Statistics> for StatisticsPanel {
    fn from(statistics: &Statistics) -> Self {
        Self {
            total: statistics.total.to_string(),
            total_value: format_price(Some(statistics.total_value)),
            suv: statistics.count(Category::Suv).to_string(),
            sedan: statistics.count(Category::Sedan).to_string(),
            hatchback: statistics.count(Category::Hatchback).to_string(),
            sub4m: statistics.count(Category::Sub4m).to_string(),
        }
    }
}

/// `"{n} VEHICLES AVAILABLE"`, singular for exactly one.
#[must_use]
pub fn count_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "S" };

    format!("{count} VEHICLE{plural} AVAILABLE")
}

/// Rupee amount with en-IN digit grouping and at most three fraction digits.
///
/// Amounts too large for [`Decimal`] are written out from their shortest
/// float representation, without a fraction.
#[must_use]
pub fn format_price(price: Option<f64>) -> String {
    let symbol = iso::INR.symbol;

    let Some(amount) = price.filter(|amount| amount.is_finite()) else {
        return format!("{symbol}NaN");
    };

    let (whole, fraction) = match Decimal::from_f64(amount) {
        Some(decimal) => {
            let text = decimal
                .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
                .normalize()
                .abs()
                .to_string();

            match text.split_once('.') {
                Some((whole, fraction)) => (whole.to_string(), Some(fraction.to_string())),
                None => (text, None),
            }
        }
        None => (integer_digits(amount.abs()), None),
    };

    let sign = if amount < 0.0 && (whole != "0" || fraction.is_some()) {
        "-"
    } else {
        ""
    };

    let mut formatted = format!("{symbol}{sign}{}", group_en_in(&whole));

    if let Some(fraction) = fraction {
        formatted.push('.');
        formatted.push_str(&fraction);
    }

    formatted
}

/// Integral digits of a large finite float: `1e29` becomes a one and 29 zeros.
fn integer_digits(value: f64) -> String {
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: usize = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let zeros = (exponent + 1).saturating_sub(digits.len());

    format!("{digits}{}", "0".repeat(zeros))
}

/// Groups the last three digits, then every two: `1234567` becomes `12,34,567`.
fn group_en_in(digits: &str) -> String {
    let length = digits.chars().count();
    let mut grouped = String::with_capacity(length + length / 2);

    for (index, digit) in digits.chars().enumerate() {
        let remaining = length - index;

        if index > 0 && remaining >= 3 && (remaining - 3) % 2 == 0 {
            grouped.push(',');
        }

        grouped.push(digit);
    }

    grouped
}
