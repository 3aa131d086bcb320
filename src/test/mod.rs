//! Test support: a recording surface, a memory-backed context and fixtures.


pub(crate) use context::TestContext;
pub(crate) use surface::{RecordingSurface, Rendered};

use crate::vehicles::{
    form::VehicleForm,
    records::{Category, Vehicle, VehicleId},
};

pub(crate) fn form(
    make: &str,
    model: &str,
    chassis: &str,
    category: &str,
    year: &str,
    price: &str,
) -> VehicleForm {
    VehicleForm {
        make: make.to_string(),
        model: model.to_string(),
        chassis: chassis.to_string(),
        category: category.to_string(),
        year: year.to_string(),
        price: price.to_string(),
    }
}

pub(crate) fn vehicle(
    id: &str,
    make: &str,
    model: &str,
    chassis: &str,
    category: Category,
    price: f64,
) -> Vehicle {
    Vehicle {
        id: VehicleId::from(id),
        make: make.to_string(),
        model: model.to_string(),
        chassis: chassis.to_string(),
        category,
        year: Some(2020),
        price: Some(price),
        created_at: None,
        updated_at: None,
    }
}
