//! Autovault prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bootstrap::{BootstrapError, ReadyPolicy, wait_until_ready},
    catalog::{
        Catalog, CatalogError, Event,
        errors::WriteOperation,
        filter::FilterState,
        render::{Card, CardAction, CardGrid, PLACEHOLDER, StatisticsPanel, count_label, format_price},
        statistics::Statistics,
        surface::{Notice, Severity, Surface},
    },
    store::{Document, DocumentStore, MemoryStore, StoreError, StoredDocument},
    vehicles::{
        StoreVehiclesService, VehiclesError, VehiclesService,
        data::{NewVehicle, VehicleUpdate},
        errors::FormError,
        form::{EditForm, VehicleForm, normalize_chassis},
        records::{Category, CategoryFilter, Vehicle, VehicleId},
    },
};
