//! Vehicles Repository

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{
    store::{Document, DocumentStore, StoreError, StoredDocument},
    vehicles::{
        data::{NewVehicle, VehicleUpdate},
        errors::VehiclesError,
        numbers::{lenient_price, lenient_timestamp, lenient_year},
        records::{Category, Vehicle, VehicleId},
    },
};

const CHASSIS_FIELD: &str = "chassis";

/// Stored shape of a vehicle document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VehicleDocument {
    make: String,
    model: String,
    chassis: String,
    category: Category,
    #[serde(default, deserialize_with = "lenient_year")]
    year: Option<i64>,
    #[serde(default, deserialize_with = "lenient_price")]
    price: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<Timestamp>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    updated_at: Option<Timestamp>,
}

/// Fields written by an edit; chassis and creation time are left untouched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VehicleUpdateDocument<'a> {
    make: &'a str,
    model: &'a str,
    category: Category,
    year: Option<i64>,
    price: Option<f64>,
    updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub(crate) struct VehiclesRepository {
    collection: String,
}

impl VehiclesRepository {
    #[must_use]
    pub(crate) fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
        }
    }

    pub(crate) fn collection(&self) -> &str {
        &self.collection
    }

    pub(crate) async fn list_vehicles(
        &self,
        store: &dyn DocumentStore,
    ) -> Result<Vec<Vehicle>, StoreError> {
        let documents = store.fetch_all(&self.collection).await?;

        Ok(documents
            .into_iter()
            .filter_map(|document| {
                let id = document.id.clone();

                decode(document)
                    .inspect_err(|error| warn!("skipping undecodable vehicle {id}: {error}"))
                    .ok()
            })
            .collect())
    }

    pub(crate) async fn chassis_exists(
        &self,
        store: &dyn DocumentStore,
        chassis: &str,
    ) -> Result<bool, StoreError> {
        let matches = store
            .query_equals(
                &self.collection,
                CHASSIS_FIELD,
                Value::String(chassis.to_string()),
            )
            .await?;

        Ok(!matches.is_empty())
    }

    pub(crate) async fn create_vehicle(
        &self,
        store: &dyn DocumentStore,
        vehicle: &NewVehicle,
    ) -> Result<VehicleId, VehiclesError> {
        let document = to_document(&VehicleDocument {
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            chassis: vehicle.chassis.clone(),
            category: vehicle.category,
            year: vehicle.year,
            price: vehicle.price,
            created_at: Some(vehicle.created_at),
            updated_at: None,
        })?;

        let id = store.insert(&self.collection, document).await?;

        Ok(VehicleId::new(id))
    }

    pub(crate) async fn update_vehicle(
        &self,
        store: &dyn DocumentStore,
        vehicle: &VehicleId,
        update: &VehicleUpdate,
    ) -> Result<(), VehiclesError> {
        let document = to_document(&VehicleUpdateDocument {
            make: &update.make,
            model: &update.model,
            category: update.category,
            year: update.year,
            price: update.price,
            updated_at: update.updated_at,
        })?;

        store
            .update_by_id(&self.collection, vehicle.as_str(), document)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_vehicle(
        &self,
        store: &dyn DocumentStore,
        vehicle: &VehicleId,
    ) -> Result<(), StoreError> {
        store.delete_by_id(&self.collection, vehicle.as_str()).await
    }
}

fn decode(document: StoredDocument) -> Result<Vehicle, serde_json::Error> {
    let fields: VehicleDocument = serde_json::from_value(Value::Object(document.fields))?;

    Ok(Vehicle {
        id: VehicleId::new(document.id),
        make: fields.make,
        model: fields.model,
        chassis: fields.chassis,
        category: fields.category,
        year: fields.year,
        price: fields.price,
        created_at: fields.created_at,
        updated_at: fields.updated_at,
    })
}

fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(serde::ser::Error::custom(format!(
            "expected an object, got {other}"
        ))),
    }
}
