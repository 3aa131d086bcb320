//! Vehicles service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;

use crate::{
    store::DocumentStore,
    vehicles::{
        data::{NewVehicle, VehicleUpdate},
        errors::VehiclesError,
        records::{Vehicle, VehicleId},
        repository::VehiclesRepository,
    },
};

/// [`VehiclesService`] backed by a [`DocumentStore`] collection.
#[derive(Clone)]
pub struct StoreVehiclesService {
    store: Arc<dyn DocumentStore>,
    repository: VehiclesRepository,
}

impl StoreVehiclesService {
    /// Service over `collection` in `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            repository: VehiclesRepository::new(collection),
        }
    }
}

impl Debug for StoreVehiclesService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreVehiclesService")
            .field("collection", &self.repository.collection())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl VehiclesService for StoreVehiclesService {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, VehiclesError> {
        Ok(self.repository.list_vehicles(self.store.as_ref()).await?)
    }

    async fn chassis_exists(&self, chassis: &str) -> Result<bool, VehiclesError> {
        Ok(self
            .repository
            .chassis_exists(self.store.as_ref(), chassis)
            .await?)
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> Result<VehicleId, VehiclesError> {
        self.repository
            .create_vehicle(self.store.as_ref(), &vehicle)
            .await
    }

    async fn update_vehicle(
        &self,
        vehicle: &VehicleId,
        update: VehicleUpdate,
    ) -> Result<(), VehiclesError> {
        self.repository
            .update_vehicle(self.store.as_ref(), vehicle, &update)
            .await
    }

    async fn delete_vehicle(&self, vehicle: &VehicleId) -> Result<(), VehiclesError> {
        Ok(self
            .repository
            .delete_vehicle(self.store.as_ref(), vehicle)
            .await?)
    }
}

/// Vehicle persistence operations.
#[automock]
#[async_trait]
pub trait VehiclesService: Send + Sync {
    /// Retrieves every vehicle in store order.
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, VehiclesError>;

    /// Whether any stored vehicle already uses `chassis`.
    async fn chassis_exists(&self, chassis: &str) -> Result<bool, VehiclesError>;

    /// Inserts a vehicle and returns the id the store assigned.
    async fn create_vehicle(&self, vehicle: NewVehicle) -> Result<VehicleId, VehiclesError>;

    /// Writes edited fields to an existing vehicle.
    async fn update_vehicle(
        &self,
        vehicle: &VehicleId,
        update: VehicleUpdate,
    ) -> Result<(), VehiclesError>;

    /// Deletes a vehicle.
    async fn delete_vehicle(&self, vehicle: &VehicleId) -> Result<(), VehiclesError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::{
        store::{MockDocumentStore, StoreError},
        vehicles::records::Category,
    };

    use super::*;

    fn new_vehicle() -> NewVehicle {
        NewVehicle {
            make: "Kia".to_string(),
            model: "Sonet".to_string(),
            chassis: "KS1".to_string(),
            category: Category::Sub4m,
            year: Some(2024),
            price: Some(900_000.0),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn create_vehicle_returns_store_assigned_id() -> TestResult {
        let mut store = MockDocumentStore::new();

        store
            .expect_insert()
            .once()
            .withf(|collection, document| {
                collection == "cars" && document.get("chassis") == Some(&"KS1".into())
            })
            .return_once(|_, _| Ok("doc-1".to_string()));

        let service = StoreVehiclesService::new(Arc::new(store), "cars");

        let id = service.create_vehicle(new_vehicle()).await?;

        assert_eq!(id, VehicleId::from("doc-1"));

        Ok(())
    }

    #[tokio::test]
    async fn list_vehicles_surfaces_store_failures() {
        let mut store = MockDocumentStore::new();

        store
            .expect_fetch_all()
            .once()
            .return_once(|_| Err(StoreError::Unavailable("offline".to_string())));

        let service = StoreVehiclesService::new(Arc::new(store), "cars");

        let result = service.list_vehicles().await;

        assert!(
            matches!(result, Err(VehiclesError::Store(StoreError::Unavailable(_)))),
            "expected Store error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_unknown_vehicle_returns_not_found() {
        let mut store = MockDocumentStore::new();

        store
            .expect_delete_by_id()
            .once()
            .withf(|collection, id| collection == "cars" && id == "missing")
            .return_once(|_, id| Err(StoreError::NotFound(id.to_string())));

        let service = StoreVehiclesService::new(Arc::new(store), "cars");

        let result = service.delete_vehicle(&VehicleId::from("missing")).await;

        assert!(
            matches!(result, Err(VehiclesError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn chassis_exists_queries_chassis_field() -> TestResult {
        let mut store = MockDocumentStore::new();

        store
            .expect_query_equals()
            .once()
            .withf(|collection, field, value| {
                collection == "cars" && field == "chassis" && value == "AB123"
            })
            .return_once(|_, _, _| Ok(Vec::new()));

        let service = StoreVehiclesService::new(Arc::new(store), "cars");

        assert!(!service.chassis_exists("AB123").await?);

        Ok(())
    }
}
