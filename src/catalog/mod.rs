//! Catalog Controller
//!
//! Owns the in-memory snapshot of the vehicle collection together with the
//! filter state, and mediates every mutation against the [`VehiclesService`].
//! The snapshot is never patched: after each confirmed write the controller
//! re-reads the whole collection.
//!
//! Handlers take `&mut self`, so one controller processes one event at a
//! time. A surface that wants overlapping mutations has to run several
//! controllers, in which case the last synchronization to finish wins.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use jiff::Timestamp;
use tracing::{debug, error, info};

use crate::{
    bootstrap::{BootstrapError, ReadyPolicy, wait_until_ready},
    catalog::{
        errors::WriteOperation,
        filter::FilterState,
        render::{CardGrid, StatisticsPanel},
        statistics::Statistics,
        surface::{
            ADD_FAILED, DUPLICATE_CHASSIS, INVALID_CATEGORY, LOAD_ERROR, REMOVE_FAILED,
            REMOVE_PROMPT, Surface, UPDATE_FAILED, VEHICLE_ADDED, VEHICLE_REMOVED,
            VEHICLE_UPDATED,
        },
    },
    store::DocumentStore,
    vehicles::{
        StoreVehiclesService, VehiclesError, VehiclesService,
        form::{EditForm, VehicleForm},
        records::{CategoryFilter, Vehicle, VehicleId},
    },
};

pub mod errors;
pub mod events;
pub mod filter;
pub mod render;
pub mod statistics;
pub mod surface;

pub use errors::CatalogError;
pub use events::Event;

/// Vehicle catalog controller.
pub struct Catalog {
    vehicles: Arc<dyn VehiclesService>,
    snapshot: Vec<Vehicle>,
    filter: FilterState,
    statistics: Statistics,
}

impl Catalog {
    /// Create a controller with an empty snapshot. Call
    /// [`Catalog::synchronize`] to load the collection.
    #[must_use]
    pub fn new(vehicles: Arc<dyn VehiclesService>) -> Self {
        Self {
            vehicles,
            snapshot: Vec::new(),
            filter: FilterState::default(),
            statistics: Statistics::default(),
        }
    }

    /// Create a controller over `collection` in `store`.
    #[must_use]
    pub fn with_store(store: Arc<dyn DocumentStore>, collection: &str) -> Self {
        Self::new(Arc::new(StoreVehiclesService::new(store, collection)))
    }

    /// Wait for `store` to answer, then build a controller over `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::NotReady`] when the store never becomes
    /// ready within `policy`.
    pub async fn bootstrap(
        store: Arc<dyn DocumentStore>,
        collection: &str,
        policy: ReadyPolicy,
    ) -> Result<Self, BootstrapError> {
        let attempts = wait_until_ready(store.as_ref(), collection, policy).await?;

        info!("document store ready after {attempts} attempt(s)");

        Ok(Self::with_store(store, collection))
    }

    /// Full snapshot from the last successful synchronization.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.snapshot
    }

    /// Statistics over the full snapshot.
    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Current category filter and search term.
    #[must_use]
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Vehicles passing the current filter and search term.
    #[must_use]
    pub fn visible(&self) -> Vec<&Vehicle> {
        self.filter.apply(&self.snapshot)
    }

    /// Dispatch a surface event to its handler.
    ///
    /// Failures have already been logged and shown on `surface` by the time
    /// they are returned here.
    ///
    /// # Errors
    ///
    /// Returns the handler's [`CatalogError`].
    pub async fn handle(
        &mut self,
        event: Event,
        surface: &mut dyn Surface,
    ) -> Result<(), CatalogError> {
        match event {
            Event::Submit(form) => self.create(&form, surface).await.map(drop),
            Event::SubmitEdit(form) => self.update(&form, surface).await,
            Event::OpenEdit(id) => {
                self.open_edit(&id, surface);
                Ok(())
            }
            Event::CloseEdit => {
                surface.close_edit();
                Ok(())
            }
            Event::Delete(id) => self.delete(&id, surface).await.map(drop),
            Event::Filter(filter) => {
                self.set_filter(filter, surface);
                Ok(())
            }
            Event::Search(term) => {
                self.set_search(term, surface);
                Ok(())
            }
            Event::Refresh => self.synchronize(surface).await.map(drop),
        }
    }

    /// Replace the snapshot with a full read, then re-derive statistics and
    /// the visible cards. Returns the number of vehicles loaded.
    ///
    /// On failure the previous snapshot is kept and the card grid is replaced
    /// by an inline error.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Read`] when the store read fails.
    pub async fn synchronize(&mut self, surface: &mut dyn Surface) -> Result<usize, CatalogError> {
        let vehicles = match self.vehicles.list_vehicles().await {
            Ok(vehicles) => vehicles,
            Err(source) => {
                error!("failed to fetch vehicles: {source}");
                surface.render_error(LOAD_ERROR);

                return Err(CatalogError::Read(source));
            }
        };

        self.snapshot = vehicles;
        self.statistics = Statistics::from_vehicles(&self.snapshot);

        info!("synchronized {} vehicle(s)", self.snapshot.len());

        surface.render_statistics(&StatisticsPanel::from(&self.statistics));
        self.render(surface);

        Ok(self.snapshot.len())
    }

    /// Insert a vehicle from the create form, refusing duplicate chassis
    /// numbers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidForm`] for an unknown category,
    /// [`CatalogError::DuplicateChassis`] when the chassis is taken, and
    /// [`CatalogError::Write`] when the uniqueness query or insert fails.
    pub async fn create(
        &mut self,
        form: &VehicleForm,
        surface: &mut dyn Surface,
    ) -> Result<VehicleId, CatalogError> {
        let vehicle = form.normalize(Timestamp::now()).map_err(|error| {
            surface.notify(INVALID_CATEGORY);
            CatalogError::InvalidForm(error)
        })?;

        let exists = self
            .vehicles
            .chassis_exists(&vehicle.chassis)
            .await
            .map_err(|source| write_failed(WriteOperation::Add, source, surface))?;

        if exists {
            info!("rejected duplicate chassis {}", vehicle.chassis);
            surface.notify(DUPLICATE_CHASSIS);

            return Err(CatalogError::DuplicateChassis(vehicle.chassis));
        }

        let id = self
            .vehicles
            .create_vehicle(vehicle)
            .await
            .map_err(|source| write_failed(WriteOperation::Add, source, surface))?;

        info!("created vehicle {id}");

        surface.notify(VEHICLE_ADDED);
        surface.reset_create_form();
        self.resynchronize(surface).await;

        Ok(id)
    }

    /// Write the edit form back to its vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidForm`] for an unknown category and
    /// [`CatalogError::Write`] when the store write fails.
    pub async fn update(
        &mut self,
        form: &EditForm,
        surface: &mut dyn Surface,
    ) -> Result<(), CatalogError> {
        let update = form.normalize(Timestamp::now()).map_err(|error| {
            surface.notify(INVALID_CATEGORY);
            CatalogError::InvalidForm(error)
        })?;

        self.vehicles
            .update_vehicle(&form.id, update)
            .await
            .map_err(|source| write_failed(WriteOperation::Update, source, surface))?;

        info!("updated vehicle {}", form.id);

        surface.notify(VEHICLE_UPDATED);
        surface.close_edit();
        self.resynchronize(surface).await;

        Ok(())
    }

    /// Delete a vehicle after the user confirms. Returns `false` when the
    /// user declines, in which case nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Write`] when the store delete fails.
    pub async fn delete(
        &mut self,
        id: &VehicleId,
        surface: &mut dyn Surface,
    ) -> Result<bool, CatalogError> {
        if !surface.confirm(REMOVE_PROMPT).await {
            debug!("removal of vehicle {id} declined");

            return Ok(false);
        }

        self.vehicles
            .delete_vehicle(id)
            .await
            .map_err(|source| write_failed(WriteOperation::Remove, source, surface))?;

        info!("removed vehicle {id}");

        surface.notify(VEHICLE_REMOVED);
        self.resynchronize(surface).await;

        Ok(true)
    }

    /// Open the edit surface for a loaded vehicle. Unknown ids are ignored.
    pub fn open_edit(&self, id: &VehicleId, surface: &mut dyn Surface) -> bool {
        let Some(vehicle) = self.snapshot.iter().find(|vehicle| &vehicle.id == id) else {
            debug!("edit requested for unloaded vehicle {id}");

            return false;
        };

        surface.open_edit(EditForm::from_vehicle(vehicle));

        true
    }

    /// Select a category and re-render.
    pub fn set_filter(&mut self, filter: CategoryFilter, surface: &mut dyn Surface) {
        self.filter.category = filter;
        self.render(surface);
    }

    /// Change the search term and re-render.
    pub fn set_search(&mut self, term: impl Into<String>, surface: &mut dyn Surface) {
        self.filter.search = term.into();
        self.render(surface);
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.render_cards(&CardGrid::from_vehicles(&self.visible()));
    }

    async fn resynchronize(&mut self, surface: &mut dyn Surface) {
        if let Err(error) = self.synchronize(surface).await {
            debug!("synchronization after write failed: {error}");
        }
    }
}

impl Debug for Catalog {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Catalog")
            .field("snapshot", &self.snapshot.len())
            .field("filter", &self.filter)
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}

fn write_failed(
    operation: WriteOperation,
    source: VehiclesError,
    surface: &mut dyn Surface,
) -> CatalogError {
    error!("failed to {operation} vehicle: {source}");

    surface.notify(match operation {
        WriteOperation::Add => ADD_FAILED,
        WriteOperation::Update => UPDATE_FAILED,
        WriteOperation::Remove => REMOVE_FAILED,
    });

    CatalogError::Write { operation, source }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        catalog::surface::{Notice, Severity},
        store::StoreError,
        test::{RecordingSurface, Rendered, TestContext, form, vehicle},
        vehicles::{MockVehiclesService, records::Category},
    };

    use super::*;

    #[tokio::test]
    async fn synchronize_loads_snapshot_and_renders() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.seed(form("Tata", "Harrier", "TH1", "SUV", "2023", "2100000"))
            .await?;
        ctx.seed(form("Honda", "City", "HC1", "Sedan", "2022", "1200000"))
            .await?;

        let loaded = ctx.catalog.synchronize(&mut ctx.surface).await?;

        assert_eq!(loaded, 2);
        assert_eq!(ctx.catalog.statistics().total, 2);
        assert_eq!(
            ctx.surface.statistics.as_ref().map(|panel| panel.total_value.as_str()),
            Some("₹33,00,000")
        );
        assert_eq!(ctx.surface.count_label(), Some("2 VEHICLES AVAILABLE"));

        Ok(())
    }

    #[tokio::test]
    async fn synchronize_failure_keeps_stale_snapshot() -> TestResult {
        let mut service = MockVehiclesService::new();
        let mut calls = 0;

        service.expect_list_vehicles().times(2).returning(move || {
            calls += 1;

            if calls == 1 {
                Ok(vec![vehicle("1", "Kia", "Carens", "KC1", Category::Suv, 1.0)])
            } else {
                Err(VehiclesError::Store(StoreError::Unavailable(
                    "offline".to_string(),
                )))
            }
        });

        let mut catalog = Catalog::new(Arc::new(service));
        let mut surface = RecordingSurface::default();

        catalog.synchronize(&mut surface).await?;

        let result = catalog.synchronize(&mut surface).await;

        assert!(
            matches!(result, Err(CatalogError::Read(_))),
            "expected Read error, got {result:?}"
        );
        assert_eq!(catalog.vehicles().len(), 1, "snapshot is left stale");
        assert_eq!(
            surface.grid,
            Some(Rendered::Error(LOAD_ERROR.to_string())),
            "grid replaced by inline error"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_inserts_and_resynchronizes() -> TestResult {
        let mut ctx = TestContext::new();

        let id = ctx
            .catalog
            .create(
                &form(" Maruti ", "Brezza", " mb001 ", "Sub4m", "2024", "1100000"),
                &mut ctx.surface,
            )
            .await?;

        let vehicle = ctx.catalog.vehicles().first().ok_or("vehicle missing")?;

        assert_eq!(vehicle.id, id);
        assert_eq!(vehicle.make, "Maruti");
        assert_eq!(vehicle.chassis, "MB001");
        assert!(vehicle.created_at.is_some());
        assert!(vehicle.updated_at.is_none());
        assert_eq!(ctx.surface.notices, vec![VEHICLE_ADDED]);
        assert_eq!(ctx.surface.form_resets, 1);
        assert_eq!(ctx.surface.count_label(), Some("1 VEHICLE AVAILABLE"));

        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_duplicate_chassis_case_insensitively() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.seed(form("Tata", "Altroz", "AB123", "Hatchback", "2021", "800000"))
            .await?;

        let result = ctx
            .catalog
            .create(
                &form("Tata", "Tiago", "ab123", "Hatchback", "2022", "600000"),
                &mut ctx.surface,
            )
            .await;

        assert!(
            matches!(&result, Err(CatalogError::DuplicateChassis(chassis)) if chassis == "AB123"),
            "expected DuplicateChassis, got {result:?}"
        );
        assert_eq!(ctx.stored().await, 1, "store is unchanged");
        assert_eq!(ctx.surface.notices, vec![DUPLICATE_CHASSIS]);
        assert_eq!(ctx.surface.form_resets, 0);

        Ok(())
    }

    #[tokio::test]
    async fn create_with_unknown_category_writes_nothing() -> TestResult {
        let mut ctx = TestContext::new();

        let result = ctx
            .catalog
            .create(
                &form("Tata", "Sierra", "TS1", "Coupe", "2025", "1"),
                &mut ctx.surface,
            )
            .await;

        assert!(
            matches!(result, Err(CatalogError::InvalidForm(_))),
            "expected InvalidForm, got {result:?}"
        );
        assert_eq!(ctx.stored().await, 0);
        assert_eq!(ctx.surface.notices, vec![INVALID_CATEGORY]);

        Ok(())
    }

    #[tokio::test]
    async fn create_insert_failure_notifies_and_skips_refresh() {
        let mut service = MockVehiclesService::new();

        service
            .expect_chassis_exists()
            .once()
            .withf(|chassis| chassis == "KS1")
            .return_once(|_| Ok(false));

        service.expect_create_vehicle().once().return_once(|_| {
            Err(VehiclesError::Store(StoreError::PermissionDenied(
                "read only".to_string(),
            )))
        });

        service.expect_list_vehicles().never();

        let mut catalog = Catalog::new(Arc::new(service));
        let mut surface = RecordingSurface::default();

        let result = catalog
            .create(
                &form("Kia", "Sonet", "ks1", "Sub4m", "2024", "900000"),
                &mut surface,
            )
            .await;

        assert!(
            matches!(
                result,
                Err(CatalogError::Write {
                    operation: WriteOperation::Add,
                    ..
                })
            ),
            "expected Write error, got {result:?}"
        );
        assert_eq!(surface.notices, vec![ADD_FAILED]);
        assert_eq!(
            surface.notices.first().map(|notice| notice.message),
            Some("Failed to add vehicle. Check logs for details.")
        );
    }

    #[tokio::test]
    async fn create_uniqueness_query_failure_is_a_write_failure() {
        let mut service = MockVehiclesService::new();

        service.expect_chassis_exists().once().return_once(|_| {
            Err(VehiclesError::Store(StoreError::Unavailable(
                "offline".to_string(),
            )))
        });

        service.expect_create_vehicle().never();

        let mut catalog = Catalog::new(Arc::new(service));
        let mut surface = RecordingSurface::default();

        let result = catalog
            .create(
                &form("Kia", "Sonet", "KS1", "Sub4m", "2024", "900000"),
                &mut surface,
            )
            .await;

        assert!(
            matches!(result, Err(CatalogError::Write { .. })),
            "expected Write error, got {result:?}"
        );
        assert_eq!(
            surface.notices.first().map(|notice: &Notice| notice.severity),
            Some(Severity::Error)
        );
    }

    #[tokio::test]
    async fn update_writes_fields_and_closes_edit() -> TestResult {
        let mut ctx = TestContext::new();

        let id = ctx
            .seed(form("Hyundai", "i20", "HI20", "Hatchback", "2020", "700000"))
            .await?;

        ctx.catalog.synchronize(&mut ctx.surface).await?;

        assert!(ctx.catalog.open_edit(&id, &mut ctx.surface));

        let mut edit = ctx.surface.edit.clone().ok_or("edit surface not opened")?;

        edit.model = " i20 N Line ".to_string();
        edit.price = "950000".to_string();

        ctx.catalog.update(&edit, &mut ctx.surface).await?;

        let vehicle = ctx.catalog.vehicles().first().ok_or("vehicle missing")?;

        assert_eq!(vehicle.model, "i20 N Line");
        assert_eq!(vehicle.price, Some(950_000.0));
        assert_eq!(vehicle.chassis, "HI20");
        assert!(vehicle.updated_at.is_some());
        assert!(ctx.surface.edit.is_none(), "edit surface closed");
        assert_eq!(ctx.surface.notices, vec![VEHICLE_UPDATED]);

        Ok(())
    }

    #[tokio::test]
    async fn update_failure_keeps_edit_open() {
        let mut service = MockVehiclesService::new();

        service
            .expect_update_vehicle()
            .once()
            .withf(|id, update| id.as_str() == "gone" && update.model == "Venue")
            .return_once(|_, _| Err(VehiclesError::NotFound));

        service.expect_list_vehicles().never();

        let mut catalog = Catalog::new(Arc::new(service));
        let mut surface = RecordingSurface::default();

        let edit = EditForm {
            id: VehicleId::from("gone"),
            make: "Hyundai".to_string(),
            model: "Venue".to_string(),
            chassis: "HV1".to_string(),
            category: "Sub4m".to_string(),
            year: "2022".to_string(),
            price: "1000000".to_string(),
        };

        surface.open_edit(edit.clone());

        let result = catalog.update(&edit, &mut surface).await;

        assert!(
            matches!(
                result,
                Err(CatalogError::Write {
                    operation: WriteOperation::Update,
                    source: VehiclesError::NotFound,
                })
            ),
            "expected Write/NotFound, got {result:?}"
        );
        assert_eq!(surface.notices, vec![UPDATE_FAILED]);
        assert!(surface.edit.is_some(), "edit surface stays open on failure");
    }

    #[tokio::test]
    async fn delete_confirmed_removes_vehicle() -> TestResult {
        let mut ctx = TestContext::new();

        let keep = ctx
            .seed(form("Skoda", "Slavia", "SS1", "Sedan", "2023", "1500000"))
            .await?;
        let drop = ctx
            .seed(form("Skoda", "Kushaq", "SK1", "SUV", "2023", "1600000"))
            .await?;

        ctx.catalog.synchronize(&mut ctx.surface).await?;
        ctx.surface.confirm_answers.push_back(true);

        assert!(ctx.catalog.delete(&drop, &mut ctx.surface).await?);

        let ids: Vec<&VehicleId> = ctx.catalog.vehicles().iter().map(|v| &v.id).collect();

        assert_eq!(ids, vec![&keep]);
        assert_eq!(ctx.stored().await, 1);
        assert_eq!(ctx.surface.prompts, vec![REMOVE_PROMPT.to_string()]);
        assert_eq!(ctx.surface.notices, vec![VEHICLE_REMOVED]);

        Ok(())
    }

    #[tokio::test]
    async fn delete_declined_changes_nothing() -> TestResult {
        let mut ctx = TestContext::new();

        let id = ctx
            .seed(form("Skoda", "Slavia", "SS1", "Sedan", "2023", "1500000"))
            .await?;

        ctx.surface.confirm_answers.push_back(false);

        assert!(!ctx.catalog.delete(&id, &mut ctx.surface).await?);
        assert_eq!(ctx.stored().await, 1);
        assert!(ctx.surface.notices.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn delete_failure_notifies() {
        let mut service = MockVehiclesService::new();

        service
            .expect_delete_vehicle()
            .once()
            .return_once(|_| Err(VehiclesError::NotFound));

        let mut catalog = Catalog::new(Arc::new(service));
        let mut surface = RecordingSurface::default();

        surface.confirm_answers.push_back(true);

        let result = catalog.delete(&VehicleId::from("x"), &mut surface).await;

        assert!(
            matches!(
                result,
                Err(CatalogError::Write {
                    operation: WriteOperation::Remove,
                    ..
                })
            ),
            "expected Write error, got {result:?}"
        );
        assert_eq!(surface.notices, vec![REMOVE_FAILED]);
    }

    #[test]
    fn open_edit_for_unknown_id_does_nothing() {
        let ctx = TestContext::new();
        let mut surface = RecordingSurface::default();

        assert!(!ctx.catalog.open_edit(&VehicleId::from("nope"), &mut surface));
        assert!(surface.edit.is_none());
    }

    #[tokio::test]
    async fn filter_and_search_rerender_without_touching_statistics() -> TestResult {
        let mut ctx = TestContext::new();

        for (make, model, chassis, category) in [
            ("Tata", "Safari", "S1", "SUV"),
            ("Tata", "Harrier", "S2", "SUV"),
            ("Kia", "Seltos", "S3", "SUV"),
            ("Honda", "City", "D1", "Sedan"),
            ("Skoda", "Slavia", "D2", "Sedan"),
        ] {
            ctx.seed(form(make, model, chassis, category, "2023", "1000000"))
                .await?;
        }

        ctx.catalog.synchronize(&mut ctx.surface).await?;

        let statistics = *ctx.catalog.statistics();

        ctx.catalog
            .handle(
                Event::Filter(CategoryFilter::Only(Category::Suv)),
                &mut ctx.surface,
            )
            .await?;

        assert_eq!(ctx.catalog.visible().len(), 3);
        assert_eq!(ctx.surface.count_label(), Some("3 VEHICLES AVAILABLE"));

        ctx.catalog
            .handle(Event::Search("tata".to_string()), &mut ctx.surface)
            .await?;

        assert_eq!(ctx.surface.count_label(), Some("2 VEHICLES AVAILABLE"));

        ctx.catalog
            .handle(Event::Search("zzz".to_string()), &mut ctx.surface)
            .await?;

        assert_eq!(ctx.surface.count_label(), Some("0 VEHICLES AVAILABLE"));
        assert_eq!(ctx.surface.placeholder(), Some(render::PLACEHOLDER));
        assert_eq!(*ctx.catalog.statistics(), statistics);
        assert_eq!(ctx.catalog.statistics().total, 5);

        Ok(())
    }

    #[tokio::test]
    async fn card_actions_round_trip_through_events() -> TestResult {
        let mut ctx = TestContext::new();

        ctx.seed(form("Mahindra", "Thar", "MT1", "SUV", "2024", "1700000"))
            .await?;
        ctx.catalog.synchronize(&mut ctx.surface).await?;

        let [edit, remove] = ctx
            .surface
            .cards()
            .first()
            .map(|card| card.actions.clone())
            .ok_or("card missing")?;

        ctx.catalog
            .handle(Event::from(edit), &mut ctx.surface)
            .await?;

        assert!(ctx.surface.edit.is_some());

        ctx.catalog.handle(Event::CloseEdit, &mut ctx.surface).await?;

        assert!(ctx.surface.edit.is_none());

        ctx.surface.confirm_answers.push_back(true);
        ctx.catalog
            .handle(Event::from(remove), &mut ctx.surface)
            .await?;

        assert!(ctx.catalog.vehicles().is_empty());
        assert_eq!(ctx.stored().await, 0);

        Ok(())
    }
}
