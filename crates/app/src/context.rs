//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use autovault::{
    bootstrap::{BootstrapError, ReadyPolicy},
    catalog::Catalog,
    store::{DocumentStore, MemoryStore},
};
use thiserror::Error;
use tracing::info;

use crate::{
    config::{StoreKind, store::StoreConfig},
    firestore::{FirestoreConfig, FirestoreStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("the firestore store requires a project id (FIRESTORE_PROJECT_ID)")]
    MissingProjectId,

    #[error(transparent)]
    NotReady(#[from] BootstrapError),
}

/// Document store selected by configuration, plus the collection to use.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn DocumentStore>,
    pub collection: String,
}

impl AppContext {
    /// Build the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`AppInitError::MissingProjectId`] when Firestore is selected
    /// without a project id.
    pub fn from_config(config: &StoreConfig) -> Result<Self, AppInitError> {
        let store: Arc<dyn DocumentStore> = match config.kind {
            StoreKind::Memory => {
                info!("using in-memory document store");

                Arc::new(MemoryStore::new())
            }
            StoreKind::Firestore => {
                let project_id = config
                    .firestore_project_id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .ok_or(AppInitError::MissingProjectId)?;

                info!(
                    "using firestore project {project_id} database {}",
                    config.firestore_database
                );

                Arc::new(FirestoreStore::new(FirestoreConfig {
                    endpoint: config.firestore_endpoint.clone(),
                    project_id,
                    database: config.firestore_database.clone(),
                    api_key: config.firestore_api_key.clone(),
                    token: config.firestore_token.clone(),
                }))
            }
        };

        Ok(Self {
            store,
            collection: config.collection.clone(),
        })
    }

    /// Wait for the store, then build a catalog over the collection.
    ///
    /// # Errors
    ///
    /// Returns [`AppInitError::NotReady`] when the store does not answer
    /// within `policy`.
    pub async fn catalog(&self, policy: ReadyPolicy) -> Result<Catalog, AppInitError> {
        Ok(Catalog::bootstrap(self.store.clone(), &self.collection, policy).await?)
    }
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}
