//! Store Config

use clap::Args;

use crate::firestore::DEFAULT_ENDPOINT;

/// Backing document store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreKind {
    /// In-process store; contents are lost on exit.
    Memory,

    /// Cloud Firestore over its REST API.
    Firestore,
}

/// Document store settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Document store backend (memory, firestore)
    #[arg(long = "store", env = "AUTOVAULT_STORE", value_enum, default_value_t = StoreKind::Memory)]
    pub kind: StoreKind,

    /// Collection holding vehicle documents
    #[arg(long, env = "AUTOVAULT_COLLECTION", default_value = "cars")]
    pub collection: String,

    /// Firestore project id
    #[arg(long, env = "FIRESTORE_PROJECT_ID")]
    pub firestore_project_id: Option<String>,

    /// Firestore database id
    #[arg(long, env = "FIRESTORE_DATABASE", default_value = "(default)")]
    pub firestore_database: String,

    /// Firestore REST endpoint
    #[arg(long, env = "FIRESTORE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub firestore_endpoint: String,

    /// Firestore web API key
    #[arg(long, env = "FIRESTORE_API_KEY", hide_env_values = true)]
    pub firestore_api_key: Option<String>,

    /// Firestore OAuth2 access token
    #[arg(long, env = "FIRESTORE_TOKEN", hide_env_values = true)]
    pub firestore_token: Option<String>,
}
