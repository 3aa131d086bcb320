//! Document Store
//!
//! The catalog never talks to a database directly. Everything goes through a
//! [`DocumentStore`]: a collection-addressed document database that assigns
//! ids on insert and supports full scans and single-field equality queries.

use async_trait::async_trait;
use mockall::automock;
use serde_json::{Map, Value};

pub mod errors;
pub mod memory;

pub use errors::StoreError;
pub use memory::MemoryStore;

/// Field map of a single document.
pub type Document = Map<String, Value>;

/// A document read back from the store together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-assigned document id.
    pub id: String,

    /// Document fields.
    pub fields: Document,
}

impl StoredDocument {
    /// Create a stored document from an id and its fields.
    #[must_use]
    pub fn new(id: impl Into<String>, fields: Document) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Collection-addressed document database.
#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document and returns the id assigned by the store.
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    /// Returns every document in the collection, in store order.
    async fn fetch_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    /// Returns documents whose `field` equals `value`.
    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Merges `fields` into an existing document.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), StoreError>;

    /// Removes a document.
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Cheap readiness probe against the collection.
    async fn ping(&self, collection: &str) -> Result<(), StoreError>;
}
