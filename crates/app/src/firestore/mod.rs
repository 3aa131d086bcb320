//! Firestore REST client implementing [`DocumentStore`].

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use autovault::store::{Document, DocumentStore, StoreError, StoredDocument};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

pub mod errors;
pub mod values;

pub use errors::FirestoreError;

/// Public Firestore REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com/v1";

/// Documents requested per page when scanning a collection.
const PAGE_SIZE: u32 = 300;

/// Configuration for connecting to a Firestore database.
#[derive(Clone)]
pub struct FirestoreConfig {
    /// REST endpoint, e.g. `"https://firestore.googleapis.com/v1"` or an
    /// emulator address such as `"http://localhost:8080/v1"`.
    pub endpoint: String,

    /// Google Cloud project id.
    pub project_id: String,

    /// Database id, normally `"(default)"`.
    pub database: String,

    /// Web API key sent as the `key` query parameter.
    pub api_key: Option<String>,

    /// OAuth2 access token sent as a bearer token.
    pub token: Option<String>,
}

impl Debug for FirestoreConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FirestoreConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("database", &self.database)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl FirestoreConfig {
    /// Resource path under which every collection lives.
    #[must_use]
    pub fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.endpoint.trim_end_matches('/'),
            self.project_id,
            self.database
        )
    }

    #[must_use]
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.documents_url())
    }

    #[must_use]
    pub fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.documents_url())
    }

    #[must_use]
    pub fn run_query_url(&self) -> String {
        format!("{}:runQuery", self.documents_url())
    }
}

/// HTTP client for a single Firestore database.
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    config: FirestoreConfig,
    http: Client,
}

impl FirestoreStore {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: FirestoreConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.http.request(method, url);

        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key)]);
        }

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        request
    }

    async fn list_page(
        &self,
        collection: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ListDocumentsResponse, FirestoreError> {
        let mut request = self
            .request(Method::GET, &self.config.collection_url(collection))
            .query(&[("pageSize", page_size)]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        Ok(send(request).await?.json().await?)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let request = self
            .request(Method::POST, &self.config.collection_url(collection))
            .json(&json!({ "fields": values::encode_fields(&document) }));

        let created: FirestoreDocument = send(request)
            .await?
            .json()
            .await
            .map_err(FirestoreError::from)?;

        Ok(document_id(&created.name)?.to_string())
    }

    async fn fetch_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .list_page(collection, PAGE_SIZE, page_token.as_deref())
                .await?;

            for document in page.documents {
                documents.push(document.into_stored()?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("fetched {} document(s) from {collection}", documents.len());

        Ok(documents)
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let request = self
            .request(Method::POST, &self.config.run_query_url())
            .json(&equality_query(collection, field, &value));

        let results: Vec<RunQueryResponse> = send(request)
            .await?
            .json()
            .await
            .map_err(FirestoreError::from)?;

        let documents = results
            .into_iter()
            .filter_map(|result| result.document)
            .map(FirestoreDocument::into_stored)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(documents)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), StoreError> {
        let mut request = self
            .request(Method::PATCH, &self.config.document_url(collection, id))
            .query(&[("currentDocument.exists", true)]);

        for path in fields.keys() {
            request = request.query(&[("updateMask.fieldPaths", path)]);
        }

        send(request.json(&json!({ "fields": values::encode_fields(&fields) })))
            .await
            .map_err(|error| missing_document(id, error))?;

        Ok(())
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let request = self
            .request(Method::DELETE, &self.config.document_url(collection, id))
            .query(&[("currentDocument.exists", true)]);

        send(request)
            .await
            .map_err(|error| missing_document(id, error))?;

        Ok(())
    }

    async fn ping(&self, collection: &str) -> Result<(), StoreError> {
        self.list_page(collection, 1, None).await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,

    #[serde(default)]
    fields: Map<String, Value>,
}

impl FirestoreDocument {
    /// Fields that cannot be decoded are dropped, so one odd value never
    /// fails a whole scan. Whether the rest still makes a vehicle is up to
    /// the repository.
    fn into_stored(self) -> Result<StoredDocument, FirestoreError> {
        let id = document_id(&self.name)?;
        let mut fields = Document::new();

        for (field, value) in &self.fields {
            match values::decode(value) {
                Ok(decoded) => {
                    fields.insert(field.clone(), decoded);
                }
                Err(error) => warn!("dropping field {field} of document {id}: {error}"),
            }
        }

        Ok(StoredDocument::new(id, fields))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,

    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunQueryResponse {
    document: Option<FirestoreDocument>,
}

async fn send(request: RequestBuilder) -> Result<Response, FirestoreError> {
    let response = request.send().await?;

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    Err(FirestoreError::Status { status, body })
}

fn missing_document(id: &str, error: FirestoreError) -> StoreError {
    match error {
        FirestoreError::Status { status: 404, .. } => StoreError::NotFound(id.to_string()),
        error => StoreError::from(error),
    }
}

/// Last segment of a document resource name.
fn document_id(name: &str) -> Result<&str, FirestoreError> {
    name.rsplit('/')
        .next()
        .filter(|id| !id.is_empty() && *id != name)
        .ok_or_else(|| FirestoreError::DocumentName(name.to_string()))
}

fn equality_query(collection: &str, field: &str, value: &Value) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "EQUAL",
                    "value": values::encode(value)
                }
            }
        }
    })
}
