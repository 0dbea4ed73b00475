use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use secrecy::ExposeSecret;
use tokio::sync::OnceCell;

use crate::config::Settings;
use crate::error::GatewayError;

pub mod s3;

pub use s3::{S3Settings, S3Store};

/// Metadata reported for a stored object
#[derive(Debug, Clone)]
pub struct ObjectMeta {
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Blob-store contract the gateway translates HTTP requests into. Object
/// names are opaque keys and may contain path separators.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Check whether an object exists
    async fn exists(&self, name: &str) -> Result<bool>;

    /// Fetch an object's bytes and its content-type attribute, or `None`
    /// if no such object is stored
    async fn get(&self, name: &str) -> Result<Option<(Bytes, Option<String>)>>;

    /// Store an object, replacing any previous bytes and attributes
    async fn put(&self, name: &str, data: Bytes, content_type: &str) -> Result<()>;

    /// Remove an object. Returns `false` when the store can tell the
    /// object was already absent.
    async fn delete(&self, name: &str) -> Result<bool>;

    /// Enumerate objects whose name starts with `prefix`, in store order
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>>;
}

/// Process-wide handle to the blob store. The client is built from the
/// configured connection string on first use and reused for every later
/// request; a failed construction is reported as a configuration fault
/// and retried on the next request.
pub struct StoreHandle {
    /// `None` when the handle was pre-seeded with a store and never
    /// needs to construct a client
    settings: Option<Settings>,
    cell: OnceCell<Arc<dyn BlobStore>>,
}

impl StoreHandle {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Some(settings),
            cell: OnceCell::new(),
        }
    }

    /// Handle backed by an already-constructed store. Used by tests to
    /// substitute a fake store for the real client.
    pub fn with_store(store: Arc<dyn BlobStore>) -> Self {
        Self {
            settings: None,
            cell: OnceCell::new_with(Some(store)),
        }
    }

    pub async fn get(&self) -> Result<Arc<dyn BlobStore>, GatewayError> {
        let store = self.cell.get_or_try_init(|| self.connect()).await?;
        Ok(Arc::clone(store))
    }

    async fn connect(&self) -> Result<Arc<dyn BlobStore>, GatewayError> {
        let settings = self.settings.as_ref().ok_or(GatewayError::Configuration)?;
        let connection_string = settings
            .storage_connection_string
            .as_ref()
            .ok_or_else(|| {
                tracing::error!("STORAGE_CONNECTION_STRING is not set");
                GatewayError::Configuration
            })?;

        let s3_settings = S3Settings::parse(connection_string.expose_secret()).map_err(|err| {
            tracing::error!("invalid storage connection string: {err:#}");
            GatewayError::Configuration
        })?;

        let store = S3Store::connect(&s3_settings, &settings.media_container)
            .await
            .map_err(|err| {
                tracing::error!("failed to construct storage client: {err:#}");
                GatewayError::Configuration
            })?;

        Ok(Arc::new(store))
    }
}
