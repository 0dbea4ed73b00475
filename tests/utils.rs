use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use media_gateway::storage::{BlobStore, ObjectMeta};

#[derive(Clone)]
struct StoredObject {
    data: Vec<u8>,
    content_type: String,
    last_modified: DateTime<Utc>,
}

/// In-memory blob store used to exercise the gateway without a real
/// storage account.
#[derive(Default, Clone)]
pub struct MemoryStore {
    objects: Arc<Mutex<BTreeMap<String, StoredObject>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.objects.lock().unwrap().contains_key(name))
    }

    async fn get(&self, name: &str) -> Result<Option<(Bytes, Option<String>)>> {
        let objects = self.objects.lock().unwrap();
        Ok(objects.get(name).map(|object| {
            (
                Bytes::from(object.data.clone()),
                Some(object.content_type.clone()),
            )
        }))
    }

    async fn put(&self, name: &str, data: Bytes, content_type: &str) -> Result<()> {
        self.objects.lock().unwrap().insert(
            name.to_string(),
            StoredObject {
                data: data.to_vec(),
                content_type: content_type.to_string(),
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        Ok(self.objects.lock().unwrap().remove(name).is_some())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>> {
        let objects = self.objects.lock().unwrap();
        Ok(objects
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, object)| ObjectMeta {
                name: name.clone(),
                size: object.data.len() as u64,
                content_type: Some(object.content_type.clone()),
                last_modified: Some(object.last_modified),
            })
            .collect())
    }
}
