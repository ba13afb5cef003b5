use std::collections::BTreeMap;

use async_trait::async_trait;
use studio_core::ports::{AttachmentStoragePort, StoredObject};
use studio_core::storage::{AttachmentOwner, ObjectKey};
use studio_core::BackendError;
use tokio::sync::RwLock;

struct Blob {
    bytes: Vec<u8>,
    content_type: String,
}

/// Attachment blobs kept in memory, ordered by key.
#[derive(Default)]
pub struct InMemoryStorage {
    objects: RwLock<BTreeMap<String, Blob>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttachmentStoragePort for InMemoryStorage {
    async fn upload(
        &self,
        key: &ObjectKey,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        self.objects.write().await.insert(
            key.as_str().to_string(),
            Blob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn download(&self, key: &ObjectKey) -> Result<Vec<u8>, BackendError> {
        self.objects
            .read()
            .await
            .get(key.as_str())
            .map(|blob| blob.bytes.clone())
            .ok_or(BackendError::NotFound)
    }

    async fn list(&self, owner: &AttachmentOwner) -> Result<Vec<StoredObject>, BackendError> {
        let prefix = owner.prefix();
        let objects = self.objects.read().await;
        objects
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(key, blob)| {
                let key = ObjectKey::parse(key)
                    .map_err(|e| BackendError::Decode(e.to_string()))?;
                Ok(StoredObject {
                    key,
                    size: Some(blob.bytes.len() as u64),
                    content_type: Some(blob.content_type.clone()),
                })
            })
            .collect()
    }

    async fn remove(&self, key: &ObjectKey) -> Result<(), BackendError> {
        self.objects
            .write()
            .await
            .remove(key.as_str())
            .map(|_| ())
            .ok_or(BackendError::NotFound)
    }
}
