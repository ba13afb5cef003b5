//! File storage boundary for task and project attachments.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::BackendError;
use crate::storage::{AttachmentOwner, ObjectKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub key: ObjectKey,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[async_trait]
pub trait AttachmentStoragePort: Send + Sync {
    async fn upload(
        &self,
        key: &ObjectKey,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError>;

    async fn download(&self, key: &ObjectKey) -> Result<Vec<u8>, BackendError>;

    async fn list(&self, owner: &AttachmentOwner) -> Result<Vec<StoredObject>, BackendError>;

    async fn remove(&self, key: &ObjectKey) -> Result<(), BackendError>;
}
