//! Storage API adapter for task and project attachments.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Method};
use serde::{Deserialize, Serialize};
use studio_core::ports::{AttachmentStoragePort, StoredObject};
use studio_core::storage::{encode_segment, object_url, AttachmentOwner, ObjectKey, StorageUrlError};
use studio_core::BackendError;
use tracing::{debug, warn};

use super::client::{map_reqwest_error, read_json, send};
use super::SupabaseClient;

const LIST_LIMIT: u32 = 1000;
const FOLDER_PLACEHOLDER: &str = ".emptyFolderPlaceholder";

#[derive(Serialize)]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: u32,
    offset: u32,
    #[serde(rename = "sortBy")]
    sort_by: SortBy,
}

#[derive(Serialize)]
struct SortBy {
    column: &'static str,
    order: &'static str,
}

#[derive(Deserialize)]
struct ListedObject {
    name: String,
    /// Folders come back without an id.
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    metadata: Option<ObjectMetadata>,
}

#[derive(Deserialize)]
struct ObjectMetadata {
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    mimetype: Option<String>,
}

#[derive(Serialize)]
struct RemoveRequest<'a> {
    prefixes: [&'a str; 1],
}

pub struct SupabaseStorage {
    client: Arc<SupabaseClient>,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(client: Arc<SupabaseClient>, bucket: impl Into<String>) -> anyhow::Result<Self> {
        let bucket = bucket.into().trim().to_string();
        if bucket.is_empty() {
            anyhow::bail!(StorageUrlError::MissingBucket);
        }
        Ok(Self { client, bucket })
    }

    fn object_endpoint(&self, key: &ObjectKey) -> Result<String, BackendError> {
        object_url(self.client.base_url(), &self.bucket, key).map_err(|e| BackendError::Rejected {
            status: 400,
            message: e.to_string(),
        })
    }

    fn bucket_endpoint(&self, action: Option<&str>) -> String {
        let bucket = encode_segment(&self.bucket);
        match action {
            Some(action) => self
                .client
                .url(&format!("storage/v1/object/{action}/{bucket}")),
            None => self.client.url(&format!("storage/v1/object/{bucket}")),
        }
    }
}

#[async_trait]
impl AttachmentStoragePort for SupabaseStorage {
    async fn upload(
        &self,
        key: &ObjectKey,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BackendError> {
        let size = bytes.len();
        let builder = self
            .client
            .request(Method::POST, &self.object_endpoint(key)?)
            .header(header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes);
        send(builder).await?;
        debug!(key = %key, size, "attachment uploaded");
        Ok(())
    }

    async fn download(&self, key: &ObjectKey) -> Result<Vec<u8>, BackendError> {
        let builder = self
            .client
            .request(Method::GET, &self.object_endpoint(key)?);
        let response = send(builder).await?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }

    async fn list(&self, owner: &AttachmentOwner) -> Result<Vec<StoredObject>, BackendError> {
        let prefix = owner.prefix();
        let body = ListRequest {
            prefix: prefix.trim_end_matches('/'),
            limit: LIST_LIMIT,
            offset: 0,
            sort_by: SortBy {
                column: "name",
                order: "asc",
            },
        };
        let builder = self
            .client
            .request(Method::POST, &self.bucket_endpoint(Some("list")))
            .json(&body);
        let listed: Vec<ListedObject> = read_json(send(builder).await?).await?;

        let mut objects = Vec::with_capacity(listed.len());
        for entry in listed {
            if entry.id.is_none() || entry.name == FOLDER_PLACEHOLDER {
                continue;
            }
            match ObjectKey::new(owner, &entry.name) {
                Ok(key) => {
                    let metadata = entry.metadata;
                    objects.push(StoredObject {
                        key,
                        size: metadata.as_ref().and_then(|m| m.size),
                        content_type: metadata.and_then(|m| m.mimetype),
                    });
                }
                Err(e) => warn!(name = %entry.name, error = %e, "skipping unlisted object name"),
            }
        }
        Ok(objects)
    }

    async fn remove(&self, key: &ObjectKey) -> Result<(), BackendError> {
        let builder = self
            .client
            .request(Method::DELETE, &self.bucket_endpoint(None))
            .json(&RemoveRequest {
                prefixes: [key.as_str()],
            });
        let removed: Vec<serde_json::Value> = read_json(send(builder).await?).await?;
        if removed.is_empty() {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }
}
