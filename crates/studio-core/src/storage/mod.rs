//! Attachment object keys and public URLs.
//!
//! Attachments live in one storage bucket under
//! `{owner_kind}/{owner_id}/{file_name}`. Public URLs are derived from the
//! configured backend URL alone.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{ProjectId, TaskId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageUrlError {
    #[error("file name is empty")]
    EmptyFileName,
    #[error("invalid file name: {0}")]
    InvalidFileName(String),
    #[error("backend url is not configured")]
    MissingBackendUrl,
    #[error("storage bucket is not configured")]
    MissingBucket,
    #[error("invalid object key: {0}")]
    InvalidKey(String),
}

/// The record an attachment hangs off.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AttachmentOwner {
    Task(TaskId),
    Project(ProjectId),
}

impl AttachmentOwner {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Task(_) => "tasks",
            Self::Project(_) => "projects",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Task(id) => id.as_str(),
            Self::Project(id) => id.as_str(),
        }
    }

    /// Key prefix listing every attachment of this owner.
    pub fn prefix(&self) -> String {
        format!("{}/{}/", self.kind(), self.id())
    }
}

fn check_segment(segment: &str) -> Result<(), StorageUrlError> {
    if segment.trim().is_empty() {
        return Err(StorageUrlError::EmptyFileName);
    }
    if segment.contains(['/', '\\']) || segment == "." || segment == ".." {
        return Err(StorageUrlError::InvalidFileName(segment.to_string()));
    }
    Ok(())
}

/// A validated `{owner_kind}/{owner_id}/{file_name}` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new(owner: &AttachmentOwner, file_name: &str) -> Result<Self, StorageUrlError> {
        check_segment(file_name)?;
        check_segment(owner.id())
            .map_err(|_| StorageUrlError::InvalidKey(owner.id().to_string()))?;
        Ok(Self(format!("{}{}", owner.prefix(), file_name)))
    }

    /// Accept a key as stored on a record (e.g. `Product::image_path`).
    pub fn parse(raw: &str) -> Result<Self, StorageUrlError> {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() || trimmed.split('/').any(|s| s.is_empty() || s == "..") {
            return Err(StorageUrlError::InvalidKey(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Percent-encode one path segment (RFC 3986 unreserved characters pass through).
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn encode_key(key: &ObjectKey) -> String {
    key.as_str()
        .split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// `{backend_url}/storage/v1/object/public/{bucket}/{key}`
pub fn public_url(
    backend_url: &str,
    bucket: &str,
    key: &ObjectKey,
) -> Result<String, StorageUrlError> {
    let base = backend_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(StorageUrlError::MissingBackendUrl);
    }
    let bucket = bucket.trim();
    if bucket.is_empty() {
        return Err(StorageUrlError::MissingBucket);
    }
    Ok(format!(
        "{base}/storage/v1/object/public/{}/{}",
        encode_segment(bucket),
        encode_key(key)
    ))
}

/// Authenticated object endpoint used for upload, download and removal.
pub fn object_url(
    backend_url: &str,
    bucket: &str,
    key: &ObjectKey,
) -> Result<String, StorageUrlError> {
    let base = backend_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(StorageUrlError::MissingBackendUrl);
    }
    if bucket.trim().is_empty() {
        return Err(StorageUrlError::MissingBucket);
    }
    Ok(format!(
        "{base}/storage/v1/object/{}/{}",
        encode_segment(bucket.trim()),
        encode_key(key)
    ))
}

/// An attachment as listed for a task or project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub key: ObjectKey,
    pub file_name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
    pub public_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_owner() -> AttachmentOwner {
        AttachmentOwner::Task(TaskId::new("t-42"))
    }

    #[test]
    fn builds_owner_scoped_keys() {
        let key = ObjectKey::new(&task_owner(), "floor plan.pdf").unwrap();
        assert_eq!(key.as_str(), "tasks/t-42/floor plan.pdf");
        assert_eq!(key.file_name(), "floor plan.pdf");

        let project = AttachmentOwner::Project(ProjectId::new("p-7"));
        assert_eq!(project.prefix(), "projects/p-7/");
    }

    #[test]
    fn rejects_empty_and_path_like_file_names() {
        assert_eq!(ObjectKey::new(&task_owner(), ""), Err(StorageUrlError::EmptyFileName));
        assert_eq!(ObjectKey::new(&task_owner(), "  "), Err(StorageUrlError::EmptyFileName));
        assert!(matches!(
            ObjectKey::new(&task_owner(), "a/b.png"),
            Err(StorageUrlError::InvalidFileName(_))
        ));
        assert!(ObjectKey::new(&task_owner(), "..").is_err());
        assert!(matches!(
            ObjectKey::new(&AttachmentOwner::Task(TaskId::new("x/y")), "a.png"),
            Err(StorageUrlError::InvalidKey(_))
        ));
    }

    #[test]
    fn public_url_encodes_each_segment() {
        let key = ObjectKey::new(&task_owner(), "Living room #2 (v3).jpg").unwrap();
        let url = public_url("https://abc.supabase.co/", "attachments", &key).unwrap();
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/object/public/attachments/tasks/t-42/Living%20room%20%232%20%28v3%29.jpg"
        );
    }

    #[test]
    fn public_url_requires_configuration() {
        let key = ObjectKey::new(&task_owner(), "a.png").unwrap();
        assert_eq!(
            public_url("", "attachments", &key),
            Err(StorageUrlError::MissingBackendUrl)
        );
        assert_eq!(
            public_url("https://abc.supabase.co", " ", &key),
            Err(StorageUrlError::MissingBucket)
        );
    }

    #[test]
    fn parses_stored_keys() {
        assert_eq!(
            ObjectKey::parse("/products/p1/chair.png").unwrap().as_str(),
            "products/p1/chair.png"
        );
        assert!(ObjectKey::parse("a//b").is_err());
        assert!(ObjectKey::parse("../secret").is_err());
        assert!(ObjectKey::parse("").is_err());
    }

    #[test]
    fn utf8_is_percent_encoded_bytewise() {
        assert_eq!(encode_segment("café"), "caf%C3%A9");
    }
}
