//! Backend data boundary: read-list, read-by-id, create, update, delete.

use async_trait::async_trait;
use thiserror::Error;

use crate::query::{Page, PageRequest};
use crate::records::Record;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("record not found")]
    NotFound,
    #[error("not authorized")]
    Unauthorized,
    #[error("record conflicts with existing data")]
    Conflict,
    #[error("backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            404 | 406 => Self::NotFound,
            409 => Self::Conflict,
            _ => Self::Rejected {
                status,
                message: message.into(),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// CRUD over one backend table.
#[async_trait]
pub trait RecordRepositoryPort<R: Record>: Send + Sync {
    /// List rows; `page` asks for one server-side range instead of the whole table.
    async fn list(&self, page: Option<PageRequest>) -> Result<Page<R>, BackendError>;

    async fn get(&self, id: &R::Id) -> Result<R, BackendError>;

    async fn create(&self, record: &R) -> Result<R, BackendError>;

    async fn update(&self, record: &R) -> Result<R, BackendError>;

    async fn delete(&self, id: &R::Id) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_http_statuses() {
        assert_eq!(BackendError::from_status(401, ""), BackendError::Unauthorized);
        assert_eq!(BackendError::from_status(403, ""), BackendError::Unauthorized);
        assert!(BackendError::from_status(404, "").is_not_found());
        assert_eq!(BackendError::from_status(409, "dup"), BackendError::Conflict);
        assert_eq!(
            BackendError::from_status(422, "bad email"),
            BackendError::Rejected {
                status: 422,
                message: "bad email".into()
            }
        );
    }
}
