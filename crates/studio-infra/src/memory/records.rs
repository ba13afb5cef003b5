//! In-process record store.

use async_trait::async_trait;
use studio_core::ports::RecordRepositoryPort;
use studio_core::query::{paginate, Page, PageRequest};
use studio_core::records::Record;
use studio_core::BackendError;
use tokio::sync::RwLock;

/// Rows kept in insertion order, keyed by `Record::id`.
pub struct InMemoryRecordRepository<R> {
    rows: RwLock<Vec<R>>,
}

impl<R: Record> Default for InMemoryRecordRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> InMemoryRecordRepository<R> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(rows: Vec<R>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl<R: Record> RecordRepositoryPort<R> for InMemoryRecordRepository<R> {
    async fn list(&self, page: Option<PageRequest>) -> Result<Page<R>, BackendError> {
        let rows = self.rows.read().await.clone();
        Ok(match page {
            Some(request) => paginate(rows, request),
            None => Page::whole(rows),
        })
    }

    async fn get(&self, id: &R::Id) -> Result<R, BackendError> {
        self.rows
            .read()
            .await
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn create(&self, record: &R) -> Result<R, BackendError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| row.id() == record.id()) {
            return Err(BackendError::Conflict);
        }
        rows.push(record.clone());
        Ok(record.clone())
    }

    async fn update(&self, record: &R) -> Result<R, BackendError> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|row| row.id() == record.id())
            .ok_or(BackendError::NotFound)?;
        *slot = record.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: &R::Id) -> Result<(), BackendError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }
}
