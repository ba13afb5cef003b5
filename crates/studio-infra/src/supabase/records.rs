//! PostgREST-backed record repository.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use studio_core::ports::RecordRepositoryPort;
use studio_core::query::{Page, PageRequest};
use studio_core::records::Record;
use studio_core::BackendError;
use tracing::debug;

use super::client::{map_reqwest_error, map_status_code, parse_content_range, read_json, send};
use super::SupabaseClient;

const RETURN_REPRESENTATION: &str = "return=representation";

/// CRUD over `/rest/v1/{R::TABLE}`.
pub struct SupabaseRecordRepository<R> {
    client: Arc<SupabaseClient>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> SupabaseRecordRepository<R> {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }

    fn table_url(&self) -> String {
        self.client.rest_url(R::TABLE)
    }

    fn id_filter(id: &R::Id) -> [(&'static str, String); 1] {
        [("id", format!("eq.{id}"))]
    }

    fn single(mut rows: Vec<R>) -> Result<R, BackendError> {
        if rows.is_empty() {
            return Err(BackendError::NotFound);
        }
        Ok(rows.swap_remove(0))
    }
}

#[async_trait]
impl<R: Record> RecordRepositoryPort<R> for SupabaseRecordRepository<R> {
    async fn list(&self, page: Option<PageRequest>) -> Result<Page<R>, BackendError> {
        let mut builder = self
            .client
            .request(Method::GET, &self.table_url())
            .query(&[("select", "*")]);

        let Some(request) = page else {
            let response = send(builder).await?;
            let rows: Vec<R> = read_json(response).await?;
            debug!(table = R::TABLE, rows = rows.len(), "listed records");
            return Ok(Page::whole(rows));
        };

        let (from, to) = request.range();
        builder = builder
            .header("Range-Unit", "items")
            .header("Range", format!("{from}-{to}"))
            .header("Prefer", "count=exact");

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);

        // Past the last row: no items, total still reported.
        if status == StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(Page {
                items: Vec::new(),
                total: total.unwrap_or(0),
                page: request.page(),
                page_size: request.page_size(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_code(status, &body));
        }

        let items: Vec<R> = read_json(response).await?;
        let total = total.unwrap_or(request.offset() + items.len() as u64);
        debug!(table = R::TABLE, from, to, total, "listed record page");
        Ok(Page {
            items,
            total,
            page: request.page(),
            page_size: request.page_size(),
        })
    }

    async fn get(&self, id: &R::Id) -> Result<R, BackendError> {
        let builder = self
            .client
            .request(Method::GET, &self.table_url())
            .query(&[("select", "*")])
            .query(&Self::id_filter(id));
        let rows: Vec<R> = read_json(send(builder).await?).await?;
        Self::single(rows)
    }

    async fn create(&self, record: &R) -> Result<R, BackendError> {
        let builder = self
            .client
            .request(Method::POST, &self.table_url())
            .header("Prefer", RETURN_REPRESENTATION)
            .json(record);
        let rows: Vec<R> = read_json(send(builder).await?).await?;
        Self::single(rows).map_err(|_| BackendError::Decode("insert returned no row".into()))
    }

    async fn update(&self, record: &R) -> Result<R, BackendError> {
        let builder = self
            .client
            .request(Method::PATCH, &self.table_url())
            .query(&Self::id_filter(record.id()))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(record);
        let rows: Vec<R> = read_json(send(builder).await?).await?;
        Self::single(rows)
    }

    async fn delete(&self, id: &R::Id) -> Result<(), BackendError> {
        let builder = self
            .client
            .request(Method::DELETE, &self.table_url())
            .query(&Self::id_filter(id))
            .header("Prefer", RETURN_REPRESENTATION);
        let rows: Vec<serde_json::Value> = read_json(send(builder).await?).await?;
        if rows.is_empty() {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }
}
