//! List and mutate backend records.
//!
//! Reads resolve into a [`ListView`] the screen renders; mutation failures are
//! surfaced as an error toast and returned. Nothing is retried.

use std::sync::Arc;

use tracing::{info_span, warn, Instrument};

use studio_core::notification::Toast;
use studio_core::ports::{BackendError, NotificationPort, RecordRepositoryPort};
use studio_core::query::{HasStatus, ListQuery, ListView, Page, PageRequest, Searchable, Sortable};
use studio_core::records::Record;

/// Fetches a table and runs the list screen's search/sort/page over it.
pub struct ListRecords<R: Record> {
    repo: Arc<dyn RecordRepositoryPort<R>>,
}

impl<R: Record> ListRecords<R> {
    pub fn from_ports(repo: Arc<dyn RecordRepositoryPort<R>>) -> Self {
        Self { repo }
    }

    pub async fn fetch_all(&self) -> Result<Vec<R>, BackendError> {
        let span = info_span!("usecase.list_records.fetch_all", table = R::TABLE);
        async {
            let page = self.repo.list(None).await.inspect_err(|err| {
                warn!(error = %err, "list fetch failed");
            })?;
            Ok(page.items)
        }
        .instrument(span)
        .await
    }

    /// One server-side page (the product grid).
    pub async fn fetch_page(&self, request: PageRequest) -> Result<Page<R>, BackendError> {
        let span = info_span!(
            "usecase.list_records.fetch_page",
            table = R::TABLE,
            page = request.page(),
            page_size = request.page_size()
        );
        self.repo.list(Some(request)).instrument(span).await
    }

    pub async fn get(&self, id: &R::Id) -> Result<R, BackendError> {
        self.repo.get(id).await
    }

    pub async fn execute<K, S>(&self, query: &ListQuery<K, S>) -> ListView<R>
    where
        K: Copy,
        R: Searchable + Sortable<SortKey = K>,
    {
        query.resolve(self.fetch_all().await)
    }

    pub async fn execute_with_status<K, S>(&self, query: &ListQuery<K, S>) -> ListView<R>
    where
        K: Copy,
        S: Copy + PartialEq,
        R: Searchable + Sortable<SortKey = K> + HasStatus<Status = S>,
    {
        query.resolve_with_status(self.fetch_all().await)
    }

    pub async fn execute_page(&self, request: PageRequest) -> ListView<R> {
        ListView::from_page(self.fetch_page(request).await)
    }
}

/// Create, update and delete with toast feedback.
pub struct MutateRecord<R: Record> {
    repo: Arc<dyn RecordRepositoryPort<R>>,
    notifier: Arc<dyn NotificationPort>,
}

impl<R: Record> MutateRecord<R> {
    pub fn from_ports(
        repo: Arc<dyn RecordRepositoryPort<R>>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self { repo, notifier }
    }

    pub async fn create(&self, record: &R) -> Result<R, BackendError> {
        let span = info_span!("usecase.mutate_record.create", table = R::TABLE);
        let result = self.repo.create(record).instrument(span).await;
        self.report("create", result, "Saved")
    }

    pub async fn update(&self, record: &R) -> Result<R, BackendError> {
        let span = info_span!(
            "usecase.mutate_record.update",
            table = R::TABLE,
            id = %record.id()
        );
        let result = self.repo.update(record).instrument(span).await;
        self.report("update", result, "Changes saved")
    }

    pub async fn delete(&self, id: &R::Id) -> Result<(), BackendError> {
        let span = info_span!("usecase.mutate_record.delete", table = R::TABLE, id = %id);
        let result = self.repo.delete(id).instrument(span).await;
        self.report("delete", result, "Deleted")
    }

    fn report<T>(
        &self,
        verb: &str,
        result: Result<T, BackendError>,
        success: &str,
    ) -> Result<T, BackendError> {
        match &result {
            Ok(_) => self.notifier.notify(Toast::success(success)),
            Err(err) => {
                warn!(table = R::TABLE, verb, error = %err, "record mutation failed");
                self.notifier.notify(Toast::error(
                    format!("Could not {verb} {}", R::TABLE.replace('_', " ")),
                    err.to_string(),
                ));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{MemoryRepo, RecordingNotifier};
    use chrono::Utc;
    use studio_core::ids::{ContactId, ProductId};
    use studio_core::notification::ToastLevel;
    use studio_core::query::SortSpec;
    use studio_core::records::{Contact, Product, ProductSortKey};

    fn product(name: &str, price: i64) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.into(),
            sku: None,
            vendor: "Lumen".into(),
            category: None,
            price,
            image_path: None,
            created_at: Utc::now(),
        }
    }

    fn contact(first: &str) -> Contact {
        Contact {
            id: ContactId::new(first.to_lowercase()),
            first_name: first.into(),
            last_name: "Vega".into(),
            email: format!("{}@vega.test", first.to_lowercase()),
            phone: None,
            company: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn execute_filters_and_sorts_the_fetched_list() {
        let repo = Arc::new(MemoryRepo::new(vec![
            product("Arc Floor Lamp", 30_000),
            product("Oak Chair", 12_000),
            product("Table Lamp", 9_000),
            product("Wool Rug", 45_000),
        ]));
        let use_case = ListRecords::from_ports(repo);
        let query =
            ListQuery::<ProductSortKey>::search("lamp").with_sort(SortSpec::asc(ProductSortKey::Price));
        let view = use_case.execute(&query).await;
        let names: Vec<&str> = view.items().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Table Lamp", "Arc Floor Lamp"]);
    }

    #[tokio::test]
    async fn fetch_failure_resolves_to_failed_view() {
        let repo = Arc::new(MemoryRepo::<Product>::failing(BackendError::Network(
            "offline".into(),
        )));
        let use_case = ListRecords::from_ports(repo);
        let view = use_case.execute(&ListQuery::<ProductSortKey>::default()).await;
        assert_eq!(
            view,
            ListView::Failed {
                message: "network error: offline".into()
            }
        );
    }

    #[tokio::test]
    async fn product_grid_pages_on_the_server() {
        let rows: Vec<Product> = (0..5).map(|i| product(&format!("P{i}"), 100)).collect();
        let repo = Arc::new(MemoryRepo::new(rows));
        let use_case = ListRecords::from_ports(repo.clone());
        let view = use_case.execute_page(PageRequest::new(2, 2).unwrap()).await;
        match view {
            ListView::Ready { items, total } => {
                assert_eq!(total, 5);
                assert_eq!(items[0].name, "P2");
            }
            other => panic!("unexpected view: {other:?}"),
        }
        assert_eq!(*repo.calls.lock().unwrap(), vec!["list"]);
    }

    #[tokio::test]
    async fn mutation_failure_toasts_once_without_retry() {
        let repo = Arc::new(MemoryRepo::<Contact>::failing(BackendError::Conflict));
        let notifier = Arc::new(RecordingNotifier::default());
        let use_case = MutateRecord::from_ports(repo.clone(), notifier.clone());

        let err = use_case.create(&contact("Ines")).await.unwrap_err();
        assert_eq!(err, BackendError::Conflict);
        assert_eq!(repo.calls.lock().unwrap().len(), 1);
        let toasts = notifier.taken();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert_eq!(toasts[0].title, "Could not create contacts");
    }

    #[tokio::test]
    async fn mutations_round_trip_through_the_repository() {
        let repo = Arc::new(MemoryRepo::<Contact>::new(vec![]));
        let notifier = Arc::new(RecordingNotifier::default());
        let use_case = MutateRecord::from_ports(repo.clone(), notifier.clone());

        let mut ines = use_case.create(&contact("Ines")).await.unwrap();
        ines.company = Some("Vega Design".into());
        use_case.update(&ines).await.unwrap();
        let reader = ListRecords::from_ports(repo.clone());
        assert_eq!(
            reader.get(&ContactId::new("ines")).await.unwrap().company.as_deref(),
            Some("Vega Design")
        );

        use_case.delete(&ContactId::new("ines")).await.unwrap();
        assert_eq!(
            use_case.delete(&ContactId::new("ines")).await,
            Err(BackendError::NotFound)
        );
        let levels: Vec<ToastLevel> = notifier.taken().iter().map(|t| t.level).collect();
        assert_eq!(
            levels,
            vec![
                ToastLevel::Success,
                ToastLevel::Success,
                ToastLevel::Success,
                ToastLevel::Error
            ]
        );
    }
}
