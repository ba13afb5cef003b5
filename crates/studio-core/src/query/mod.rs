//! Client-side list querying: search, sort, status filter and pagination.
//!
//! Every list screen (contacts, leads, invoices, purchase orders, products,
//! projects, time entries) runs the same pipeline over a fetched list:
//! filter by search text, filter by status, sort, then slice a page.

mod page;
mod search;
mod sort;
mod view;

pub use page::{paginate, Page, PageRequest, MAX_PAGE_SIZE};
pub use search::{filter_by_search, matches_search, Searchable};
pub use sort::{cmp_option, cmp_text, sort_records, SortDirection, SortSpec, Sortable};
pub use view::ListView;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("page numbers start at 1")]
    InvalidPage,
    #[error("page size {size} must be between 1 and {max}")]
    InvalidPageSize { size: u32, max: u32 },
}

/// Records carrying a status column the list screens can filter on.
pub trait HasStatus {
    type Status: Copy + PartialEq;

    fn status(&self) -> Self::Status;
}

/// Search text, optional status filter, optional sort and optional page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize, S: Serialize",
    deserialize = "K: Deserialize<'de>, S: Deserialize<'de>"
))]
pub struct ListQuery<K, S = ()> {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: Option<S>,
    #[serde(default)]
    pub sort: Option<SortSpec<K>>,
    #[serde(default)]
    pub page: Option<PageRequest>,
}

impl<K, S> Default for ListQuery<K, S> {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            sort: None,
            page: None,
        }
    }
}

impl<K: Copy, S> ListQuery<K, S> {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, sort: SortSpec<K>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    /// Search, sort and page without a status filter.
    pub fn apply<T>(&self, items: Vec<T>) -> Page<T>
    where
        T: Searchable + Sortable<SortKey = K>,
    {
        let filtered = filter_by_search(items, &self.search);
        self.sort_and_page(filtered)
    }

    /// Resolve a fetched list into what the screen renders.
    pub fn resolve<T, E>(&self, fetched: Result<Vec<T>, E>) -> ListView<T>
    where
        T: Searchable + Sortable<SortKey = K>,
        E: std::fmt::Display,
    {
        match fetched {
            Err(err) => ListView::Failed {
                message: err.to_string(),
            },
            Ok(items) if items.is_empty() => ListView::Empty,
            Ok(items) => self.view_of(self.apply(items)),
        }
    }

    fn view_of<T>(&self, page: Page<T>) -> ListView<T> {
        if page.total == 0 {
            ListView::NoMatches {
                query: self.search.clone(),
            }
        } else {
            ListView::Ready {
                items: page.items,
                total: page.total,
            }
        }
    }

    fn sort_and_page<T>(&self, mut items: Vec<T>) -> Page<T>
    where
        T: Sortable<SortKey = K>,
    {
        if let Some(spec) = self.sort {
            sort_records(&mut items, spec);
        }
        match self.page {
            Some(request) => paginate(items, request),
            None => Page::whole(items),
        }
    }
}

impl<K: Copy, S: Copy + PartialEq> ListQuery<K, S> {
    /// Search, status filter, sort and page.
    pub fn apply_with_status<T>(&self, items: Vec<T>) -> Page<T>
    where
        T: Searchable + Sortable<SortKey = K> + HasStatus<Status = S>,
    {
        let mut filtered = filter_by_search(items, &self.search);
        if let Some(status) = self.status {
            filtered.retain(|item| item.status() == status);
        }
        self.sort_and_page(filtered)
    }

    /// Resolve a fetched list into what the screen renders, status filter included.
    pub fn resolve_with_status<T, E>(&self, fetched: Result<Vec<T>, E>) -> ListView<T>
    where
        T: Searchable + Sortable<SortKey = K> + HasStatus<Status = S>,
        E: std::fmt::Display,
    {
        match fetched {
            Err(err) => ListView::Failed {
                message: err.to_string(),
            },
            Ok(items) if items.is_empty() => ListView::Empty,
            Ok(items) => self.view_of(self.apply_with_status(items)),
        }
    }
}
