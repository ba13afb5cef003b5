//! Page slicing for list screens and the server-side range of the product grid.

use serde::{Deserialize, Serialize};

use super::QueryError;

/// Upper bound on a single page, matching what the backend will return in one range.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// One-based page request.
///
/// Deserialization goes through [`PageRequest::new`], so a request body can't
/// carry page 0 or an out-of-range size past the command boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page: u32,
    page_size: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = QueryError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.page_size)
    }
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Result<Self, QueryError> {
        if page == 0 {
            return Err(QueryError::InvalidPage);
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(QueryError::InvalidPageSize {
                size: page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, page_size })
    }

    pub fn first(page_size: u32) -> Result<Self, QueryError> {
        Self::new(1, page_size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Inclusive `(from, to)` row range, the shape of an HTTP `Range` header.
    pub fn range(&self) -> (u64, u64) {
        let from = self.offset();
        (from, from + u64::from(self.page_size) - 1)
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total rows across all pages, when known.
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// A page holding the whole list, used when no pagination was requested.
    pub fn whole(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        let page_size = u32::try_from(items.len()).unwrap_or(u32::MAX);
        Self {
            items,
            total,
            page: 1,
            page_size,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return if self.total == 0 { 0 } else { 1 };
        }
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Slice an in-memory list into the requested page.
///
/// A page past the end yields no items but still reports the total.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let items = items
        .into_iter()
        .skip(offset)
        .take(request.page_size() as usize)
        .collect();
    Page {
        items,
        total,
        page: request.page(),
        page_size: request.page_size(),
    }
}
