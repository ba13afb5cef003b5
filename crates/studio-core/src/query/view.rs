//! The loading / error / empty / populated resolution every list screen renders.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Page;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView<T> {
    Loading,
    Failed { message: String },
    /// The fetch succeeded with no rows.
    Empty,
    /// Rows exist but the current search or filter hides all of them.
    NoMatches { query: String },
    Ready { items: Vec<T>, total: u64 },
}

impl<T> ListView<T> {
    pub fn from_fetch<E: Display>(result: Result<Vec<T>, E>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::Empty,
            Ok(items) => {
                let total = items.len() as u64;
                Self::Ready { items, total }
            }
            Err(err) => Self::Failed {
                message: err.to_string(),
            },
        }
    }

    /// A server-side page, as fetched by the product grid.
    pub fn from_page<E: Display>(result: Result<Page<T>, E>) -> Self {
        match result {
            Ok(page) if page.items.is_empty() => Self::Empty,
            Ok(page) => Self::Ready {
                items: page.items,
                total: page.total,
            },
            Err(err) => Self::Failed {
                message: err.to_string(),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Ready { items, .. } => items,
            _ => &[],
        }
    }

    /// Convert the rows of a ready view, e.g. into display DTOs.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListView<U> {
        match self {
            Self::Loading => ListView::Loading,
            Self::Failed { message } => ListView::Failed { message },
            Self::Empty => ListView::Empty,
            Self::NoMatches { query } => ListView::NoMatches { query },
            Self::Ready { items, total } => ListView::Ready {
                items: items.into_iter().map(f).collect(),
                total,
            },
        }
    }
}
