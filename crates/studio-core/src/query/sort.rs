//! Comparator switch for list sorting.

use std::cmp::Ordering;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Records with a fixed set of sortable columns.
pub trait Sortable {
    type SortKey: Copy + Debug + PartialEq;

    fn compare_by(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec<K> {
    pub key: K,
    #[serde(default)]
    pub direction: SortDirection,
}

impl<K> SortSpec<K> {
    pub fn asc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }
}

/// Stable sort; equal keys keep their fetched order in both directions.
pub fn sort_records<T: Sortable>(items: &mut [T], spec: SortSpec<T::SortKey>) {
    items.sort_by(|a, b| {
        let ordering = a.compare_by(b, spec.key);
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Case-insensitive string comparison used by the name/title columns.
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// `None` sorts after every value.
pub fn cmp_option<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
