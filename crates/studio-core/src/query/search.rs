//! Case-insensitive substring search across a record's display fields.

/// Records that can be matched by the list screens' search box.
pub trait Searchable {
    /// The two or three fields the search box looks at.
    fn search_fields(&self) -> Vec<&str>;
}

/// True when any search field contains `needle` (already lower-cased).
fn matches_lowered<T: Searchable>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

pub fn matches_search<T: Searchable>(item: &T, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    needle.is_empty() || matches_lowered(item, &needle)
}

/// Keep the records whose search fields contain `needle`, ignoring case.
///
/// The needle is used as typed: surrounding spaces are part of the match.
/// An empty needle returns the input unchanged. Relative order is preserved.
pub fn filter_by_search<T: Searchable>(items: Vec<T>, needle: &str) -> Vec<T> {
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| matches_lowered(item, &needle))
        .collect()
}
