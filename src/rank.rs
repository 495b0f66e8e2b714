use crate::search::SearchResult;

/// Stable ascending sort on the lowercased title.
pub fn sort(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    results.sort_by_cached_key(|r| r.title.to_lowercase());
    results
}
