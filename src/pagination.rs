//! Pagination types for listmonk list responses.

use serde::{Deserialize, Serialize, Serializer};

use crate::models::null_as_default;

/// A page of results from the listmonk API.
///
/// Mirrors the `{results, total, page, per_page}` object listmonk returns
/// for its search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// The items on this page.
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub results: Vec<T>,
    /// Total number of matching items across all pages.
    #[serde(default)]
    pub total: u64,
    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: u32,
    /// Number of items per page (0 when all results were requested).
    #[serde(default)]
    pub per_page: u32,
    /// Search string echoed back by some endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(results: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            results,
            total,
            page,
            per_page,
            query: None,
        }
    }

    /// Whether a later page would return more items.
    pub fn has_more(&self) -> bool {
        if self.per_page == 0 {
            return false;
        }
        u64::from(self.page) * u64::from(self.per_page) < self.total
    }

    /// Number of pages at the current page size.
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            results: self.results.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            query: self.query,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Page size for list queries: a count, or every result at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerPage {
    Count(u32),
    All,
}

impl Serialize for PerPage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PerPage::Count(n) => serializer.serialize_u32(*n),
            PerPage::All => serializer.serialize_str("all"),
        }
    }
}

impl From<u32> for PerPage {
    fn from(n: u32) -> Self {
        PerPage::Count(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_more() {
        // Page 1 of 3 (total 250, 100 per page)
        let page: Page<i32> = Page::new(vec![1; 100], 1, 100, 250);
        assert!(page.has_more());
        assert_eq!(page.total_pages(), 3);

        // Page 3 of 3
        let page: Page<i32> = Page::new(vec![1; 50], 3, 100, 250);
        assert!(!page.has_more());
    }

    #[test]
    fn test_page_all_results() {
        let page: Page<i32> = Page::new(vec![1; 7], 1, 0, 7);
        assert!(!page.has_more());
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 1, 100, 3);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.results, vec![2, 4, 6]);
        assert_eq!(mapped.page, 1);
    }

    #[test]
    fn test_page_deserialize_listmonk_shape() {
        let page: Page<u32> = serde_json::from_str(
            r#"{"results": [1, 2], "query": "", "total": 12, "per_page": 2, "page": 1}"#,
        )
        .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total, 12);
        assert!(page.has_more());
    }

    #[test]
    fn test_page_null_results() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"results": null, "total": 0, "per_page": 20, "page": 1}"#)
                .unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_per_page_serialize() {
        assert_eq!(serde_json::to_string(&PerPage::Count(50)).unwrap(), "50");
        assert_eq!(serde_json::to_string(&PerPage::All).unwrap(), "\"all\"");
    }
}
