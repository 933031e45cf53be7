//! Paging primitives shared by every search endpoint

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

pub fn default_page_number() -> i64 {
    DEFAULT_PAGE_NUMBER
}

pub fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE)
    }
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Rows to skip. Saturates instead of overflowing, so a page number far
    /// past the end still yields an empty page.
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).max(0).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> i64 {
        self.page_size.max(0)
    }
}

/// Page metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: i64,
    pub page_number: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageMeta {
    pub fn new(total_items: i64, page: PageRequest) -> Self {
        let total_pages = if page.page_size > 0 && total_items > 0 {
            (total_items + page.page_size - 1) / page.page_size
        } else {
            0
        };
        Self {
            total_items,
            page_number: page.page_number,
            page_size: page.page_size,
            total_pages,
            has_previous: page.page_number > 1 && total_pages > 0,
            has_next: page.page_number < total_pages,
        }
    }
}

/// One page of results plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub meta: PageMeta,
    pub data: Vec<T>,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, total_items: i64, page: PageRequest) -> Self {
        Self {
            meta: PageMeta::new(total_items, page),
            data,
        }
    }

    /// Convert every item, keeping the metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PagedResponse<U> {
        PagedResponse {
            meta: self.meta,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_limit() {
        let page = PageRequest::new(3, 10);
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
        assert_eq!(PageRequest::default().offset(), 0);
    }

    #[test]
    fn test_meta_math() {
        let meta = PageMeta::new(25, PageRequest::new(1, 10));
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_previous);
        assert!(meta.has_next);

        let meta = PageMeta::new(25, PageRequest::new(3, 10));
        assert!(meta.has_previous);
        assert!(!meta.has_next);

        let meta = PageMeta::new(20, PageRequest::new(2, 10));
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_empty_result() {
        let meta = PageMeta::new(0, PageRequest::new(1, 10));
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_previous);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_offset_saturates_for_huge_page_numbers() {
        let page = PageRequest::new(i64::MAX, 10);
        assert_eq!(page.offset(), i64::MAX);

        let meta = PageMeta::new(25, page);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next);
    }

    #[test]
    fn test_map_keeps_meta() {
        let page = PagedResponse::new(vec![1, 2], 3, PageRequest::new(1, 2));
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.data, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.meta.total_pages, 2);
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(PageMeta::new(5, PageRequest::default())).unwrap();
        assert_eq!(json["totalItems"], 5);
        assert_eq!(json["hasNext"], false);
    }
}
