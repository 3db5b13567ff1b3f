//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A 1-indexed page of `per_page` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Create a page request, falling back to `config` for missing values.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if either value is zero.
    pub(crate) fn new(
        page: Option<u64>,
        per_page: Option<u64>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let page = page.unwrap_or(config.default_page);
        let per_page = per_page.unwrap_or(config.default_page_size);

        if page == 0 || per_page == 0 {
            return Err(Error::InvalidPagination);
        }

        Ok(Self { page, per_page })
    }

    pub(crate) fn page(self) -> u64 {
        self.page
    }

    /// The maximum number of items on the page.
    pub(crate) fn limit(self) -> u64 {
        self.per_page
    }

    /// The number of items before the first item on this page.
    pub(crate) fn offset(self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// The page before this one, or page 1 if this is the first page.
    pub(crate) fn previous_page(self) -> u64 {
        self.page.saturating_sub(1).max(1)
    }

    /// The page after this one. There is no upper bound.
    pub(crate) fn next_page(self) -> u64 {
        self.page.saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, pagination::PaginationConfig};

    use super::PageRequest;

    #[test]
    fn uses_config_defaults() {
        let request = PageRequest::new(None, None, &PaginationConfig::default()).unwrap();

        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 10);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let request = PageRequest::new(Some(3), Some(7), &PaginationConfig::default()).unwrap();

        assert_eq!(request.offset(), 14);
        assert_eq!(request.limit(), 7);
    }

    #[test]
    fn rejects_zero_page_and_page_size() {
        let config = PaginationConfig::default();

        assert!(matches!(
            PageRequest::new(Some(0), None, &config),
            Err(Error::InvalidPagination)
        ));
        assert!(matches!(
            PageRequest::new(None, Some(0), &config),
            Err(Error::InvalidPagination)
        ));
    }

    #[test]
    fn previous_page_clamps_at_first_page() {
        let config = PaginationConfig::default();

        assert_eq!(
            PageRequest::new(Some(1), None, &config)
                .unwrap()
                .previous_page(),
            1
        );
        assert_eq!(
            PageRequest::new(Some(4), None, &config)
                .unwrap()
                .previous_page(),
            3
        );
    }

    #[test]
    fn next_page_is_unbounded() {
        let request = PageRequest::new(Some(41), None, &PaginationConfig::default()).unwrap();

        assert_eq!(request.next_page(), 42);
    }
}
