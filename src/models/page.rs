//! Offset paging primitives shared by the repository and service layers.

/// Page number used when the caller asks for anything below 1
pub const DEFAULT_PAGE_NUMBER: i64 = 1;
/// Page size used when the caller's size falls outside `1..=MAX_PAGE_SIZE`
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A clamped page request. Construct it with [`PageRequest::clamped`] so the
/// number is always at least 1 and the size always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: i64,
    size: i64,
}

impl PageRequest {
    /// Clamp raw paging input.
    ///
    /// A missing or sub-1 page number becomes 1; a missing size or one
    /// outside `[1, 100]` becomes 10.
    pub fn clamped(number: Option<i64>, size: Option<i64>) -> Self {
        let number = match number {
            Some(n) if n >= 1 => n,
            _ => DEFAULT_PAGE_NUMBER,
        };
        let size = match size {
            Some(s) if (1..=MAX_PAGE_SIZE).contains(&s) => s,
            _ => DEFAULT_PAGE_SIZE,
        };
        Self { number, size }
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// Rows to skip: `(number - 1) * size`
    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.size)
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::clamped(None, None)
    }
}

/// One page of results with the total count of matching rows
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page_number: request.number(),
            page_size: request.size(),
        }
    }

    /// `ceil(total_count / page_size)`
    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total_count + self.page_size - 1) / self.page_size
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page_number < self.total_pages()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamped_defaults() {
        let req = PageRequest::clamped(None, None);
        assert_eq!(req.number(), 1);
        assert_eq!(req.size(), 10);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_clamped_edges() {
        assert_eq!(PageRequest::clamped(Some(0), Some(0)), PageRequest::clamped(None, None));
        assert_eq!(PageRequest::clamped(Some(-3), Some(101)).size(), 10);
        assert_eq!(PageRequest::clamped(Some(2), Some(100)).size(), 100);
        assert_eq!(PageRequest::clamped(Some(3), Some(1)).offset(), 2);
    }

    #[test]
    fn test_page_flags() {
        let page = Page::new(vec![1, 2, 3], 23, PageRequest::clamped(Some(2), Some(10)));
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_previous_page());
        assert!(page.has_next_page());

        let last = Page::new(vec![1], 21, PageRequest::clamped(Some(3), Some(10)));
        assert!(!last.has_next_page());

        let empty: Page<i32> = Page::new(vec![], 0, PageRequest::default());
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_previous_page());
        assert!(!empty.has_next_page());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], 12, PageRequest::clamped(Some(1), Some(2)));
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.total_count, 12);
        assert_eq!(mapped.page_size, 2);
    }

    proptest! {
        #[test]
        fn prop_clamped_stays_in_range(number in any::<Option<i64>>(), size in any::<Option<i64>>()) {
            let req = PageRequest::clamped(number, size);
            prop_assert!(req.number() >= 1);
            prop_assert!((1..=MAX_PAGE_SIZE).contains(&req.size()));
            prop_assert!(req.offset() >= 0);

            if let Some(n) = number.filter(|n| *n >= 1) {
                prop_assert_eq!(req.number(), n);
            }
            match size {
                Some(s) if (1..=100).contains(&s) => prop_assert_eq!(req.size(), s),
                _ => prop_assert_eq!(req.size(), DEFAULT_PAGE_SIZE),
            }
        }

        #[test]
        fn prop_total_pages_covers_total(total in 0i64..10_000, size in 1i64..=100) {
            let page: Page<()> = Page::new(vec![], total, PageRequest::clamped(Some(1), Some(size)));
            let pages = page.total_pages();
            prop_assert!(pages * size >= total);
            prop_assert!(pages == 0 || (pages - 1) * size < total);
        }
    }
}
