use crate::models::AttemptRecord;

/// Number of attempts shown per page.
pub const ITEMS_PER_PAGE: usize = 5;

/// `ceil(len / page_size)`; zero for an empty list.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Items on 1-based page `page_index`. Pages past the end are empty.
pub fn page_slice<T>(items: &[T], page_size: usize, page_index: usize) -> &[T] {
    let size = page_size.max(1);
    let page = page_index.max(1);
    let start = (page - 1).saturating_mul(size).min(items.len());
    let end = page.saturating_mul(size).min(items.len());
    &items[start..end]
}

/// One rendered page. Recomputed on every render, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: &'a [AttemptRecord],
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Page state for the history view. Display order is the order the list
/// was loaded in; no sorting is applied.
#[derive(Debug, Clone)]
pub struct HistoryPager {
    attempts: Vec<AttemptRecord>,
    page_size: usize,
    current_page: usize,
}

impl Default for HistoryPager {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl HistoryPager {
    pub fn new(attempts: Vec<AttemptRecord>) -> Self {
        Self::with_page_size(attempts, ITEMS_PER_PAGE)
    }

    pub fn with_page_size(attempts: Vec<AttemptRecord>, page_size: usize) -> Self {
        Self {
            attempts,
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Replace the list and go back to the first page.
    pub fn set_attempts(&mut self, attempts: Vec<AttemptRecord>) {
        self.attempts = attempts;
        self.current_page = 1;
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.attempts.len(), self.page_size)
    }

    pub fn current_slice(&self) -> &[AttemptRecord] {
        page_slice(&self.attempts, self.page_size, self.current_page)
    }

    pub fn page(&self) -> Page<'_> {
        Page {
            items: self.current_slice(),
            page_index: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages(),
        }
    }

    /// Jump to `page`, clamped to `1..=total_pages`.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.current_page = page.min(self.total_pages()).max(1);
        self.current_page
    }

    pub fn previous(&mut self) -> usize {
        self.current_page = self.current_page.saturating_sub(1).max(1);
        self.current_page
    }

    pub fn next(&mut self) -> usize {
        self.current_page = (self.current_page + 1).min(self.total_pages()).max(1);
        self.current_page
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Pagination controls are only shown once there is something to page.
    pub fn shows_controls(&self) -> bool {
        !self.attempts.is_empty()
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn attempts(n: usize) -> Vec<AttemptRecord> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap();
        (0..n)
            .map(|i| AttemptRecord::new(start + Duration::hours(i as i64), i as u32, 10))
            .collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(11, 5), 3);
    }

    #[test]
    fn test_ten_items_split_in_two_pages() {
        let list = attempts(10);
        assert_eq!(page_slice(&list, 5, 1), &list[0..5]);
        assert_eq!(page_slice(&list, 5, 2), &list[5..10]);
        assert!(page_slice(&list, 5, 3).is_empty());
    }

    #[test]
    fn test_previous_and_next_clamp() {
        for n in [1, 4, 5, 7, 10, 23] {
            let mut pager = HistoryPager::new(attempts(n));
            let total = pager.total_pages();

            assert_eq!(pager.previous(), 1);
            assert_eq!(pager.previous(), 1);

            for _ in 0..total + 3 {
                let page = pager.next();
                assert!(page >= 1 && page <= total);
            }
            assert_eq!(pager.current_page(), total);
            assert!(!pager.has_next());
        }
    }

    #[test]
    fn test_empty_list() {
        let mut pager = HistoryPager::default();
        assert_eq!(pager.total_pages(), 0);
        assert!(!pager.shows_controls());
        assert_eq!(pager.next(), 1);
        assert_eq!(pager.previous(), 1);
        assert!(pager.current_slice().is_empty());
    }

    #[test]
    fn test_seven_items() {
        let list = attempts(7);
        let mut pager = HistoryPager::new(list.clone());
        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.current_slice(), &list[0..5]);
        assert!(!pager.has_previous());
        assert!(pager.has_next());

        pager.next();
        let page = pager.page();
        assert_eq!(page.items, &list[5..7]);
        assert_eq!(page.page_index, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(pager.page_label(), "Page 2 of 2");
        assert!(pager.has_previous());
    }

    #[test]
    fn test_set_attempts_resets_page() {
        let mut pager = HistoryPager::new(attempts(12));
        pager.go_to(3);
        assert_eq!(pager.current_page(), 3);

        pager.set_attempts(attempts(2));
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.go_to(9), 1);
    }
}
