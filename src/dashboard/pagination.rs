//! 分页游标
//!
//! 分页是物品集合上的纯派生视图，不做持久化。

use crate::config::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 当前页，从 1 开始
    current_page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(total / page_size)`，空集合为 0 页
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// 跳转到指定页，不做上界检查（越界页得到空切片）
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.current_page < self.page_count(total)
    }

    /// 集合缩小后把当前页收回到最后一页
    pub fn clamp_to(&mut self, total: usize) {
        let last = self.page_count(total).max(1);
        if self.current_page > last {
            self.current_page = last;
        }
    }

    /// 取指定页的切片，越界返回空切片
    pub fn page_slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let start = page
            .max(1)
            .saturating_sub(1)
            .saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        self.page_slice(items, self.current_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_is_ceiling() {
        let p = Pagination::new(5);
        for (n, expected) in [(0, 0), (1, 1), (5, 1), (6, 2), (10, 2), (11, 3)] {
            assert_eq!(p.page_count(n), expected, "n={n}");
        }
        // 所有组合
        for size in 1..=7 {
            let p = Pagination::new(size);
            for n in 0..40 {
                assert_eq!(p.page_count(n), (n + size - 1) / size);
            }
        }
    }

    #[test]
    fn test_slices_cover_collection_in_order() {
        let items: Vec<u32> = (0..12).collect();
        let p = Pagination::new(5);
        assert_eq!(p.page_slice(&items, 1), &[0, 1, 2, 3, 4]);
        assert_eq!(p.page_slice(&items, 2), &[5, 6, 7, 8, 9]);
        assert_eq!(p.page_slice(&items, 3), &[10, 11]);

        let joined: Vec<u32> = (1..=p.page_count(items.len()))
            .flat_map(|page| p.page_slice(&items, page).iter().copied())
            .collect();
        assert_eq!(joined, items);
    }

    #[test]
    fn test_out_of_range_page_is_empty_not_error() {
        let items = vec!["a", "b", "c"];
        let mut p = Pagination::new(2);
        p.set_page(3);
        assert!(p.slice(&items).is_empty());
        assert!(p.page_slice(&items, usize::MAX).is_empty());
        assert!(p.page_slice::<u8>(&[], 1).is_empty());
    }

    #[test]
    fn test_navigation_bounds() {
        let mut p = Pagination::new(2);
        p.previous_page();
        assert_eq!(p.current_page(), 1);
        assert!(!p.has_previous());
        assert!(p.has_next(3));

        p.next_page();
        assert_eq!(p.current_page(), 2);
        assert!(!p.has_next(3));

        p.set_page(0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut p = Pagination::new(5);
        p.set_page(4);
        p.clamp_to(12);
        assert_eq!(p.current_page(), 3);
        p.clamp_to(0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        assert_eq!(Pagination::new(0).page_size(), 1);
    }
}
