use serde::Serialize;
use std::fmt;

const MAX_VISIBLE_PAGES: u32 = 5;

/// Page links to show around the current page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current: u32,
    pub total: u32,
    pub pages: Vec<u32>,
    /// Link to page 1 shown before the window
    pub first: bool,
    pub leading_ellipsis: bool,
    pub trailing_ellipsis: bool,
    /// Link to the last page shown after the window
    pub last: bool,
}

impl PageWindow {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        !self.is_empty() && self.current > 1
    }

    pub fn has_next(&self) -> bool {
        !self.is_empty() && self.current < self.total
    }
}

/// Up to five pages centred on `current`, shifted to stay within
/// `1..=total`. Empty when there is at most one page.
pub fn visible_pages(current: u32, total: u32) -> PageWindow {
    if total <= 1 {
        return PageWindow::default();
    }
    let current = current.clamp(1, total);

    let mut start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    // totals come straight from upstream, so stay clear of u32::MAX
    let end = start.saturating_add(MAX_VISIBLE_PAGES - 1).min(total);
    if end - start + 1 < MAX_VISIBLE_PAGES {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }

    PageWindow {
        current,
        total,
        pages: (start..=end).collect(),
        first: start > 1,
        leading_ellipsis: start > 2,
        trailing_ellipsis: total - end > 1,
        last: end < total,
    }
}

/// Renders as `‹ 1 … 4 5 [6] 7 8 … 20 ›`
impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        let mut parts = Vec::new();
        parts.push(if self.has_previous() { "‹" } else { " " }.to_string());
        if self.first {
            parts.push("1".to_string());
        }
        if self.leading_ellipsis {
            parts.push("…".to_string());
        }
        for &page in &self.pages {
            if page == self.current {
                parts.push(format!("[{}]", page));
            } else {
                parts.push(page.to_string());
            }
        }
        if self.trailing_ellipsis {
            parts.push("…".to_string());
        }
        if self.last {
            parts.push(self.total.to_string());
        }
        parts.push(if self.has_next() { "›" } else { " " }.to_string());

        write!(f, "{}", parts.join(" ").trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_has_no_window() {
        assert!(visible_pages(1, 1).is_empty());
        assert!(visible_pages(1, 0).is_empty());
        assert_eq!(visible_pages(1, 1).to_string(), "");
    }

    #[test]
    fn test_window_at_start() {
        let window = visible_pages(1, 20);
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);
        assert!(!window.first && !window.leading_ellipsis);
        assert!(window.trailing_ellipsis && window.last);
        assert!(!window.has_previous());
    }

    #[test]
    fn test_window_in_middle() {
        let window = visible_pages(10, 20);
        assert_eq!(window.pages, vec![8, 9, 10, 11, 12]);
        assert!(window.first && window.leading_ellipsis);
        assert!(window.trailing_ellipsis && window.last);
        assert_eq!(window.to_string(), "‹ 1 … 8 9 [10] 11 12 … 20 ›");
    }

    #[test]
    fn test_window_shifts_at_end() {
        let window = visible_pages(20, 20);
        assert_eq!(window.pages, vec![16, 17, 18, 19, 20]);
        assert!(!window.last && !window.trailing_ellipsis);
        assert!(!window.has_next());
    }

    #[test]
    fn test_no_ellipsis_next_to_edge() {
        let window = visible_pages(4, 7);
        assert_eq!(window.pages, vec![2, 3, 4, 5, 6]);
        assert!(window.first && !window.leading_ellipsis);
        assert!(window.last && !window.trailing_ellipsis);
    }

    #[test]
    fn test_fewer_pages_than_window() {
        let window = visible_pages(2, 3);
        assert_eq!(window.pages, vec![1, 2, 3]);
        assert!(!window.first && !window.last);
    }

    #[test]
    fn test_window_near_u32_max() {
        let window = visible_pages(u32::MAX, u32::MAX);
        assert_eq!(window.pages, ((u32::MAX - 4)..=u32::MAX).collect::<Vec<_>>());
        assert!(window.first && window.leading_ellipsis);
        assert!(!window.trailing_ellipsis && !window.last);

        let window = visible_pages(u32::MAX - 3, u32::MAX);
        assert_eq!(window.pages.last(), Some(&(u32::MAX - 1)));
        assert!(window.last && !window.trailing_ellipsis);

        let window = visible_pages(u32::MAX - 10, u32::MAX);
        assert!(window.trailing_ellipsis && window.last);
    }

    #[test]
    fn test_current_out_of_range_is_clamped() {
        assert_eq!(visible_pages(50, 8).current, 8);
        assert_eq!(visible_pages(0, 8).pages, vec![1, 2, 3, 4, 5]);
    }
}
