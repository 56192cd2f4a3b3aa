use serde::{Deserialize, Serialize};

/// One page of a paginated list endpoint.
///
/// Every field defaults, so a payload with a missing `results` array decodes
/// as an empty page instead of failing.
///
/// The deserialize bound is spelled out because `#[serde(default)]` on
/// `results` would otherwise demand `T: Default`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ResultPage<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> ResultPage<T> {
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

impl<T> Default for ResultPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MovieSummary;

    #[test]
    fn test_zero_match_search_payload() {
        let json = r#"{"page": 1, "results": [], "total_pages": 0, "total_results": 0}"#;
        let page: ResultPage<MovieSummary> = serde_json::from_str(json).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_results, 0);
        assert!(!page.has_next());
    }

    #[test]
    fn test_missing_fields_default() {
        let page: ResultPage<MovieSummary> = serde_json::from_str("{}").unwrap();
        assert_eq!(page, ResultPage::empty());
    }

    #[test]
    fn test_has_next() {
        let page = ResultPage::<MovieSummary> {
            page: 2,
            results: vec![],
            total_pages: 3,
            total_results: 50,
        };
        assert!(page.has_next());
    }
}
