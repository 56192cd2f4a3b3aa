use cinedex_models::MovieSummary;
use cinedex_sources::{FetchError, MovieCatalog};

use crate::discover::{fetch_listing, MovieListing, MovieQuery};

/// Accumulates search results across "load more" requests.
///
/// Page 1 replaces whatever was collected before; later pages append.
/// Changing the query starts over from page 1.
#[derive(Debug, Default)]
pub struct SearchSession {
    query: String,
    movies: Vec<MovieSummary>,
    page: u32,
    total_pages: u32,
    total_results: u64,
}

impl SearchSession {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Switch to a different query. Collected results are dropped when the
    /// query actually changes.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query.trim() != self.query.trim() {
            *self = Self::new(query);
        }
    }

    /// Merge a fetched page into the session
    pub fn apply(&mut self, listing: MovieListing) {
        if listing.page <= 1 {
            self.movies = listing.movies;
        } else {
            self.movies.extend(listing.movies);
        }
        self.page = listing.page.max(1);
        self.total_pages = listing.total_pages;
        self.total_results = listing.total_results;
    }

    /// Fetch the next page (page 1 on a fresh session) and merge it.
    /// Returns how many movies the page added.
    pub async fn load_next(&mut self, catalog: &dyn MovieCatalog) -> Result<usize, FetchError> {
        let next = self.page + 1;
        let listing = fetch_listing(catalog, &MovieQuery::Search(self.query.clone()), next).await?;
        let added = listing.movies.len();
        self.apply(listing);
        Ok(added)
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn movies(&self) -> &[MovieSummary] {
        &self.movies
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    /// Snapshot of everything collected so far as a single listing
    pub fn to_listing(&self) -> MovieListing {
        MovieListing {
            movies: self.movies.clone(),
            page: self.page.max(1),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::tests::FakeCatalog;

    fn listing(page: u32, ids: &[u64], total_pages: u32) -> MovieListing {
        MovieListing {
            movies: ids.iter().map(|&id| MovieSummary::new(id, "m")).collect(),
            page,
            total_pages,
            total_results: u64::from(total_pages) * 2,
        }
    }

    fn ids(session: &SearchSession) -> Vec<u64> {
        session.movies().iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_later_pages_append_first_page_replaces() {
        let mut session = SearchSession::new("alien");
        session.apply(listing(1, &[1, 2], 3));
        session.apply(listing(2, &[3, 4], 3));
        assert_eq!(ids(&session), vec![1, 2, 3, 4]);
        assert!(session.has_more());

        session.apply(listing(1, &[9], 3));
        assert_eq!(ids(&session), vec![9]);
        assert_eq!(session.page(), 1);
    }

    #[test]
    fn test_new_query_resets() {
        let mut session = SearchSession::new("alien");
        session.apply(listing(1, &[1, 2], 3));

        session.set_query(" alien ");
        assert_eq!(session.movies().len(), 2);

        session.set_query("aliens");
        assert!(session.movies().is_empty());
        assert_eq!(session.page(), 0);
        assert_eq!(session.query(), "aliens");
    }

    #[tokio::test]
    async fn test_load_next_walks_pages() {
        let catalog = FakeCatalog::with_pages(2);
        let mut session = SearchSession::new("matrix");

        assert_eq!(session.load_next(&catalog).await.unwrap(), 3);
        assert!(session.has_more());
        assert_eq!(session.load_next(&catalog).await.unwrap(), 3);
        assert!(!session.has_more());

        assert_eq!(session.movies().len(), 6);
        assert_eq!(session.to_listing().total_results, 6);
        assert_eq!(catalog.calls(), vec!["search:matrix:1", "search:matrix:2"]);
    }

    #[tokio::test]
    async fn test_zero_matches() {
        let catalog = FakeCatalog::with_pages(0);
        let mut session = SearchSession::new("qqqq");

        assert_eq!(session.load_next(&catalog).await.unwrap(), 0);
        assert!(!session.has_more());
        assert_eq!(session.total_results(), 0);
    }
}
