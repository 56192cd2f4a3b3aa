use cinedex_models::{Category, MovieSummary, ResultPage};
use cinedex_sources::{FetchError, MovieCatalog};
use futures::future::join_all;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// What a listing screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    Category(Category),
    Search(String),
    Genre(u64),
}

impl fmt::Display for MovieQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieQuery::Category(category) => write!(f, "{}", category.label()),
            MovieQuery::Search(query) => write!(f, "Search results for \"{}\"", query.trim()),
            MovieQuery::Genre(id) => write!(f, "Genre {}", id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieListing {
    pub movies: Vec<MovieSummary>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}

impl MovieListing {
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

impl From<ResultPage<MovieSummary>> for MovieListing {
    fn from(page: ResultPage<MovieSummary>) -> Self {
        Self {
            movies: page.results,
            page: page.page,
            total_pages: page.total_pages,
            total_results: page.total_results,
        }
    }
}

/// Fetch one page of `query`. Pages are 1-based; 0 is treated as 1.
///
/// A blank search returns an empty listing without touching the catalog.
pub async fn fetch_listing(
    catalog: &dyn MovieCatalog,
    query: &MovieQuery,
    page: u32,
) -> Result<MovieListing, FetchError> {
    let page = page.max(1);
    let result = match query {
        MovieQuery::Category(category) => catalog.category_page(*category, page).await?,
        MovieQuery::Search(text) => {
            let text = text.trim();
            if text.is_empty() {
                debug!("Blank search query, skipping request");
                return Ok(MovieListing::empty(page));
            }
            catalog.search(text, page).await?
        }
        MovieQuery::Genre(genre_id) => catalog.by_genre(*genre_id, page).await?,
    };

    debug!(
        "{} page {}: {} movies of {}",
        query,
        result.page,
        result.results.len(),
        result.total_results
    );
    Ok(result.into())
}

/// First page of every category, fetched concurrently and cut to `limit`
/// titles each. One failing category does not hide the others.
pub async fn fetch_home(
    catalog: &dyn MovieCatalog,
    limit: usize,
) -> Vec<(Category, Result<Vec<MovieSummary>, FetchError>)> {
    let rows = Category::ALL.iter().map(|&category| async move {
        let movies = catalog.category_page(category, 1).await.map(|page| {
            let mut movies = page.results;
            movies.truncate(limit);
            movies
        });
        (category, movies)
    });
    join_all(rows).await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use cinedex_models::MovieDetail;
    use std::sync::Mutex;

    /// Catalog that fabricates pages and records every call
    #[derive(Default)]
    pub(crate) struct FakeCatalog {
        pub calls: Mutex<Vec<String>>,
        pub total_pages: u32,
        pub fail_category: Option<Category>,
    }

    impl FakeCatalog {
        pub fn with_pages(total_pages: u32) -> Self {
            Self {
                total_pages,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn page(&self, first_id: u64, page: u32) -> ResultPage<MovieSummary> {
            if self.total_pages == 0 {
                return ResultPage::empty();
            }
            let base = first_id + u64::from(page) * 100;
            ResultPage {
                page,
                results: (0..3).map(|i| MovieSummary::new(base + i, format!("Movie {}", base + i))).collect(),
                total_pages: self.total_pages,
                total_results: u64::from(self.total_pages) * 3,
            }
        }
    }

    #[async_trait]
    impl MovieCatalog for FakeCatalog {
        fn catalog_name(&self) -> &str {
            "fake"
        }

        async fn category_page(&self, category: Category, page: u32) -> Result<ResultPage<MovieSummary>, FetchError> {
            self.calls.lock().unwrap().push(format!("{}:{}", category.key(), page));
            if self.fail_category == Some(category) {
                return Err(FetchError::status(503, "Service Unavailable"));
            }
            Ok(self.page(1000, page))
        }

        async fn search(&self, query: &str, page: u32) -> Result<ResultPage<MovieSummary>, FetchError> {
            self.calls.lock().unwrap().push(format!("search:{}:{}", query, page));
            Ok(self.page(2000, page))
        }

        async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail, FetchError> {
            self.calls.lock().unwrap().push(format!("movie:{}", movie_id));
            Ok(MovieSummary::new(movie_id, format!("Movie {}", movie_id)).into())
        }

        async fn by_genre(&self, genre_id: u64, page: u32) -> Result<ResultPage<MovieSummary>, FetchError> {
            self.calls.lock().unwrap().push(format!("genre:{}:{}", genre_id, page));
            Ok(self.page(3000, page))
        }
    }

    #[tokio::test]
    async fn test_category_listing() {
        let catalog = FakeCatalog::with_pages(5);
        let listing = fetch_listing(&catalog, &MovieQuery::Category(Category::TopRated), 2)
            .await
            .unwrap();

        assert_eq!(listing.page, 2);
        assert_eq!(listing.movies.len(), 3);
        assert!(listing.has_next());
        assert_eq!(catalog.calls(), vec!["top_rated:2"]);
    }

    #[tokio::test]
    async fn test_page_zero_is_clamped() {
        let catalog = FakeCatalog::with_pages(5);
        fetch_listing(&catalog, &MovieQuery::Genre(28), 0).await.unwrap();
        assert_eq!(catalog.calls(), vec!["genre:28:1"]);
    }

    #[tokio::test]
    async fn test_blank_search_skips_catalog() {
        let catalog = FakeCatalog::with_pages(5);
        let listing = fetch_listing(&catalog, &MovieQuery::Search("   ".to_string()), 1)
            .await
            .unwrap();

        assert!(listing.is_empty());
        assert_eq!(listing.total_results, 0);
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_match_search_is_not_an_error() {
        let catalog = FakeCatalog::with_pages(0);
        let listing = fetch_listing(&catalog, &MovieQuery::Search(" nothing ".to_string()), 1)
            .await
            .unwrap();

        assert!(listing.is_empty());
        assert_eq!(listing.total_results, 0);
        assert!(!listing.has_next());
        assert_eq!(catalog.calls(), vec!["search:nothing:1"]);
    }

    #[tokio::test]
    async fn test_home_keeps_rows_when_one_fails() {
        let catalog = FakeCatalog {
            total_pages: 2,
            fail_category: Some(Category::Upcoming),
            ..FakeCatalog::default()
        };

        let rows = fetch_home(&catalog, 2).await;
        assert_eq!(rows.len(), Category::ALL.len());
        for (category, movies) in &rows {
            if *category == Category::Upcoming {
                assert!(movies.as_ref().unwrap_err().to_string().contains("503"));
            } else {
                assert_eq!(movies.as_ref().unwrap().len(), 2);
            }
        }
    }

    #[test]
    fn test_query_display() {
        assert_eq!(MovieQuery::Category(Category::Upcoming).to_string(), "Upcoming");
        assert_eq!(
            MovieQuery::Search(" alien ".to_string()).to_string(),
            "Search results for \"alien\""
        );
    }
}
