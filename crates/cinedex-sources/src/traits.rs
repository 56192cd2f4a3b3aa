use async_trait::async_trait;
use cinedex_models::{Category, MovieDetail, MovieSummary, ResultPage};

use crate::error::FetchError;

/// Read-only movie metadata provider.
///
/// Pages are 1-based. Implementations route every call through their
/// request deduplicator.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    fn catalog_name(&self) -> &str;

    async fn category_page(&self, category: Category, page: u32) -> Result<ResultPage<MovieSummary>, FetchError>;

    async fn search(&self, query: &str, page: u32) -> Result<ResultPage<MovieSummary>, FetchError>;

    /// Detail with credits, videos and similar titles attached
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail, FetchError>;

    async fn by_genre(&self, genre_id: u64, page: u32) -> Result<ResultPage<MovieSummary>, FetchError>;

    async fn trending(&self, page: u32) -> Result<ResultPage<MovieSummary>, FetchError> {
        self.category_page(Category::Trending, page).await
    }

    async fn popular(&self, page: u32) -> Result<ResultPage<MovieSummary>, FetchError> {
        self.category_page(Category::Popular, page).await
    }

    async fn top_rated(&self, page: u32) -> Result<ResultPage<MovieSummary>, FetchError> {
        self.category_page(Category::TopRated, page).await
    }

    async fn upcoming(&self, page: u32) -> Result<ResultPage<MovieSummary>, FetchError> {
        self.category_page(Category::Upcoming, page).await
    }
}
