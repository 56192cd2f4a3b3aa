use async_trait::async_trait;
use cinedex_config::TmdbSettings;
use cinedex_models::{Category, MovieDetail, MovieSummary, ResultPage};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::dedup::RequestDeduplicator;
use crate::error::FetchError;
use crate::request_key::RequestKey;
use crate::tmdb::api::{self, Endpoint};
use crate::traits::MovieCatalog;
use crate::transport::{HttpTransport, ReqwestTransport};

#[derive(Clone)]
pub struct TmdbClient {
    transport: Arc<dyn HttpTransport>,
    dedup: Arc<RequestDeduplicator<serde_json::Value>>,
    api_key: String,
    base_url: String,
    language: Option<String>,
    include_adult: bool,
}

impl TmdbClient {
    /// Client backed by reqwest with its own request deduplicator
    pub fn new(settings: &TmdbSettings) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(settings.request_timeout)?;
        Ok(Self::with_transport(
            settings,
            Arc::new(transport),
            Arc::new(RequestDeduplicator::new()),
        ))
    }

    /// A deduplicator may be shared between clients; keys carry the full URL,
    /// so clients pointed at different hosts never merge requests.
    pub fn with_transport(
        settings: &TmdbSettings,
        transport: Arc<dyn HttpTransport>,
        dedup: Arc<RequestDeduplicator<serde_json::Value>>,
    ) -> Self {
        Self {
            transport,
            dedup,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            language: settings.language.clone(),
            include_adult: settings.include_adult,
        }
    }

    pub fn deduplicator(&self) -> &Arc<RequestDeduplicator<serde_json::Value>> {
        &self.dedup
    }

    /// Issue a GET through the deduplicator and decode the shared JSON value.
    ///
    /// The request key is the full URL plus sorted parameters. The API key is
    /// appended after the key is built, so it never appears in keys or logs.
    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, FetchError> {
        let Endpoint { path, mut params } = endpoint;
        if let Some(ref language) = self.language {
            params.push(("language".to_string(), language.clone()));
        }

        let url = format!("{}{}", self.base_url, path);
        let key = RequestKey::new(&url, &params);
        let mut query = params;
        query.push(("api_key".to_string(), self.api_key.clone()));

        let transport = Arc::clone(&self.transport);
        let value = self
            .dedup
            .fetch(key.clone(), move || async move { transport.get_json(&url, &query).await })
            .await
            .map_err(|e| {
                warn!(key = %key, error = %e, "TMDB request failed");
                e
            })?;

        debug!(key = %key, "TMDB request succeeded");
        serde_json::from_value(value).map_err(|e| {
            warn!(key = %key, error = %e, "TMDB response did not match the expected shape");
            FetchError::from(e)
        })
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    fn catalog_name(&self) -> &str {
        "tmdb"
    }

    async fn category_page(&self, category: Category, page: u32) -> Result<ResultPage<MovieSummary>, FetchError> {
        self.get(api::category(category, page)).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<ResultPage<MovieSummary>, FetchError> {
        self.get(api::search_movies(query, page, self.include_adult)).await
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail, FetchError> {
        self.get(api::movie_details(movie_id)).await
    }

    async fn by_genre(&self, genre_id: u64, page: u32) -> Result<ResultPage<MovieSummary>, FetchError> {
        self.get(api::discover_by_genre(genre_id, page)).await
    }
}
