use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;

/// The network boundary. Everything above it works with decoded JSON values.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url` with `query` appended and decode the body as JSON.
    ///
    /// Non-success statuses become `FetchError::Status`; bodies that are not
    /// JSON become `FetchError::Decode`.
    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<serde_json::Value, FetchError>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Transport with a per-request timeout. Timeouts surface as
    /// `FetchError::Transport`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cinedex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

/// Upstream error bodies look like `{"status_code": 34, "status_message": "..."}`
fn upstream_status_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json["status_message"].as_str().map(|s| s.to_string())
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(url = %url, status = %status, "upstream returned error status");
            let canonical = status.canonical_reason().unwrap_or("Unknown");
            let reason = match upstream_status_message(&body) {
                Some(message) => format!("{} - {}", canonical, message),
                None => canonical.to_string(),
            };
            return Err(FetchError::status(status.as_u16(), reason));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
