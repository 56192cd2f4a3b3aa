use thiserror::Error;

/// Uniform failure for upstream requests.
///
/// `Clone` so that a single settlement can be handed to every caller waiting
/// on the same in-flight request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Upstream answered with a non-success status
    #[error("Failed to fetch data: API error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Failed to fetch data: {0}")]
    Transport(String),

    #[error("Failed to fetch data: could not decode response: {0}")]
    Decode(String),

    /// The task running the request panicked or was cancelled
    #[error("Failed to fetch data: request aborted: {0}")]
    Aborted(String),
}

impl FetchError {
    pub fn status(status: u16, reason: impl Into<String>) -> Self {
        FetchError::Status {
            status,
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return FetchError::Decode(e.to_string());
        }
        match e.status() {
            Some(status) => FetchError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ),
            None => FetchError::Transport(e.to_string()),
        }
    }
}
