use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::credentials::CredentialStore;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub display: DisplayOptions,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// ISO 639-1 language tag forwarded as the `language` parameter
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub include_adult: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayOptions {
    #[serde(default = "default_cast_limit")]
    pub cast_limit: usize,
    #[serde(default = "default_home_limit")]
    pub home_limit: usize,
    #[serde(default)]
    pub show_image_urls: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct WatchlistConfig {
    /// Overrides the default storage directory under the data dir
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

/// Everything the API client needs, with environment overrides applied
#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub api_key: String,
    pub base_url: String,
    pub language: Option<String>,
    pub include_adult: bool,
    pub request_timeout: Duration,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_cast_limit() -> usize {
    8
}

fn default_home_limit() -> usize {
    6
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: None,
            include_adult: false,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            cast_limit: default_cast_limit(),
            home_limit: default_home_limit(),
            show_image_urls: false,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.tmdb.base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow::anyhow!("tmdb.base_url cannot be empty"));
        }
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(anyhow::anyhow!("tmdb.base_url must be an http(s) URL: {}", base_url));
        }
        if self.tmdb.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("tmdb.request_timeout_secs must be greater than zero"));
        }
        if let Some(ref language) = self.tmdb.language {
            if language.trim().is_empty() {
                return Err(anyhow::anyhow!("tmdb.language cannot be blank; remove it to use the API default"));
            }
        }
        if self.display.cast_limit == 0 {
            return Err(anyhow::anyhow!("display.cast_limit must be greater than zero"));
        }
        Ok(())
    }

    /// Resolve client settings. `TMDB_API_KEY` and `TMDB_BASE_URL` take
    /// precedence over the credential store and config file.
    pub fn tmdb_settings(&self, credentials: &CredentialStore) -> anyhow::Result<TmdbSettings> {
        self.tmdb_settings_with_env(
            credentials,
            std::env::var("TMDB_API_KEY").ok(),
            std::env::var("TMDB_BASE_URL").ok(),
        )
    }

    fn tmdb_settings_with_env(
        &self,
        credentials: &CredentialStore,
        env_api_key: Option<String>,
        env_base_url: Option<String>,
    ) -> anyhow::Result<TmdbSettings> {
        let api_key = env_api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| credentials.get_tmdb_api_key().cloned())
            .ok_or_else(|| {
                anyhow::anyhow!("No TMDB API key configured. Run `cinedex config tmdb` or set TMDB_API_KEY")
            })?;

        let base_url = env_base_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.tmdb.base_url.clone());

        Ok(TmdbSettings {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: self.tmdb.language.clone(),
            include_adult: self.tmdb.include_adult,
            request_timeout: Duration::from_secs(self.tmdb.request_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            tmdb: TmdbConfig {
                base_url: "https://example.test/3".to_string(),
                language: Some("de-DE".to_string()),
                include_adult: false,
                request_timeout_secs: 10,
            },
            display: DisplayOptions {
                cast_limit: 4,
                ..DisplayOptions::default()
            },
            watchlist: WatchlistConfig::default(),
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.tmdb.base_url, "https://example.test/3");
        assert_eq!(loaded.tmdb.language.as_deref(), Some("de-DE"));
        assert_eq!(loaded.tmdb.request_timeout_secs, 10);
        assert_eq!(loaded.display.cast_limit, 4);
        assert_eq!(loaded.display.home_limit, 6);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[tmdb]\ninclude_adult = true\n").unwrap();
        assert!(config.tmdb.include_adult);
        assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.display.cast_limit, 8);
        assert!(config.watchlist.storage_dir.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.tmdb.base_url = "ftp://example.test".to_string();
        assert!(config.validate().is_err());

        config.tmdb.base_url = DEFAULT_BASE_URL.to_string();
        config.tmdb.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.tmdb.request_timeout_secs = 30;
        config.tmdb.language = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tmdb_settings_precedence() {
        let config = Config::default();
        let mut credentials = CredentialStore::new(PathBuf::from("/tmp/unused"));

        assert!(config.tmdb_settings_with_env(&credentials, None, None).is_err());

        credentials.set_tmdb_api_key("stored".to_string());
        let settings = config.tmdb_settings_with_env(&credentials, None, None).unwrap();
        assert_eq!(settings.api_key, "stored");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);

        let settings = config
            .tmdb_settings_with_env(
                &credentials,
                Some("from-env".to_string()),
                Some("http://localhost:8080/3/".to_string()),
            )
            .unwrap();
        assert_eq!(settings.api_key, "from-env");
        assert_eq!(settings.base_url, "http://localhost:8080/3");
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }
}
