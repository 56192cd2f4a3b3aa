use cinedex_config::{Config, CredentialStore, PathManager};
use cinedex_core::{FileStorage, KeyValueStorage, MemoryStorage, WatchlistStore};
use cinedex_sources::TmdbClient;
use color_eyre::Result;
use tracing::debug;

/// Paths and configuration shared by the commands that talk to TMDB or the
/// watchlist
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    ephemeral: bool,
}

impl AppContext {
    pub fn load(ephemeral: bool) -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        Ok(Self {
            paths,
            config,
            ephemeral,
        })
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        load_credentials(&self.paths)
    }

    pub fn catalog(&self) -> Result<TmdbClient> {
        let credentials = self.credentials()?;
        let settings = self
            .config
            .tmdb_settings(&credentials)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        debug!("Using TMDB at {}", settings.base_url);
        TmdbClient::new(&settings).map_err(|e| color_eyre::eyre::eyre!("Failed to create TMDB client: {}", e))
    }

    pub fn storage(&self) -> Box<dyn KeyValueStorage> {
        if self.ephemeral {
            debug!("Using in-memory watchlist storage");
            return Box::new(MemoryStorage::new());
        }
        match &self.config.watchlist.storage_dir {
            Some(dir) => Box::new(FileStorage::new(dir.clone())),
            None => Box::new(FileStorage::from_paths(&self.paths)),
        }
    }

    pub fn watchlist(&self) -> WatchlistStore {
        WatchlistStore::initialize(self.storage())
    }
}

pub fn load_credentials(paths: &PathManager) -> Result<CredentialStore> {
    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;
    Ok(credentials)
}
