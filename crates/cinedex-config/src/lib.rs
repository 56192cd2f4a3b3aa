pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, DisplayOptions, TmdbConfig, TmdbSettings, WatchlistConfig, DEFAULT_BASE_URL};
pub use credentials::CredentialStore;
pub use paths::{PathManager, base_path_override};
