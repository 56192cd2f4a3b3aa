use cinedex_models::MovieDetail;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key holding the serialized watchlist
pub const WATCHLIST_STORAGE_KEY: &str = "movie-watchlist";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WatchlistError {
    #[error("movie id must be a positive integer")]
    InvalidId,
}

/// The user's saved movies, unique by id, in insertion order.
///
/// Entries are kept exactly as they were when added and are never refreshed
/// from upstream. Every mutation writes the full collection back to storage
/// before returning. A failed write leaves the in-memory list authoritative
/// and is reported through [`WatchlistStore::last_persist_error`].
pub struct WatchlistStore {
    storage: Box<dyn KeyValueStorage>,
    entries: Vec<MovieDetail>,
    last_persist_error: Option<StorageError>,
}

impl WatchlistStore {
    /// Restore the watchlist from `storage`. Missing, unreadable or corrupt
    /// data yields an empty list.
    pub fn initialize(storage: Box<dyn KeyValueStorage>) -> Self {
        let entries = restore(storage.as_ref());
        Self {
            storage,
            entries,
            last_persist_error: None,
        }
    }

    /// Append `movie` unless its id is already saved.
    ///
    /// Returns `Ok(true)` when the movie was added and `Ok(false)` for a
    /// duplicate, which leaves the list and storage untouched.
    pub fn add(&mut self, movie: impl Into<MovieDetail>) -> Result<bool, WatchlistError> {
        let movie = movie.into();
        if movie.id == 0 {
            return Err(WatchlistError::InvalidId);
        }
        if self.contains(movie.id) {
            debug!("Movie {} already on watchlist", movie.id);
            return Ok(false);
        }

        info!("Adding movie {} ({}) to watchlist", movie.id, movie.title);
        self.entries.push(movie);
        self.persist();
        Ok(true)
    }

    /// Remove the entry with `movie_id` if present, then persist.
    pub fn remove(&mut self, movie_id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|m| m.id != movie_id);
        let removed = self.entries.len() != before;
        if removed {
            info!("Removed movie {} from watchlist", movie_id);
        }
        self.persist();
        removed
    }

    /// Remove `movie` if saved, add it otherwise. Returns whether it is saved
    /// afterwards.
    pub fn toggle(&mut self, movie: impl Into<MovieDetail>) -> Result<bool, WatchlistError> {
        let movie = movie.into();
        if self.contains(movie.id) {
            self.remove(movie.id);
            Ok(false)
        } else {
            self.add(movie)?;
            Ok(true)
        }
    }

    pub fn contains(&self, movie_id: u64) -> bool {
        self.entries.iter().any(|m| m.id == movie_id)
    }

    pub fn get(&self, movie_id: u64) -> Option<&MovieDetail> {
        self.entries.iter().find(|m| m.id == movie_id)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MovieDetail] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<u64> {
        self.entries.iter().map(|m| m.id).collect()
    }

    /// Serialize the full collection and overwrite the stored value
    pub fn save(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.entries).map_err(|source| StorageError::Serialize {
            key: WATCHLIST_STORAGE_KEY.to_string(),
            source,
        })?;
        self.storage.write(WATCHLIST_STORAGE_KEY, &json)?;
        debug!("Saved watchlist ({} movies)", self.entries.len());
        Ok(())
    }

    /// Error from the most recent save, cleared by the next successful one
    pub fn last_persist_error(&self) -> Option<&StorageError> {
        self.last_persist_error.as_ref()
    }

    fn persist(&mut self) {
        match self.save() {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!("Failed to save watchlist: {}. Changes are kept for this session only.", e);
                self.last_persist_error = Some(e);
            }
        }
    }
}

fn restore(storage: &dyn KeyValueStorage) -> Vec<MovieDetail> {
    let content = match storage.read(WATCHLIST_STORAGE_KEY) {
        Ok(Some(content)) => content,
        Ok(None) => {
            debug!("No saved watchlist, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read saved watchlist: {}. Starting empty.", e);
            return Vec::new();
        }
    };

    let stored: Vec<MovieDetail> = match serde_json::from_str(&content) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Saved watchlist is corrupt: {}. Starting empty.", e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let total = stored.len();
    let entries: Vec<MovieDetail> = stored.into_iter().filter(|m| seen.insert(m.id)).collect();
    if entries.len() != total {
        warn!("Dropped {} duplicate watchlist entries", total - entries.len());
    }

    info!("Loaded watchlist ({} movies)", entries.len());
    entries
}
