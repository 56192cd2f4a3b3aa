pub mod discover;
pub mod pagination;
pub mod search;
pub mod storage;
pub mod watchlist;

pub use discover::{fetch_home, fetch_listing, MovieListing, MovieQuery};
pub use pagination::{PageWindow, visible_pages};
pub use search::SearchSession;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use watchlist::{WatchlistError, WatchlistStore, WATCHLIST_STORAGE_KEY};
