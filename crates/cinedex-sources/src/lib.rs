pub mod dedup;
pub mod error;
pub mod request_key;
pub mod tmdb;
pub mod traits;
pub mod transport;

pub use dedup::{PendingFetch, RequestDeduplicator};
pub use error::FetchError;
pub use request_key::RequestKey;
pub use tmdb::TmdbClient;
pub use traits::MovieCatalog;
pub use transport::{HttpTransport, ReqwestTransport};
