//! tally-fetch: paginated transaction pulls over HTTP with bounded retries

pub mod config;
pub mod error;
pub mod fetcher;
pub mod puller;
pub mod transport;

pub use config::FetchConfig;
pub use error::FetchError;
pub use fetcher::PageFetcher;
pub use puller::{PageProgress, pull_all, pull_all_with};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
