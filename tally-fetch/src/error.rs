use tally_ingest::PageError;
use thiserror::Error;

use crate::transport::TransportError;

/// Reasons a pull cannot complete.
///
/// Every variant is fatal for the pull; transient transport failures only
/// surface here once the retry budget is spent.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid fetch configuration: {0}")]
    Config(String),

    #[error("GET {url} failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last: TransportError,
    },

    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("the server responded to {url} with status {status}")]
    Status { url: String, status: u16 },

    #[error("the response from {url} is missing the `{field}` field")]
    MissingField { url: String, field: &'static str },

    #[error("the response from {url} could not be decoded: {reason}")]
    MalformedBody { url: String, reason: String },

    #[error("asked for page {requested}, but the server responded with page {received}")]
    PageMismatch { requested: u64, received: u64 },

    #[error("total count on page {page} is {found}, but the first page reported {expected}")]
    TotalCountMismatch { page: u64, expected: u64, found: u64 },

    #[error("page {page} was empty after {read} of {total} records")]
    Stalled { page: u64, read: u64, total: u64 },
}

impl FetchError {
    /// True when the failure came from the network rather than the content.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::RetriesExhausted { .. })
    }

    pub(crate) fn from_page_error(url: &str, err: PageError) -> Self {
        match err {
            PageError::MissingField(field) => FetchError::MissingField {
                url: url.to_string(),
                field,
            },
            PageError::Malformed(reason) => FetchError::MalformedBody {
                url: url.to_string(),
                reason,
            },
        }
    }
}
