use tally_core::TransactionRecord;
use thiserror::Error;

/// One decoded response from the transactions endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page number echoed back by the server
    pub page_number: u64,
    /// Server's claimed record count across all pages
    pub total_count: u64,
    /// Records that parsed cleanly, in server order
    pub records: Vec<TransactionRecord>,
    /// Raw entries in the `transactions` array, including dropped ones
    pub entries: usize,
}

impl Page {
    /// Number of entries that could not be turned into records
    pub fn dropped(&self) -> usize {
        self.entries.saturating_sub(self.records.len())
    }
}

/// Failure to decode a page body. Always fatal for the pull.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("the response is missing the `{0}` field")]
    MissingField(&'static str),

    #[error("the response body is not a valid page: {0}")]
    Malformed(String),
}
