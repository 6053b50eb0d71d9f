//! tally-ingest: decoding of transaction API page bodies into typed records.

pub mod parser;
pub mod types;

pub use parser::{parse_amount, parse_page, parse_transaction, parse_transactions};
pub use types::{Page, PageError};
