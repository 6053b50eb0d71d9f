//! Pull every page of transactions, one request at a time.

use tally_core::TransactionRecord;

use crate::error::FetchError;
use crate::fetcher::PageFetcher;
use crate::transport::Transport;

/// Reported once per fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    pub page_number: u64,
    /// Records kept from this page
    pub records: usize,
    /// Entries on this page that failed to parse
    pub dropped: usize,
}

/// Pull all pages, logging progress through `tracing`.
pub async fn pull_all<T: Transport>(
    fetcher: &PageFetcher<T>,
) -> Result<Vec<TransactionRecord>, FetchError> {
    pull_all_with(fetcher, |p| {
        tracing::info!("read page {} with {} records", p.page_number, p.records);
    })
    .await
}

/// Pull pages starting at 1 until the server's `totalCount` is reached.
///
/// Completion is measured in raw entries received, so records dropped
/// during parsing never push the loop past the last page. Every page must
/// repeat the first page's `totalCount`.
pub async fn pull_all_with<T: Transport>(
    fetcher: &PageFetcher<T>,
    mut on_page: impl FnMut(&PageProgress),
) -> Result<Vec<TransactionRecord>, FetchError> {
    let mut records = Vec::new();
    let mut total_count: Option<u64> = None;
    let mut entries_read: u64 = 0;
    let mut page_number: u64 = 1;

    loop {
        let page = fetcher.fetch_page(page_number).await?;

        let expected = *total_count.get_or_insert(page.total_count);
        if page.total_count != expected {
            return Err(FetchError::TotalCountMismatch {
                page: page_number,
                expected,
                found: page.total_count,
            });
        }

        on_page(&PageProgress {
            page_number: page.page_number,
            records: page.records.len(),
            dropped: page.dropped(),
        });

        entries_read += page.entries as u64;
        let empty = page.entries == 0;
        records.extend(page.records);

        if entries_read >= expected {
            break;
        }
        if empty {
            return Err(FetchError::Stalled {
                page: page_number,
                read: entries_read,
                total: expected,
            });
        }

        page_number += 1;
    }

    tracing::debug!(
        "pulled {} records across {} pages",
        records.len(),
        page_number
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::transport::scripted::ScriptedTransport;
    use crate::transport::{RawResponse, TransportError};
    use rust_decimal::Decimal;
    use serde_json::{Value, json};

    fn txn(amount: &str) -> Value {
        json!({
            "Date": "2013-12-13",
            "Ledger": "Insurance Expense",
            "Amount": amount,
            "Company": "Bench"
        })
    }

    fn page(page: u64, total: u64, transactions: Vec<Value>) -> Result<RawResponse, TransportError> {
        Ok(RawResponse::ok(
            json!({"page": page, "totalCount": total, "transactions": transactions}).to_string(),
        ))
    }

    fn fetcher(replies: Vec<Result<RawResponse, TransportError>>) -> PageFetcher<ScriptedTransport> {
        let config = FetchConfig {
            url_template: "http://test.invalid/{page}.json".to_string(),
            ..FetchConfig::default()
        };
        PageFetcher::with_transport(config, ScriptedTransport::new(replies)).unwrap()
    }

    #[tokio::test]
    async fn test_pull_two_pages() {
        let f = fetcher(vec![
            page(1, 2, vec![txn("-100.81")]),
            page(2, 2, vec![txn("-5.43")]),
        ]);
        let records = pull_all(&f).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount(), Decimal::new(-10081, 2));
        assert_eq!(records[1].amount(), Decimal::new(-543, 2));
        assert_eq!(
            f.transport().calls(),
            vec!["http://test.invalid/1.json", "http://test.invalid/2.json"]
        );
    }

    #[tokio::test]
    async fn test_pull_empty_dataset() {
        let f = fetcher(vec![page(1, 0, vec![])]);
        let records = pull_all(&f).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(f.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_progress_is_reported_per_page() {
        let f = fetcher(vec![
            page(1, 3, vec![txn("1"), txn("oops")]),
            page(2, 3, vec![txn("2")]),
        ]);
        let mut seen = Vec::new();
        let records = pull_all_with(&f, |p| seen.push(*p)).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            seen,
            vec![
                PageProgress { page_number: 1, records: 1, dropped: 1 },
                PageProgress { page_number: 2, records: 1, dropped: 0 },
            ]
        );
    }

    #[tokio::test]
    async fn test_dropped_records_do_not_request_extra_pages() {
        let f = fetcher(vec![page(1, 2, vec![txn("1"), txn("n/a")])]);
        let records = pull_all(&f).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(f.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_mismatching_total_count() {
        let f = fetcher(vec![
            page(1, 3, vec![txn("1")]),
            page(2, 4, vec![txn("2")]),
        ]);
        let err = pull_all(&f).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::TotalCountMismatch { page: 2, expected: 3, found: 4 }
        ));
    }

    #[tokio::test]
    async fn test_empty_page_before_total_is_reached() {
        let f = fetcher(vec![page(1, 5, vec![txn("1")]), page(2, 5, vec![])]);
        let err = pull_all(&f).await.unwrap_err();
        assert!(matches!(err, FetchError::Stalled { page: 2, read: 1, total: 5 }));
    }

    #[tokio::test]
    async fn test_fetch_error_stops_the_pull() {
        let f = fetcher(vec![
            page(1, 2, vec![txn("1")]),
            Err(TransportError::Connect("refused".into())),
            Err(TransportError::Connect("refused".into())),
        ]);
        let err = pull_all(&f).await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_retry_inside_pull_is_invisible() {
        let f = fetcher(vec![
            page(1, 2, vec![txn("1")]),
            Err(TransportError::Timeout),
            page(2, 2, vec![txn("2")]),
        ]);
        let records = pull_all(&f).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(f.transport().calls().len(), 3);
    }
}
