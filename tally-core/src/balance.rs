//! Aggregation over a full set of pulled transactions.

use rust_decimal::Decimal;

use crate::record::{DailyBalance, TransactionRecord};

/// Sum of every transaction amount. Zero for an empty slice.
pub fn total_balance(records: &[TransactionRecord]) -> Decimal {
    records.iter().map(|r| r.amount()).sum()
}

/// Running balance at the end of each distinct transaction date.
///
/// Records are ordered by date text (stable, so same-day input order is kept),
/// then folded into one entry per date holding the cumulative sum of all
/// records dated on or before it. Output is ascending by date.
pub fn running_daily_balance(records: &[TransactionRecord]) -> Vec<DailyBalance> {
    let mut sorted: Vec<&TransactionRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.date().cmp(b.date()));

    let mut daily: Vec<DailyBalance> = Vec::new();
    let mut running = Decimal::ZERO;

    for record in sorted {
        running += record.amount();
        match daily.last_mut() {
            Some(last) if last.date == record.date() => last.running_balance = running,
            _ => daily.push(DailyBalance {
                date: record.date().to_string(),
                running_balance: running,
            }),
        }
    }

    daily
}
