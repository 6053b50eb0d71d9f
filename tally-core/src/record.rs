//! Record types for fetched transactions and computed balances

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single transaction as reported by the remote ledger API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Date text exactly as the server sent it (ISO `YYYY-MM-DD` sorts correctly)
    date: String,
    ledger: String,
    /// Positive = money in, negative = money out
    amount: Decimal,
    company: String,
}

impl TransactionRecord {
    /// Create a new TransactionRecord
    pub fn new(
        date: impl Into<String>,
        ledger: impl Into<String>,
        amount: Decimal,
        company: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            ledger: ledger.into(),
            amount,
            company: company.into(),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn ledger(&self) -> &str {
        &self.ledger
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn company(&self) -> &str {
        &self.company
    }
}

/// Cumulative balance of every transaction dated on or before `date`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyBalance {
    pub date: String,
    pub running_balance: Decimal,
}
