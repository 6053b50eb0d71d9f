//! tally-core: transaction records and balance aggregation

pub mod balance;
pub mod record;

pub use balance::{running_daily_balance, total_balance};
pub use record::{DailyBalance, TransactionRecord};
