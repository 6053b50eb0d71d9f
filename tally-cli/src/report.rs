//! Console rendering of the pulled balances.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tally_core::{DailyBalance, TransactionRecord, running_daily_balance, total_balance};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub records: usize,
    pub total_balance: Decimal,
    pub daily: Vec<DailyBalance>,
}

impl Report {
    pub fn build(records: &[TransactionRecord]) -> Self {
        Self {
            records: records.len(),
            total_balance: total_balance(records),
            daily: running_daily_balance(records),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("\n** total balance: {}\n\n", money(self.total_balance));
        for day in &self.daily {
            out.push_str(&format!(
                "date: {}\trunning balance: {}\n",
                day.date,
                money(day.running_balance)
            ));
        }
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Two decimal places, halves rounded away from zero.
pub fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(date: &str, amount: Decimal) -> TransactionRecord {
        TransactionRecord::new(date, "CIBC", amount, "Bench")
    }

    #[test]
    fn test_money() {
        assert_eq!(money(Decimal::new(2, 0)), "2.00");
        assert_eq!(money(Decimal::new(-10081, 2)), "-100.81");
        assert_eq!(money(Decimal::new(1005, 3)), "1.01");
        assert_eq!(money(Decimal::new(-1005, 3)), "-1.01");
        assert_eq!(money(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_render_text() {
        let records = vec![
            txn("2018-01-02", Decimal::new(-45, 1)),
            txn("2018-01-01", Decimal::new(15, 1)),
            txn("2018-01-02", Decimal::new(5, 0)),
        ];
        let text = Report::build(&records).render_text();

        assert_eq!(
            text,
            "\n** total balance: 2.00\n\n\
             date: 2018-01-01\trunning balance: 1.50\n\
             date: 2018-01-02\trunning balance: 2.00\n"
        );
    }

    #[test]
    fn test_render_json() {
        let report = Report::build(&[txn("2018-01-01", Decimal::new(15, 1))]);
        let value: serde_json::Value = serde_json::from_str(&report.render_json().unwrap()).unwrap();

        assert_eq!(value["records"], 1);
        assert_eq!(value["total_balance"], "1.5");
        assert_eq!(value["daily"][0]["date"], "2018-01-01");
    }

    #[test]
    fn test_empty_report() {
        let report = Report::build(&[]);
        assert_eq!(report.render_text(), "\n** total balance: 0.00\n\n");
    }
}
