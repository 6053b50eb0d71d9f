//! Parse transaction API responses into typed records.
//!
//! A page body looks like:
//! {"page": 1, "totalCount": 38, "transactions": [
//!     {"Date": "2013-12-22", "Ledger": "Phone & Internet Expense",
//!      "Amount": "-110.71", "Company": "SHAW CABLESYSTEMS CALGARY AB"}, ...]}

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use tally_core::TransactionRecord;

use crate::types::{Page, PageError};

#[derive(Deserialize)]
struct RawPage {
    page: Option<u64>,
    #[serde(rename = "totalCount")]
    total_count: Option<u64>,
    transactions: Option<Vec<Value>>,
}

/// Decode a full page body. Individual bad transactions are dropped;
/// a missing or mistyped top-level field fails the whole page.
pub fn parse_page(body: &str) -> Result<Page, PageError> {
    let raw: RawPage =
        serde_json::from_str(body).map_err(|e| PageError::Malformed(e.to_string()))?;

    let transactions = raw
        .transactions
        .ok_or(PageError::MissingField("transactions"))?;
    let total_count = raw
        .total_count
        .ok_or(PageError::MissingField("totalCount"))?;
    let page_number = raw.page.ok_or(PageError::MissingField("page"))?;

    Ok(Page {
        page_number,
        total_count,
        records: parse_transactions(&transactions),
        entries: transactions.len(),
    })
}

/// Parse every transaction object, skipping the ones that are incomplete
/// or carry a non-numeric amount.
pub fn parse_transactions(values: &[Value]) -> Vec<TransactionRecord> {
    values.iter().filter_map(parse_transaction).collect()
}

/// Parse a single transaction object.
pub fn parse_transaction(value: &Value) -> Option<TransactionRecord> {
    match decode(value) {
        Ok(record) => Some(record),
        Err(reason) => {
            tracing::debug!("dropping transaction ({reason}): {value}");
            None
        }
    }
}

fn decode(value: &Value) -> Result<TransactionRecord, &'static str> {
    let obj = value.as_object().ok_or("not an object")?;

    let date = text_field(obj, "Date")?;
    let ledger = text_field(obj, "Ledger")?;
    let company = text_field(obj, "Company")?;
    let amount = obj.get("Amount").ok_or("missing Amount")?;

    let amount = parse_amount(amount).ok_or("non-numeric Amount")?;

    Ok(TransactionRecord::new(date, ledger, amount, company))
}

fn text_field<'a>(
    obj: &'a serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, &'static str> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err("field is not a string"),
        None => Err("missing field"),
    }
}

/// Amounts arrive either as strings (`"-100.81"`) or bare JSON numbers.
/// Both go straight to a decimal without passing through `f64`.
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
