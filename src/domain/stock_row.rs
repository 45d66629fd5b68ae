//! Stock price row, the single entity of the sample dataset.

use chrono::NaiveDate;
use serde::Serialize;

/// One monthly closing price for one ticker symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRow {
    pub date: NaiveDate,
    pub symbol: String,
    pub price: f64,
}

impl StockRow {
    pub fn new(date: NaiveDate, symbol: impl Into<String>, price: f64) -> Self {
        Self {
            date,
            symbol: symbol.into(),
            price,
        }
    }
}
