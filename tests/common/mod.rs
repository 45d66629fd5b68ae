#![allow(dead_code)]

use chrono::NaiveDate;
use linedeck::domain::dataset::{DatasetProvider, default_cutoff};
use linedeck::domain::error::LinedeckError;
pub use linedeck::domain::stock_row::StockRow;
use linedeck::ports::dataset_port::DatasetPort;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct MockDatasetPort {
    pub rows: Vec<StockRow>,
    pub error: Option<String>,
    pub loads: Arc<AtomicUsize>,
}

impl MockDatasetPort {
    pub fn new(rows: Vec<StockRow>) -> Self {
        Self {
            rows,
            error: None,
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            rows: Vec::new(),
            error: Some(reason.to_string()),
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn load_count(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.loads)
    }
}

impl DatasetPort for MockDatasetPort {
    fn load(&self) -> Result<Vec<StockRow>, LinedeckError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some(reason) => Err(LinedeckError::Dataset {
                reason: reason.clone(),
            }),
            None => Ok(self.rows.clone()),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_row(symbol: &str, date: &str, price: f64) -> StockRow {
    StockRow::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        symbol,
        price,
    )
}

/// Two symbols, one month each side of the default cutoff plus the cutoff day.
pub fn sample_rows() -> Vec<StockRow> {
    vec![
        make_row("MSFT", "2003-12-01", 22.46),
        make_row("MSFT", "2004-01-01", 22.69),
        make_row("MSFT", "2004-02-01", 21.77),
        make_row("MSFT", "2004-03-01", 20.46),
        make_row("AMZN", "2003-12-01", 52.62),
        make_row("AMZN", "2004-01-01", 50.40),
        make_row("AMZN", "2004-02-01", 43.01),
        make_row("AMZN", "2004-03-01", 43.28),
    ]
}

pub fn sample_provider() -> DatasetProvider {
    DatasetProvider::new(Box::new(MockDatasetPort::new(sample_rows())), default_cutoff())
}

pub fn filtered_rows() -> Arc<Vec<StockRow>> {
    sample_provider().rows().unwrap()
}
