//! CSV file dataset adapter.
//!
//! Reads the vega-datasets `stocks.csv` layout: `symbol,date,price`, with
//! dates written either as `Jan 1 2000` or `2000-01-01`.

use chrono::NaiveDate;
use crate::domain::error::LinedeckError;
use crate::domain::stock_row::StockRow;
use crate::ports::dataset_port::DatasetPort;
use std::fs;
use std::path::PathBuf;

const DATE_FORMATS: [&str; 2] = ["%b %d %Y", "%Y-%m-%d"];

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    /// Parse CSV text. Columns are located by header name so their order
    /// does not matter.
    pub fn parse(content: &str) -> Result<Vec<StockRow>, LinedeckError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| LinedeckError::DatasetParse {
                line: 1,
                reason: format!("unreadable header: {}", e),
            })?
            .clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LinedeckError::DatasetParse {
                    line: 1,
                    reason: format!("missing {} column", name),
                })
        };
        let symbol_col = column("symbol")?;
        let date_col = column("date")?;
        let price_col = column("price")?;

        let mut rows = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| LinedeckError::DatasetParse {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: format!("CSV parse error: {}", e),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let field = |idx: usize, name: &str| {
                record.get(idx).ok_or_else(|| LinedeckError::DatasetParse {
                    line,
                    reason: format!("missing {} value", name),
                })
            };

            let symbol = field(symbol_col, "symbol")?.trim();
            let raw_date = field(date_col, "date")?;
            let date = Self::parse_date(raw_date).ok_or_else(|| LinedeckError::DatasetParse {
                line,
                reason: format!("invalid date: {}", raw_date),
            })?;
            let price: f64 = field(price_col, "price")?
                .trim()
                .parse()
                .map_err(|e| LinedeckError::DatasetParse {
                    line,
                    reason: format!("invalid price value: {}", e),
                })?;

            rows.push(StockRow::new(date, symbol, price));
        }

        Ok(rows)
    }
}

impl DatasetPort for CsvAdapter {
    fn load(&self) -> Result<Vec<StockRow>, LinedeckError> {
        let content = fs::read_to_string(&self.path).map_err(|e| LinedeckError::Dataset {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        Self::parse(&content)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
