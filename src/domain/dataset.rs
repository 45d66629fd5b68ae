//! Memoized access to the filtered sample dataset.
//!
//! The source is read at most once per process: the first successful call to
//! [`DatasetProvider::rows`] stores the filtered rows and every later call
//! hands out the same [`Arc`].

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::domain::error::LinedeckError;
use crate::domain::stock_row::StockRow;
use crate::ports::dataset_port::DatasetPort;

/// Rows dated on or before this day are dropped.
pub fn default_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2004, 1, 1).unwrap_or_default()
}

/// Keep rows strictly after `cutoff`, preserving source order.
pub fn filter_after(rows: Vec<StockRow>, cutoff: NaiveDate) -> Vec<StockRow> {
    rows.into_iter().filter(|r| r.date > cutoff).collect()
}

pub struct DatasetProvider {
    source: Box<dyn DatasetPort + Send + Sync>,
    cutoff: NaiveDate,
    cached: Mutex<Option<Arc<Vec<StockRow>>>>,
}

impl DatasetProvider {
    pub fn new(source: Box<dyn DatasetPort + Send + Sync>, cutoff: NaiveDate) -> Self {
        Self {
            source,
            cutoff,
            cached: Mutex::new(None),
        }
    }

    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    /// Filtered rows, loading them on first use.
    ///
    /// A failed load leaves the cache empty so the next call retries.
    pub fn rows(&self) -> Result<Arc<Vec<StockRow>>, LinedeckError> {
        let mut cached = self.cached.lock().map_err(|_| LinedeckError::Dataset {
            reason: "dataset cache lock poisoned".into(),
        })?;

        if let Some(rows) = cached.as_ref() {
            tracing::debug!(rows = rows.len(), "dataset cache hit");
            return Ok(Arc::clone(rows));
        }

        tracing::info!(source = %self.source.describe(), cutoff = %self.cutoff, "loading dataset");
        let raw = self.source.load()?;
        let total = raw.len();
        let rows = Arc::new(filter_after(raw, self.cutoff));
        tracing::info!(total, kept = rows.len(), "dataset loaded");

        *cached = Some(Arc::clone(&rows));
        Ok(rows)
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.lock().map(|c| c.is_some()).unwrap_or(false)
    }
}

/// Shape of the loaded dataset, shown alongside the sample table.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DatasetSummary {
    pub row_count: usize,
    /// Distinct symbols in order of first appearance.
    pub symbols: Vec<String>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl DatasetSummary {
    pub fn of(rows: &[StockRow]) -> Self {
        let mut symbols: Vec<String> = Vec::new();
        for row in rows {
            if !symbols.iter().any(|s| s == &row.symbol) {
                symbols.push(row.symbol.clone());
            }
        }
        Self {
            row_count: rows.len(),
            symbols,
            first_date: rows.iter().map(|r| r.date).min(),
            last_date: rows.iter().map(|r| r.date).max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct CountingSource {
        rows: Vec<StockRow>,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl DatasetPort for CountingSource {
        fn load(&self) -> Result<Vec<StockRow>, LinedeckError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LinedeckError::Dataset {
                    reason: "offline".into(),
                });
            }
            Ok(self.rows.clone())
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    fn sample_rows() -> Vec<StockRow> {
        vec![
            StockRow::new(date(2003, 12, 1), "MSFT", 22.46),
            StockRow::new(date(2004, 1, 1), "MSFT", 22.69),
            StockRow::new(date(2004, 2, 1), "MSFT", 21.77),
            StockRow::new(date(2004, 2, 1), "AMZN", 43.01),
            StockRow::new(date(2003, 12, 1), "AMZN", 52.62),
            StockRow::new(date(2004, 3, 1), "AMZN", 43.28),
        ]
    }

    fn provider(fail: bool) -> (DatasetProvider, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            rows: sample_rows(),
            calls: Arc::clone(&calls),
            fail,
        };
        (DatasetProvider::new(Box::new(source), default_cutoff()), calls)
    }

    #[test]
    fn cutoff_day_itself_is_dropped() {
        let kept = filter_after(sample_rows(), default_cutoff());
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|r| r.date > date(2004, 1, 1)));
    }

    #[test]
    fn filter_preserves_source_order() {
        let kept = filter_after(sample_rows(), default_cutoff());
        let symbols: Vec<&str> = kept.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["MSFT", "AMZN", "AMZN"]);
    }

    #[test]
    fn rows_are_memoized() {
        let (provider, calls) = provider(false);
        assert!(!provider.is_loaded());

        let first = provider.rows().unwrap();
        let second = provider.rows().unwrap();

        assert!(provider.is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let (provider, calls) = provider(true);
        assert!(provider.rows().is_err());
        assert!(provider.rows().is_err());
        assert!(!provider.is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn summary_lists_symbols_in_data_order() {
        let rows = filter_after(sample_rows(), default_cutoff());
        let summary = DatasetSummary::of(&rows);
        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.symbols, vec!["MSFT", "AMZN"]);
        assert_eq!(summary.first_date, Some(date(2004, 2, 1)));
        assert_eq!(summary.last_date, Some(date(2004, 3, 1)));
    }

    #[test]
    fn summary_of_empty_dataset() {
        let summary = DatasetSummary::of(&[]);
        assert_eq!(summary.row_count, 0);
        assert!(summary.symbols.is_empty());
        assert_eq!(summary.first_date, None);
    }

    proptest! {
        #[test]
        fn filter_keeps_exactly_rows_after_cutoff(
            offsets in proptest::collection::vec(-2000i64..2000, 0..64),
            cutoff_offset in -500i64..500,
        ) {
            let base = date(2004, 1, 1);
            let cutoff = base + chrono::Duration::days(cutoff_offset);
            let rows: Vec<StockRow> = offsets
                .iter()
                .map(|o| StockRow::new(base + chrono::Duration::days(*o), "IBM", 1.0))
                .collect();
            let expected = rows.iter().filter(|r| r.date > cutoff).count();

            let kept = filter_after(rows, cutoff);

            prop_assert_eq!(kept.len(), expected);
            prop_assert!(kept.iter().all(|r| r.date > cutoff));
        }
    }
}
