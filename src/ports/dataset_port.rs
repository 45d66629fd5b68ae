//! Dataset source port trait.

use crate::domain::error::LinedeckError;
use crate::domain::stock_row::StockRow;

/// Source of the raw, unfiltered sample dataset.
pub trait DatasetPort {
    /// Reads every row in source order.
    fn load(&self) -> Result<Vec<StockRow>, LinedeckError>;

    /// Human-readable description of where rows come from, used in logs.
    fn describe(&self) -> String;
}
