//! Data access port trait.
//!
//! Implementations are responsible for delivering a clean series: sorted by
//! date, deduplicated, with positive closes. The domain core assumes this
//! and does not re-validate.

use crate::domain::error::QuantbtError;
use crate::domain::series::PricePoint;

pub trait DataPort {
    fn fetch_prices(&self, ticker: &str) -> Result<Vec<PricePoint>, QuantbtError>;

    fn list_tickers(&self) -> Result<Vec<String>, QuantbtError>;
}
