//! Report generation port trait.

use std::path::Path;

use crate::domain::error::QuantbtError;
use crate::domain::metrics::Metrics;

/// Per-ticker metrics row of a robustness summary.
#[derive(Debug, Clone)]
pub struct TickerSummary {
    pub ticker: String,
    pub metrics: Metrics,
}

/// Port for persisting run summaries.
pub trait ReportPort {
    fn write_summary(&self, rows: &[TickerSummary], output_path: &Path)
        -> Result<(), QuantbtError>;
}
