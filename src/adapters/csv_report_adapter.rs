//! CSV summary report adapter.
//!
//! Writes one row per ticker with the three headline metrics. Undefined
//! metrics are written as empty fields so downstream tooling can tell
//! "no value" apart from zero.

use std::path::Path;

use crate::domain::error::QuantbtError;
use crate::ports::report_port::{ReportPort, TickerSummary};

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    fn format_metric(value: Option<f64>) -> String {
        value.map(|v| format!("{v:.6}")).unwrap_or_default()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_summary(
        &self,
        rows: &[TickerSummary],
        output_path: &Path,
    ) -> Result<(), QuantbtError> {
        let mut writer = csv::Writer::from_path(output_path).map_err(|e| QuantbtError::Data {
            reason: format!("failed to open {}: {}", output_path.display(), e),
        })?;

        writer
            .write_record(["ticker", "sharpe_ratio", "final_return", "max_drawdown"])
            .map_err(|e| QuantbtError::Data {
                reason: format!("CSV write error: {}", e),
            })?;

        for row in rows {
            writer
                .write_record([
                    row.ticker.clone(),
                    Self::format_metric(row.metrics.sharpe_ratio),
                    Self::format_metric(row.metrics.final_return),
                    Self::format_metric(row.metrics.max_drawdown),
                ])
                .map_err(|e| QuantbtError::Data {
                    reason: format!("CSV write error: {}", e),
                })?;
        }

        writer.flush()?;
        Ok(())
    }
}
