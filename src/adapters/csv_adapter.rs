//! CSV file data adapter.
//!
//! Reads one `<TICKER>.csv` file per ticker from a base directory. Expected
//! columns: date (`YYYY-MM-DD`), close. Rows are sorted by date and
//! duplicate dates collapsed before the series is handed to the domain.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::error::QuantbtError;
use crate::domain::series::PricePoint;
use crate::ports::data_port::DataPort;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

impl DataPort for CsvDataAdapter {
    fn fetch_prices(&self, ticker: &str) -> Result<Vec<PricePoint>, QuantbtError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| QuantbtError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| QuantbtError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| QuantbtError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                QuantbtError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            let close: f64 = record
                .get(1)
                .ok_or_else(|| QuantbtError::Data {
                    reason: "missing close column".into(),
                })?
                .parse()
                .map_err(|e| QuantbtError::Data {
                    reason: format!("invalid close value: {}", e),
                })?;

            points.push(PricePoint::new(date, close));
        }

        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Ok(points)
    }

    fn list_tickers(&self) -> Result<Vec<String>, QuantbtError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| QuantbtError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| QuantbtError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(ticker) = name_str.strip_suffix(".csv") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}
