#![allow(dead_code)]

use std::collections::HashMap;

use chrono::NaiveDate;
use quantbt::domain::error::QuantbtError;
use quantbt::domain::series::PricePoint;
use quantbt::domain::strategy::{MomentumConfig, Strategy};
use quantbt::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, ticker: &str, prices: Vec<PricePoint>) -> Self {
        self.data.insert(ticker.to_string(), prices);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(&self, ticker: &str) -> Result<Vec<PricePoint>, QuantbtError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(QuantbtError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }

    fn list_tickers(&self) -> Result<Vec<String>, QuantbtError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_points(values: &[f64]) -> Vec<PricePoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PricePoint::new(
                date(2024, 1, 1) + chrono::Duration::days(i as i64),
                close,
            )
        })
        .collect()
}

/// Linearly trending close series.
pub fn trending_series(start: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}

pub fn momentum_strategy(window: usize, threshold: f64, min_hold: usize) -> Strategy {
    Strategy::Momentum(MomentumConfig {
        window,
        threshold,
        min_hold,
        vol_threshold: None,
        vol_window: window,
    })
}
