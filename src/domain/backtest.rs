//! Backtest engine: turns a position series into cost-adjusted returns.
//!
//! Pure transform over in-memory series; no I/O. Returns are realized with a
//! one-period execution lag: the position decided at period t-1 earns the
//! price move into period t. A trade is the implicit position change between
//! consecutive periods, charged at `transaction_cost` per unit of change (a
//! long/short flip has magnitude 2). No cost is charged at t = 0 or t = 1:
//! the change magnitude needs two full periods of position history, so the
//! very first entry is free under this boundary convention.

use chrono::NaiveDate;

use crate::domain::error::QuantbtError;
use crate::domain::series::PricePoint;
use crate::domain::signal::Position;

/// One aligned row of the backtest table. Per-period returns that are
/// undefined at the series boundary are `None`; the cumulative return is
/// defined at every period.
#[derive(Debug, Clone)]
pub struct ReturnRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub signal: Position,
    pub raw_return: Option<f64>,
    pub strategy_return: Option<f64>,
    pub transaction_cost: f64,
    pub net_return: Option<f64>,
    pub cumulative_return: f64,
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub records: Vec<ReturnRecord>,
}

impl BacktestResult {
    pub fn net_returns(&self) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.net_return).collect()
    }

    pub fn cumulative_returns(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.cumulative_return).collect()
    }
}

/// Run a backtest over an aligned (price, signal) pair.
///
/// The cumulative return is the running product of (1 + net return), seeded
/// at 1.0; an undefined net return compounds as zero change so a boundary
/// period never breaks the product.
pub fn run_backtest(
    prices: &[PricePoint],
    signal: &[Position],
    transaction_cost: f64,
) -> Result<BacktestResult, QuantbtError> {
    if prices.is_empty() {
        return Err(QuantbtError::DataShape {
            reason: "empty price series".into(),
        });
    }
    if signal.len() != prices.len() {
        return Err(QuantbtError::DataShape {
            reason: format!(
                "signal length {} does not match price series length {}",
                signal.len(),
                prices.len()
            ),
        });
    }

    let mut records = Vec::with_capacity(prices.len());
    let mut cumulative = 1.0_f64;

    for t in 0..prices.len() {
        let raw_return = (t > 0).then(|| prices[t].close / prices[t - 1].close - 1.0);
        let strategy_return = raw_return.map(|r| signal[t - 1].value() * r);

        let trade_magnitude = if t >= 2 {
            (signal[t - 1].value() - signal[t - 2].value()).abs()
        } else {
            0.0
        };
        let cost = trade_magnitude * transaction_cost;

        let net_return = strategy_return.map(|r| r - cost);
        cumulative *= 1.0 + net_return.unwrap_or(0.0);

        records.push(ReturnRecord {
            date: prices[t].date,
            close: prices[t].close,
            signal: signal[t],
            raw_return,
            strategy_return,
            transaction_cost: cost,
            net_return,
            cumulative_return: cumulative,
        });
    }

    Ok(BacktestResult { records })
}
