//! Summary risk metrics over a backtest's return series.
//!
//! Degenerate inputs (empty series, zero-variance returns) yield `None`
//! rather than NaN so a ranking collaborator can exclude them explicitly.

use crate::domain::backtest::BacktestResult;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown: Option<f64>,
    pub final_return: Option<f64>,
}

impl Metrics {
    pub fn compute(net_returns: &[Option<f64>], cumulative_returns: &[f64]) -> Self {
        Metrics {
            sharpe_ratio: compute_sharpe(net_returns),
            max_drawdown: compute_max_drawdown(cumulative_returns),
            final_return: cumulative_returns.last().copied(),
        }
    }

    pub fn from_result(result: &BacktestResult) -> Self {
        Self::compute(&result.net_returns(), &result.cumulative_returns())
    }
}

/// Annualized mean-to-volatility ratio over the defined net returns, using
/// the sample standard deviation. Undefined with fewer than two defined
/// entries or zero variance.
fn compute_sharpe(net_returns: &[Option<f64>]) -> Option<f64> {
    let defined: Vec<f64> = net_returns.iter().filter_map(|r| *r).collect();
    if defined.len() < 2 {
        return None;
    }

    let n = defined.len() as f64;
    let mean = defined.iter().sum::<f64>() / n;
    let variance = defined.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        Some(mean / stddev * TRADING_DAYS_PER_YEAR.sqrt())
    } else {
        None
    }
}

/// Largest peak-to-trough decline of the equity curve, as a value in
/// [-1, 0]. Undefined for an empty curve.
fn compute_max_drawdown(cumulative: &[f64]) -> Option<f64> {
    let first = *cumulative.first()?;

    let mut peak = first;
    let mut max_dd = 0.0_f64;
    for &value in cumulative {
        if value > peak {
            peak = value;
        }
        let drawdown = value / peak - 1.0;
        if drawdown < max_dd {
            max_dd = drawdown;
        }
    }
    Some(max_dd)
}
