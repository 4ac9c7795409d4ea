//! Configuration validation.
//!
//! Rejects out-of-range values at the CLI boundary before any backtest
//! runs. The signal generators themselves degrade gracefully (a window
//! longer than the series yields an all-flat signal); validation exists so
//! an interactive user gets a direct error instead of a silent no-op.

use crate::domain::error::QuantbtError;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    validate_data_dir(config)?;
    validate_tickers(config)?;
    validate_transaction_cost(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    validate_kind(config)?;
    validate_window(config)?;
    validate_threshold(config)?;
    validate_num_std(config)?;
    validate_min_hold(config)?;
    validate_vol_filter(config)?;
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    match config.get_string("data", "data_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(QuantbtError::ConfigMissing {
            section: "data".to_string(),
            key: "data_dir".to_string(),
        }),
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    let tickers = config.get_string("backtest", "tickers");
    let ticker = config.get_string("backtest", "ticker");

    match (tickers, ticker) {
        (Some(t), _) if !t.trim().is_empty() => Ok(()),
        (None, Some(t)) if !t.trim().is_empty() => Ok(()),
        _ => Err(QuantbtError::ConfigMissing {
            section: "backtest".to_string(),
            key: "ticker".to_string(),
        }),
    }
}

fn validate_transaction_cost(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    let value = config.get_double("backtest", "transaction_cost", 0.0);
    if value < 0.0 {
        return Err(QuantbtError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "transaction_cost".to_string(),
            reason: "transaction_cost must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_kind(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    match config.get_string("strategy", "kind") {
        None => Err(QuantbtError::ConfigMissing {
            section: "strategy".to_string(),
            key: "kind".to_string(),
        }),
        Some(kind) => match kind.trim() {
            "momentum" | "mean_reversion" => Ok(()),
            other => Err(QuantbtError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "kind".to_string(),
                reason: format!("unknown strategy kind '{other}'"),
            }),
        },
    }
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    let value = config.get_int("strategy", "window", 1);
    if value < 1 {
        return Err(QuantbtError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "window".to_string(),
            reason: "window must be a positive integer".to_string(),
        });
    }
    let vol_window = config.get_int("strategy", "vol_window", 1);
    if vol_window < 1 {
        return Err(QuantbtError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "vol_window".to_string(),
            reason: "vol_window must be a positive integer".to_string(),
        });
    }
    Ok(())
}

fn validate_threshold(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    let value = config.get_double("strategy", "threshold", 0.0);
    if value < 0.0 {
        return Err(QuantbtError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "threshold".to_string(),
            reason: "threshold must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_num_std(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    let value = config.get_double("strategy", "num_std", 1.5);
    if value <= 0.0 {
        return Err(QuantbtError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "num_std".to_string(),
            reason: "num_std must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_min_hold(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    let value = config.get_int("strategy", "min_hold", 0);
    if value < 0 {
        return Err(QuantbtError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "min_hold".to_string(),
            reason: "min_hold must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_vol_filter(config: &dyn ConfigPort) -> Result<(), QuantbtError> {
    if let Some(value) = config.get_optional_double("strategy", "vol_threshold") {
        if value < 0.0 {
            return Err(QuantbtError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "vol_threshold".to_string(),
                reason: "vol_threshold must be non-negative".to_string(),
            });
        }
    }
    Ok(())
}
