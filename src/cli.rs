//! CLI definition and dispatch.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, ReturnRecord};
use crate::domain::config_validation::{validate_backtest_config, validate_strategy_config};
use crate::domain::error::QuantbtError;
use crate::domain::metrics::Metrics;
use crate::domain::series::PricePoint;
use crate::domain::strategy::{MeanReversionConfig, MomentumConfig, Strategy};
use crate::domain::sweep::{self, ParamGrid, SweepRecord};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::{ReportPort, TickerSummary};

#[derive(Parser, Debug)]
#[command(name = "quantbt", about = "Rule-based trading strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single backtest and print its metrics
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Evaluate a parameter grid across the ticker universe
    Sweep {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Run one configuration across all tickers and write a summary CSV
    Robustness {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List tickers available in the data directory
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest { config, ticker } => run_backtest_cmd(&config, ticker.as_deref()),
        Command::Sweep { config, top } => run_sweep_cmd(&config, top),
        Command::Robustness { config, output } => run_robustness_cmd(&config, output.as_deref()),
        Command::ListTickers { config } => run_list_tickers_cmd(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = QuantbtError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build the configured strategy from the `[strategy]` section.
pub fn build_strategy(config: &dyn ConfigPort) -> Result<Strategy, QuantbtError> {
    let kind = config
        .get_string("strategy", "kind")
        .ok_or_else(|| QuantbtError::ConfigMissing {
            section: "strategy".into(),
            key: "kind".into(),
        })?;

    match kind.trim() {
        "momentum" => Ok(Strategy::Momentum(MomentumConfig {
            window: config.get_int("strategy", "window", 5).max(0) as usize,
            threshold: config.get_double("strategy", "threshold", 0.02),
            min_hold: config.get_int("strategy", "min_hold", 3).max(0) as usize,
            vol_threshold: config.get_optional_double("strategy", "vol_threshold"),
            vol_window: config.get_int("strategy", "vol_window", 5).max(0) as usize,
        })),
        "mean_reversion" => Ok(Strategy::MeanReversion(MeanReversionConfig {
            window: config.get_int("strategy", "window", 20).max(0) as usize,
            num_std: config.get_double("strategy", "num_std", 1.5),
            min_hold: config.get_int("strategy", "min_hold", 3).max(0) as usize,
            vol_threshold: config.get_optional_double("strategy", "vol_threshold"),
            vol_window: config.get_int("strategy", "vol_window", 10).max(0) as usize,
        })),
        other => Err(QuantbtError::ConfigInvalid {
            section: "strategy".into(),
            key: "kind".into(),
            reason: format!("unknown strategy kind '{other}'"),
        }),
    }
}

/// Build the momentum parameter grid from the `[sweep]` section.
pub fn build_param_grid(config: &dyn ConfigPort) -> Result<ParamGrid, QuantbtError> {
    Ok(ParamGrid {
        windows: parse_usize_list(config, "sweep", "windows")?,
        thresholds: parse_f64_list(config, "sweep", "thresholds")?,
        min_holds: parse_usize_list(config, "sweep", "min_holds")?,
        vol_thresholds: parse_opt_f64_list(config, "sweep", "vol_thresholds")?,
        vol_windows: parse_usize_list(config, "sweep", "vol_windows")?,
    })
}

/// Resolve the ticker universe: CLI override, then `tickers`, then `ticker`.
pub fn resolve_tickers(override_ticker: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(ticker) = override_ticker {
        return vec![ticker.to_string()];
    }
    let raw = config
        .get_string("backtest", "tickers")
        .or_else(|| config.get_string("backtest", "ticker"))
        .unwrap_or_default();
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Signal generation, backtest, and metrics for one ticker.
pub fn evaluate_ticker(
    prices: &[PricePoint],
    strategy: &Strategy,
    transaction_cost: f64,
) -> Result<Metrics, QuantbtError> {
    let signal = strategy.generate_signal(prices);
    let result = run_backtest(prices, &signal, transaction_cost)?;
    Ok(Metrics::from_result(&result))
}

fn run_backtest_cmd(config_path: &PathBuf, ticker_override: Option<&str>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter).and_then(|_| validate_strategy_config(&adapter)) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategy = match build_strategy(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = resolve_tickers(ticker_override, &adapter);
    let Some(ticker) = tickers.first() else {
        eprintln!("error: no ticker configured");
        return ExitCode::from(2);
    };
    let transaction_cost = adapter.get_double("backtest", "transaction_cost", 0.001);

    let data_port = match data_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Running {} backtest for {}", strategy.kind(), ticker);
    let result = fetch_prices_checked(&data_port, ticker).and_then(|prices| {
        let signal = strategy.generate_signal(&prices);
        run_backtest(&prices, &signal, transaction_cost)
    });

    match result {
        Ok(result) => {
            let metrics = Metrics::from_result(&result);
            println!("--- Strategy Performance Metrics ---");
            println!("Sharpe Ratio: {}", format_metric(metrics.sharpe_ratio));
            println!("Max Drawdown: {}", format_metric(metrics.max_drawdown));
            println!("Final Return: {}", format_metric(metrics.final_return));
            println!();
            println!("--- Final Backtest Snapshot ---");
            print_snapshot(&result.records);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_sweep_cmd(config_path: &PathBuf, top: usize) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let grid = match build_param_grid(&adapter) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = resolve_tickers(None, &adapter);
    let transaction_cost = adapter.get_double("backtest", "transaction_cost", 0.001);
    let penalty = adapter.get_double("sweep", "penalty", sweep::DEFAULT_SCORE_PENALTY);

    let data_port = match data_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let universe = match fetch_universe(&data_port, &tickers) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Evaluating {} parameter combinations across {} tickers...",
        grid.len(),
        tickers.len()
    );

    let mut records: Vec<SweepRecord> = Vec::new();
    for combo in grid.combinations() {
        let strategy = Strategy::Momentum(combo.clone());
        let mut sharpes = Vec::new();
        let mut final_returns = Vec::new();
        let mut disqualified = false;

        for (_, prices) in &universe {
            match evaluate_ticker(prices, &strategy, transaction_cost) {
                Ok(Metrics {
                    sharpe_ratio: Some(sharpe),
                    final_return: Some(final_return),
                    ..
                }) => {
                    sharpes.push(sharpe);
                    final_returns.push(final_return);
                }
                // An undefined metric disqualifies the combination, same as
                // a failed evaluation; the sweep itself keeps going.
                Ok(_) | Err(_) => {
                    disqualified = true;
                    break;
                }
            }
        }

        if disqualified {
            continue;
        }
        if let Some(record) = sweep::score_combination(combo, &sharpes, &final_returns, penalty) {
            records.push(record);
        }
    }

    let ranked = sweep::rank(records);
    println!("Top {} robust configurations:", top.min(ranked.len()));
    for record in ranked.iter().take(top) {
        print_sweep_record(record);
    }
    ExitCode::SUCCESS
}

fn run_robustness_cmd(config_path: &PathBuf, output: Option<&std::path::Path>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter).and_then(|_| validate_strategy_config(&adapter)) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategy = match build_strategy(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = resolve_tickers(None, &adapter);
    let transaction_cost = adapter.get_double("backtest", "transaction_cost", 0.001);

    let data_port = match data_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let mut rows: Vec<TickerSummary> = Vec::new();
    for ticker in &tickers {
        let metrics = fetch_prices_checked(&data_port, ticker)
            .and_then(|prices| evaluate_ticker(&prices, &strategy, transaction_cost));
        match metrics {
            Ok(metrics) => {
                println!(
                    "{}: Sharpe={}, Final Return={}, Max DD={}",
                    ticker,
                    format_metric(metrics.sharpe_ratio),
                    format_metric(metrics.final_return),
                    format_metric(metrics.max_drawdown),
                );
                rows.push(TickerSummary {
                    ticker: ticker.clone(),
                    metrics,
                });
            }
            Err(e) => eprintln!("failed on {ticker}: {e}"),
        }
    }

    let default_output = PathBuf::from("robustness_summary.csv");
    let output_path = output.unwrap_or(&default_output);
    if let Err(e) = CsvReportAdapter.write_summary(&rows, output_path) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Wrote summary to {}", output_path.display());
    ExitCode::SUCCESS
}

fn run_list_tickers_cmd(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_port = match data_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match data_port.list_tickers() {
        Ok(tickers) => {
            for ticker in tickers {
                println!("{ticker}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn data_adapter(config: &dyn ConfigPort) -> Result<CsvDataAdapter, QuantbtError> {
    let data_dir = config
        .get_string("data", "data_dir")
        .ok_or_else(|| QuantbtError::ConfigMissing {
            section: "data".into(),
            key: "data_dir".into(),
        })?;
    Ok(CsvDataAdapter::new(PathBuf::from(data_dir)))
}

fn fetch_prices_checked(
    data_port: &dyn DataPort,
    ticker: &str,
) -> Result<Vec<PricePoint>, QuantbtError> {
    let prices = data_port.fetch_prices(ticker)?;
    if prices.is_empty() {
        return Err(QuantbtError::NoData {
            ticker: ticker.to_string(),
        });
    }
    Ok(prices)
}

fn fetch_universe(
    data_port: &dyn DataPort,
    tickers: &[String],
) -> Result<Vec<(String, Vec<PricePoint>)>, QuantbtError> {
    tickers
        .iter()
        .map(|t| Ok((t.clone(), fetch_prices_checked(data_port, t)?)))
        .collect()
}

fn print_snapshot(records: &[ReturnRecord]) {
    println!(
        "{:>12} {:>10} {:>7} {:>12} {:>14}",
        "date", "close", "signal", "net_return", "cum_return"
    );
    let start = records.len().saturating_sub(10);
    for record in &records[start..] {
        println!(
            "{:>12} {:>10.2} {:>7} {:>12} {:>14.4}",
            record.date,
            record.close,
            record.signal,
            format_metric(record.net_return),
            record.cumulative_return,
        );
    }
}

fn print_sweep_record(record: &SweepRecord) {
    let cfg = &record.config;
    println!(
        "window={} threshold={} min_hold={} vol_threshold={} vol_window={} \
         avg_sharpe={:.3} std_sharpe={:.3} score={:.3} avg_final_return={:.3}",
        cfg.window,
        cfg.threshold,
        cfg.min_hold,
        format_vol_threshold(cfg.vol_threshold),
        cfg.vol_window,
        record.avg_sharpe,
        record.std_sharpe,
        record.score,
        record.avg_final_return,
    );
}

fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "undefined".to_string(),
    }
}

fn format_vol_threshold(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "none".to_string(),
    }
}

fn parse_usize_list(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Vec<usize>, QuantbtError> {
    let raw = required_string(config, section, key)?;
    raw.split(',')
        .map(|v| {
            v.trim()
                .parse::<usize>()
                .map_err(|_| invalid_list_value(section, key, v))
        })
        .collect()
}

fn parse_f64_list(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Vec<f64>, QuantbtError> {
    let raw = required_string(config, section, key)?;
    raw.split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| invalid_list_value(section, key, v))
        })
        .collect()
}

fn parse_opt_f64_list(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Vec<Option<f64>>, QuantbtError> {
    let raw = required_string(config, section, key)?;
    raw.split(',')
        .map(|v| {
            let trimmed = v.trim();
            if trimmed.eq_ignore_ascii_case("none") {
                Ok(None)
            } else {
                trimmed
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| invalid_list_value(section, key, v))
            }
        })
        .collect()
}

fn required_string(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, QuantbtError> {
    config
        .get_string(section, key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| QuantbtError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })
}

fn invalid_list_value(section: &str, key: &str, value: &str) -> QuantbtError {
    QuantbtError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("invalid list entry '{}'", value.trim()),
    }
}
