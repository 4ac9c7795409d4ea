//! Integration tests for the full fetch → signal → backtest → metrics
//! pipeline, the sweep driver pieces, and the robustness summary output.

mod common;

use approx::assert_relative_eq;
use common::*;
use quantbt::adapters::csv_report_adapter::CsvReportAdapter;
use quantbt::cli::evaluate_ticker;
use quantbt::domain::backtest::run_backtest;
use quantbt::domain::metrics::Metrics;
use quantbt::domain::signal::Position;
use quantbt::domain::strategy::{MeanReversionConfig, MomentumConfig, Strategy};
use quantbt::domain::sweep::{rank, score_combination, ParamGrid};
use quantbt::ports::data_port::DataPort;
use quantbt::ports::report_port::{ReportPort, TickerSummary};

mod full_pipeline {
    use super::*;

    #[test]
    fn rising_series_ends_profitable() {
        let port =
            MockDataPort::new().with_prices("SPY", make_points(&trending_series(100.0, 1.0, 40)));

        let prices = port.fetch_prices("SPY").unwrap();
        let strategy = momentum_strategy(5, 0.02, 0);

        let signal = strategy.generate_signal(&prices);
        assert_eq!(signal.len(), prices.len());
        assert_eq!(signal[39], Position::Long);

        let result = run_backtest(&prices, &signal, 0.0005).unwrap();
        let metrics = Metrics::from_result(&result);

        assert!(metrics.final_return.unwrap() > 1.0);
        assert!(metrics.sharpe_ratio.unwrap() > 0.0);
        assert!(metrics.max_drawdown.unwrap() <= 0.0);
    }

    #[test]
    fn flat_then_breakout_example() {
        // a flat stretch, then four rising closes; the breakout clears the
        // 0.02 price-delta threshold once the 5-period delta turns positive
        let prices = make_points(&[10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0, 12.0, 13.0, 14.0]);
        let strategy = Strategy::Momentum(MomentumConfig {
            window: 5,
            threshold: 0.02,
            min_hold: 1,
            vol_threshold: None,
            vol_window: 5,
        });

        let signal = strategy.generate_signal(&prices);
        assert_eq!(signal[5], Position::Flat);
        for p in &signal[6..] {
            assert_eq!(*p, Position::Long);
        }

        let result = run_backtest(&prices, &signal, 0.0).unwrap();
        let metrics = Metrics::from_result(&result);

        // long from t=6: compounds 12/11 * 13/12 * 14/13
        let final_return = metrics.final_return.unwrap();
        assert!(final_return > 1.0);
        assert_relative_eq!(final_return, 14.0 / 11.0, max_relative = 1e-12);
    }

    #[test]
    fn mean_reversion_pipeline_produces_metrics() {
        let prices = make_points(&[
            100.0, 101.0, 100.0, 101.0, 90.0, 95.0, 100.0, 101.0, 100.0, 101.0,
        ]);
        let strategy = Strategy::MeanReversion(MeanReversionConfig {
            window: 3,
            num_std: 1.0,
            min_hold: 2,
            vol_threshold: None,
            vol_window: 3,
        });

        let signal = strategy.generate_signal(&prices);
        assert_eq!(signal[4], Position::Long);

        let result = run_backtest(&prices, &signal, 0.001).unwrap();
        let metrics = Metrics::from_result(&result);
        assert!(metrics.final_return.is_some());
        assert!(metrics.max_drawdown.is_some());
    }

    #[test]
    fn oversized_window_degrades_to_neutral() {
        let prices = make_points(&trending_series(100.0, 1.0, 10));
        let strategy = momentum_strategy(50, 0.02, 0);

        let signal = strategy.generate_signal(&prices);
        assert!(signal.iter().all(|p| p.is_flat()));

        let result = run_backtest(&prices, &signal, 0.001).unwrap();
        let metrics = Metrics::from_result(&result);

        // all-flat signal: every defined net return is exactly zero
        assert_eq!(metrics.sharpe_ratio, None);
        assert_relative_eq!(metrics.final_return.unwrap(), 1.0);
        assert_relative_eq!(metrics.max_drawdown.unwrap(), 0.0);
    }

    #[test]
    fn data_port_error_propagates() {
        let port = MockDataPort::new().with_error("BAD", "connection refused");
        assert!(port.fetch_prices("BAD").is_err());
    }
}

mod sweep_driver {
    use super::*;

    fn universe() -> Vec<(String, Vec<quantbt::domain::series::PricePoint>)> {
        vec![
            (
                "UP".to_string(),
                make_points(&trending_series(100.0, 1.0, 40)),
            ),
            (
                "DOWN".to_string(),
                make_points(&trending_series(200.0, -1.0, 40)),
            ),
        ]
    }

    #[test]
    fn grid_evaluation_scores_and_ranks() {
        let grid = ParamGrid {
            windows: vec![3, 5],
            thresholds: vec![0.02],
            min_holds: vec![0, 2],
            vol_thresholds: vec![None],
            vol_windows: vec![3],
        };

        let mut records = Vec::new();
        for combo in grid.combinations() {
            let strategy = Strategy::Momentum(combo.clone());
            let mut sharpes = Vec::new();
            let mut finals = Vec::new();
            let mut disqualified = false;

            for (_, prices) in &universe() {
                match evaluate_ticker(prices, &strategy, 0.0005) {
                    Ok(Metrics {
                        sharpe_ratio: Some(s),
                        final_return: Some(f),
                        ..
                    }) => {
                        sharpes.push(s);
                        finals.push(f);
                    }
                    _ => {
                        disqualified = true;
                        break;
                    }
                }
            }

            if disqualified {
                continue;
            }
            if let Some(record) = score_combination(combo, &sharpes, &finals, 0.5) {
                records.push(record);
            }
        }

        assert_eq!(records.len(), 4);
        let ranked = rank(records);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for record in &ranked {
            assert!(record.score.is_finite());
        }
    }

    #[test]
    fn undefined_sharpe_disqualifies_a_combination() {
        // constant prices: the signal never leaves flat, net returns have
        // zero variance, and the Sharpe ratio is undefined
        let prices = make_points(&[100.0; 40]);
        let strategy = momentum_strategy(5, 0.02, 0);
        let metrics = evaluate_ticker(&prices, &strategy, 0.0005).unwrap();
        assert_eq!(metrics.sharpe_ratio, None);
    }
}

mod robustness_summary {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn per_ticker_metrics_written_to_csv() {
        let port = MockDataPort::new()
            .with_prices("UP", make_points(&trending_series(100.0, 1.0, 40)))
            .with_prices("DOWN", make_points(&trending_series(200.0, -1.0, 40)));
        let strategy = momentum_strategy(5, 0.02, 0);

        let mut rows = Vec::new();
        for ticker in port.list_tickers().unwrap() {
            let prices = port.fetch_prices(&ticker).unwrap();
            let metrics = evaluate_ticker(&prices, &strategy, 0.0005).unwrap();
            rows.push(TickerSummary { ticker, metrics });
        }

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("robustness_summary.csv");
        CsvReportAdapter.write_summary(&rows, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ticker,sharpe_ratio,final_return,max_drawdown");
        assert!(lines[1].starts_with("DOWN,"));
        assert!(lines[2].starts_with("UP,"));
    }
}
