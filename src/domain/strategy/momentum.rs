//! Momentum strategy: threshold-crossing on a lookback price delta.
//!
//! momentum[i] = close[i] - close[i - window], undefined for the first
//! `window` periods. Decisions go through a two-field state machine
//! {position, hold_days}: once a decision is taken, re-evaluation is locked
//! out for `min_hold` periods. The lockout applies to every decision,
//! including Flat, so `min_hold` bounds how often the strategy re-evaluates
//! rather than guaranteeing an open position persists.

use crate::domain::rolling::rolling_volatility;
use crate::domain::series::{closes, PricePoint};
use crate::domain::signal::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct MomentumConfig {
    /// Lookback periods for the momentum delta.
    pub window: usize,
    /// Raw price-delta threshold a momentum value must clear.
    pub threshold: f64,
    /// Periods a decision stays locked in before the next re-evaluation.
    pub min_hold: usize,
    /// Volatility ceiling; `None` disables the filter.
    pub vol_threshold: Option<f64>,
    /// Lookback periods for the rolling volatility of percentage changes.
    pub vol_window: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        MomentumConfig {
            window: 5,
            threshold: 0.02,
            min_hold: 3,
            vol_threshold: Some(0.02),
            vol_window: 5,
        }
    }
}

pub fn generate_signal(prices: &[PricePoint], cfg: &MomentumConfig) -> Vec<Position> {
    let closes = closes(prices);
    let n = closes.len();
    let mut signal = vec![Position::Flat; n];

    let momentum: Vec<Option<f64>> = (0..n)
        .map(|i| (i >= cfg.window).then(|| closes[i] - closes[i - cfg.window]))
        .collect();
    // Volatility is part of the warm-up gate even when the filter is off.
    let volatility = rolling_volatility(&closes, cfg.vol_window);

    let mut position = Position::Flat;
    let mut hold_days = 0usize;

    for i in 0..n {
        let (Some(m), Some(vol)) = (momentum[i], volatility[i]) else {
            continue;
        };

        let vol_ok = cfg.vol_threshold.is_none_or(|t| vol < t);

        if hold_days >= cfg.min_hold {
            position = if m > cfg.threshold && vol_ok {
                Position::Long
            } else if m < -cfg.threshold && vol_ok {
                Position::Short
            } else {
                Position::Flat
            };
            hold_days = 0;
        }

        signal[i] = position;
        hold_days += 1;
    }

    signal
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_points(values: &[f64]) -> Vec<PricePoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                PricePoint::new(
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Duration::days(i as i64),
                    close,
                )
            })
            .collect()
    }

    fn config(window: usize, threshold: f64, min_hold: usize, vol_window: usize) -> MomentumConfig {
        MomentumConfig {
            window,
            threshold,
            min_hold,
            vol_threshold: None,
            vol_window,
        }
    }

    #[test]
    fn warmup_region_is_flat() {
        let prices = make_points(&[100.0, 105.0, 110.0, 115.0, 120.0, 125.0, 130.0, 135.0]);
        let signal = generate_signal(&prices, &config(3, 0.5, 0, 5));

        // warm-up spans max(window, vol_window) periods
        for p in signal.iter().take(5) {
            assert!(p.is_flat());
        }
        assert_eq!(signal[5], Position::Long);
    }

    #[test]
    fn rising_series_reaches_and_holds_long() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let prices = make_points(&values);
        let signal = generate_signal(&prices, &config(5, 0.02, 0, 5));

        for p in signal.iter().take(5) {
            assert!(p.is_flat());
        }
        for p in signal.iter().skip(5) {
            assert_eq!(*p, Position::Long);
        }
    }

    #[test]
    fn falling_series_goes_short() {
        let values: Vec<f64> = (0..12).map(|i| 200.0 - 2.0 * i as f64).collect();
        let prices = make_points(&values);
        let signal = generate_signal(&prices, &config(3, 0.5, 0, 3));

        assert_eq!(signal[11], Position::Short);
    }

    #[test]
    fn lockout_holds_position_through_opposite_momentum() {
        // momentum (window 1): _, 2, 2, -1, 3, -2, 4; vol defined from i=2
        let prices = make_points(&[100.0, 102.0, 104.0, 103.0, 106.0, 104.0, 108.0]);
        let signal = generate_signal(&prices, &config(1, 0.5, 2, 2));

        // First re-evaluation waits out the initial lockout, so it lands on
        // i=4 and goes Long; i=5 is locked despite momentum -2.
        assert_eq!(
            signal,
            vec![
                Position::Flat,
                Position::Flat,
                Position::Flat,
                Position::Flat,
                Position::Long,
                Position::Long,
                Position::Long,
            ]
        );
    }

    #[test]
    fn lockout_also_locks_in_flat_decisions() {
        // momentum (window 1): _, 0, 0, 0, 100, -100; vol defined from i=2
        let prices = make_points(&[100.0, 100.0, 100.0, 100.0, 200.0, 100.0]);
        let signal = generate_signal(&prices, &config(1, 50.0, 3, 2));

        // The +100 spike at i=4 falls inside the Flat lockout and is never
        // acted on; the next re-evaluation at i=5 sees -100 and goes Short.
        assert_eq!(
            signal,
            vec![
                Position::Flat,
                Position::Flat,
                Position::Flat,
                Position::Flat,
                Position::Flat,
                Position::Short,
            ]
        );
    }

    #[test]
    fn vol_filter_blocks_entries_above_ceiling() {
        // rising but choppy: +20% then -4% alternating
        let prices = make_points(&[
            100.0, 120.0, 115.0, 140.0, 135.0, 160.0, 155.0, 180.0, 175.0, 200.0,
        ]);

        let mut cfg = config(2, 0.5, 0, 2);
        assert_eq!(generate_signal(&prices, &cfg)[9], Position::Long);

        cfg.vol_threshold = Some(0.02);
        assert!(generate_signal(&prices, &cfg)
            .iter()
            .all(|p| p.is_flat()));
    }

    #[test]
    fn window_of_zero_is_all_flat() {
        let prices = make_points(&[100.0, 105.0, 110.0, 115.0]);
        let signal = generate_signal(&prices, &config(0, 0.02, 0, 2));
        assert!(signal.iter().all(|p| p.is_flat()));
    }

    #[test]
    fn empty_series_is_empty_signal() {
        assert!(generate_signal(&[], &MomentumConfig::default()).is_empty());
    }
}
