//! Mean-reversion strategy: Bollinger-band crossing detection.
//!
//! Bands are a rolling SMA plus/minus `num_std` rolling sample standard
//! deviations over `window` closes. A signal fires only on the period where
//! the close crosses a band, not for as long as it stays outside it: Long
//! when the close falls from at/above the lower band to below it, Short on
//! the symmetric upward crossing of the upper band.
//!
//! The minimum-hold policy is a post-process on the crossing signal: when a
//! non-flat signal expires to flat, the prior value is carried into the next
//! `min_hold - 1` periods, but never over a signal the crossing logic
//! produced on its own.

use crate::domain::rolling::{rolling_mean, rolling_std, rolling_volatility};
use crate::domain::series::{closes, PricePoint};
use crate::domain::signal::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct MeanReversionConfig {
    /// Lookback periods for the band SMA and standard deviation.
    pub window: usize,
    /// Band width in standard deviations.
    pub num_std: f64,
    /// Periods an expiring signal is carried forward.
    pub min_hold: usize,
    /// Volatility ceiling; `None` disables the filter.
    pub vol_threshold: Option<f64>,
    /// Lookback periods for the rolling volatility of percentage changes.
    pub vol_window: usize,
}

impl Default for MeanReversionConfig {
    fn default() -> Self {
        MeanReversionConfig {
            window: 20,
            num_std: 1.5,
            min_hold: 3,
            vol_threshold: None,
            vol_window: 10,
        }
    }
}

pub fn generate_signal(prices: &[PricePoint], cfg: &MeanReversionConfig) -> Vec<Position> {
    let closes = closes(prices);
    let n = closes.len();
    let mut signal = vec![Position::Flat; n];

    let sma = rolling_mean(&closes, cfg.window);
    let std = rolling_std(&closes, cfg.window);
    let lower: Vec<Option<f64>> = band(&sma, &std, -cfg.num_std);
    let upper: Vec<Option<f64>> = band(&sma, &std, cfg.num_std);

    for i in 1..n {
        let (Some(lo_prev), Some(lo), Some(up_prev), Some(up)) =
            (lower[i - 1], lower[i], upper[i - 1], upper[i])
        else {
            continue;
        };

        if closes[i - 1] > lo_prev && closes[i] < lo {
            signal[i] = Position::Long;
        } else if closes[i - 1] < up_prev && closes[i] > up {
            signal[i] = Position::Short;
        }
    }

    if let Some(threshold) = cfg.vol_threshold {
        let volatility = rolling_volatility(&closes, cfg.vol_window);
        for (i, vol) in volatility.iter().enumerate() {
            // An undefined volatility cannot clear the filter.
            match vol {
                Some(v) if *v > threshold => signal[i] = Position::Flat,
                Some(_) => {}
                None => signal[i] = Position::Flat,
            }
        }
    }

    // Carry an expiring signal forward min_hold - 1 periods, skipping any
    // period the crossing logic already claimed.
    for i in 1..n {
        if signal[i].is_flat() && !signal[i - 1].is_flat() {
            for j in 1..cfg.min_hold {
                if i + j < n && signal[i + j].is_flat() {
                    signal[i + j] = signal[i - 1];
                }
            }
        }
    }

    signal
}

fn band(sma: &[Option<f64>], std: &[Option<f64>], mult: f64) -> Vec<Option<f64>> {
    sma.iter()
        .zip(std)
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m + mult * s),
            _ => None,
        })
        .collect()
}
