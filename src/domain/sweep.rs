//! Parameter-sweep grid expansion and robustness scoring.
//!
//! A sweep evaluates every combination of a momentum parameter grid across a
//! ticker universe and ranks combinations by `avg_sharpe - penalty *
//! std_sharpe`, rewarding configurations that hold up across instruments
//! rather than excelling on one. Grid expansion and scoring are pure; the
//! ticker loop and the skip-on-failure policy belong to the calling driver.

use std::cmp::Ordering;

use crate::domain::strategy::MomentumConfig;

pub const DEFAULT_SCORE_PENALTY: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct ParamGrid {
    pub windows: Vec<usize>,
    pub thresholds: Vec<f64>,
    pub min_holds: Vec<usize>,
    pub vol_thresholds: Vec<Option<f64>>,
    pub vol_windows: Vec<usize>,
}

impl ParamGrid {
    /// Cartesian product of all axis values, in axis-major order.
    pub fn combinations(&self) -> Vec<MomentumConfig> {
        let mut combos = Vec::with_capacity(self.len());
        for &window in &self.windows {
            for &threshold in &self.thresholds {
                for &min_hold in &self.min_holds {
                    for &vol_threshold in &self.vol_thresholds {
                        for &vol_window in &self.vol_windows {
                            combos.push(MomentumConfig {
                                window,
                                threshold,
                                min_hold,
                                vol_threshold,
                                vol_window,
                            });
                        }
                    }
                }
            }
        }
        combos
    }

    pub fn len(&self) -> usize {
        self.windows.len()
            * self.thresholds.len()
            * self.min_holds.len()
            * self.vol_thresholds.len()
            * self.vol_windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One scored grid combination.
#[derive(Debug, Clone)]
pub struct SweepRecord {
    pub config: MomentumConfig,
    pub avg_sharpe: f64,
    pub std_sharpe: f64,
    pub avg_final_return: f64,
    pub score: f64,
}

/// Score one combination from its per-ticker Sharpe and final-return
/// samples. The Sharpe spread uses the population standard deviation.
/// Returns `None` when there are no samples to aggregate.
pub fn score_combination(
    config: MomentumConfig,
    sharpes: &[f64],
    final_returns: &[f64],
    penalty: f64,
) -> Option<SweepRecord> {
    if sharpes.is_empty() {
        return None;
    }

    let n = sharpes.len() as f64;
    let avg_sharpe = sharpes.iter().sum::<f64>() / n;
    let variance = sharpes
        .iter()
        .map(|s| (s - avg_sharpe).powi(2))
        .sum::<f64>()
        / n;
    let std_sharpe = variance.sqrt();
    let avg_final_return = final_returns.iter().sum::<f64>() / final_returns.len().max(1) as f64;

    Some(SweepRecord {
        config,
        avg_sharpe,
        std_sharpe,
        avg_final_return,
        score: avg_sharpe - penalty * std_sharpe,
    })
}

/// Sort records by score, best first.
pub fn rank(mut records: Vec<SweepRecord>) -> Vec<SweepRecord> {
    records.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    records
}
