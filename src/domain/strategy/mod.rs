//! Signal-generating strategies.
//!
//! Both variants map a price series to a same-length position series. They
//! share the rolling volatility filter and a minimum-hold policy, but the
//! hold policies differ: momentum runs a re-evaluation lockout inside its
//! state machine, mean-reversion propagates expiring signals as a
//! post-process. Parameter spaces are deliberately separate: the momentum
//! `threshold` is a raw price delta while `num_std` is a band width in
//! standard deviations, and the two are not unit-comparable.

pub mod mean_reversion;
pub mod momentum;

pub use mean_reversion::MeanReversionConfig;
pub use momentum::MomentumConfig;

use crate::domain::series::PricePoint;
use crate::domain::signal::Position;

#[derive(Debug, Clone)]
pub enum Strategy {
    Momentum(MomentumConfig),
    MeanReversion(MeanReversionConfig),
}

impl Strategy {
    /// Generate the position series for `prices`. Degenerate configurations
    /// (a window longer than the series, zero-length windows) yield an
    /// all-flat signal rather than an error, so sweeps over large parameter
    /// grids never abort on a single bad combination.
    pub fn generate_signal(&self, prices: &[PricePoint]) -> Vec<Position> {
        match self {
            Strategy::Momentum(cfg) => momentum::generate_signal(prices, cfg),
            Strategy::MeanReversion(cfg) => mean_reversion::generate_signal(prices, cfg),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Strategy::Momentum(_) => "momentum",
            Strategy::MeanReversion(_) => "mean_reversion",
        }
    }
}
