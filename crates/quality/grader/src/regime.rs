//! Regime selection and the threshold rule of each regime.
//!
//! Both functions are pure; the stateful part of grading lives in
//! [`HistoricalWindow`](crate::history::HistoricalWindow).

use crate::stats::{quantile, Moments};
use quality_types::Regime;

/// Band half-width, in standard deviations, of the historical regime.
pub const HISTORICAL_BAND: f64 = 0.5;
/// Band half-width, in standard deviations, of the current-wide regime.
pub const WIDE_BAND: f64 = 0.8;
pub const LOWER_QUANTILE: f64 = 0.25;
pub const UPPER_QUANTILE: f64 = 0.75;

/// Pick the regime for a period with coefficient of variation `cv`.
///
/// Checked in priority order: `cv < cv_low` is historical, `cv > cv_high`
/// is current-wide, anything else (including either cutoff exactly) is
/// current-quantile.
pub fn select_regime(cv: f64, cv_low: f64, cv_high: f64) -> Regime {
    if cv < cv_low {
        Regime::Historical
    } else if cv > cv_high {
        Regime::CurrentWide
    } else {
        Regime::CurrentQuantile
    }
}

/// Grade cut points for one period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub t_high: f64,
    pub t_low: f64,
}

impl Thresholds {
    fn band(center: f64, half_width: f64) -> Self {
        Self {
            t_high: center + half_width,
            t_low: center - half_width,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.t_low < self.t_high
    }
}

/// Thresholds under `regime`.
///
/// `sorted` holds the current period's scores in ascending order and must
/// be non-empty; `current` are its moments. `historical` are the moments of
/// every earlier period, or the current ones when there is no history yet.
pub fn compute_thresholds(
    regime: Regime,
    sorted: &[f64],
    current: &Moments,
    historical: &Moments,
) -> Thresholds {
    match regime {
        Regime::Historical => {
            Thresholds::band(historical.mean, HISTORICAL_BAND * historical.std_dev)
        }
        Regime::CurrentWide => Thresholds::band(current.mean, WIDE_BAND * current.std_dev),
        Regime::CurrentQuantile => Thresholds {
            t_high: quantile(sorted, UPPER_QUANTILE).unwrap_or(current.mean),
            t_low: quantile(sorted, LOWER_QUANTILE).unwrap_or(current.mean),
        },
    }
}
