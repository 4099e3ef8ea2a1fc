#![deny(unsafe_code)]
//! # quality-grader
//!
//! Third stage of the grading pipeline. Each period's station scores are
//! graded Good, Medium or Poor against thresholds whose rule depends on how
//! spread out the period is (its coefficient of variation):
//!
//! | CV | Regime | Thresholds |
//! |----|--------|------------|
//! | `< cv_low` | historical | mean ± 0.5σ over all earlier periods |
//! | `> cv_high` | current-wide | current mean ± 0.8σ |
//! | otherwise | current-quantile | current 25th / 75th percentile |

pub mod error;
pub mod explain;
pub mod grader;
pub mod history;
pub mod regime;
pub mod stats;

pub use error::GradeError;
pub use explain::explain;
pub use grader::{classify, GradingConfig, GradingOutcome, PeriodGrades, ThresholdGrader};
pub use history::HistoricalWindow;
pub use regime::{compute_thresholds, select_regime, Thresholds};
pub use stats::{quantile, Moments};
