#![deny(unsafe_code)]
//! # quality-types
//!
//! Shared data model for the station quality grading pipeline.
//!
//! Raw [`MetricRow`]s flow through three stages, each owning its output:
//! - **Normalizer** produces [`NormalizedSample`]s in `[0, 1]`
//! - **WeightEngine** produces one [`WeightVector`] per timestamp
//! - **ThresholdGrader** turns [`ScoreRecord`]s into [`GradeRecord`]s,
//!   [`ThresholdRecord`]s and [`TimestampDiagnostics`]

pub mod degeneracy;
pub mod grade;
pub mod indicator;
pub mod metric;
pub mod weight;

pub use degeneracy::Degeneracy;
pub use grade::{
    Grade, GradeCounts, GradeRecord, Highlight, Regime, ScoreRecord, ThresholdRecord,
    TimestampDiagnostics,
};
pub use indicator::{Indicator, IndicatorValues};
pub use metric::{MetricRow, MetricSample, MetricTable, NormalizedSample, StationId, Timestamp};
pub use weight::{WeightVector, WEIGHT_SUM_TOLERANCE};
