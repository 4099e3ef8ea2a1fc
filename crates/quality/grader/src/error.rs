use quality_types::{Regime, StationId, Timestamp};

/// Errors from the ThresholdGrader.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradeError {
    #[error("CV cutoffs must satisfy 0 <= low < high (got low={low}, high={high})")]
    InvalidCvCutoffs { low: f64, high: f64 },

    #[error("non-finite score {score} for station {station} at {timestamp}")]
    NonFiniteScore {
        station: StationId,
        timestamp: Timestamp,
        score: f64,
    },

    #[error("station {station} scored more than once at {timestamp}")]
    DuplicateScore {
        station: StationId,
        timestamp: Timestamp,
    },

    /// The period's `t_low` is not strictly below its `t_high`.
    ///
    /// Raised whenever a period's scores all coincide and there is no
    /// spread to draw on. That includes a first period where a single
    /// station reports (or every reporting station scores the same): with
    /// no history, the historical regime collapses to the period's own zero
    /// spread. Stations brought online one at a time therefore cannot be
    /// graded until a first period with at least two distinct scores.
    #[error(
        "inverted thresholds at {timestamp} ({regime} regime): t_low={t_low} is not below t_high={t_high}"
    )]
    InvertedThresholds {
        timestamp: Timestamp,
        regime: Regime,
        t_low: f64,
        t_high: f64,
    },

    #[error("history commit out of order: {next} does not follow {previous}")]
    OutOfOrder {
        previous: Timestamp,
        next: Timestamp,
    },
}
