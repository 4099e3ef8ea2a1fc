use quality_types::{Indicator, StationId, Timestamp};

/// Errors from the WeightEngine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("expert share {0} outside [0, 1]")]
    InvalidExpertShare(f64),
    #[error("expert panel is empty")]
    EmptyPanel,
    #[error("expert {expert} assigns invalid weight {value} to {indicator}")]
    InvalidExpertWeight {
        expert: usize,
        indicator: Indicator,
        value: f64,
    },
    #[error("expert panel mean weights sum to zero")]
    DegenerateExpertPanel,
    #[error("non-finite {indicator} value for station {station} at {timestamp}")]
    NonFiniteValue {
        station: StationId,
        indicator: Indicator,
        timestamp: Timestamp,
    },
    #[error("station {station} reported more than once at {timestamp}")]
    DuplicateRow {
        station: StationId,
        timestamp: Timestamp,
    },
    #[error("window commit out of order: {next} does not follow {previous}")]
    OutOfOrder {
        previous: Timestamp,
        next: Timestamp,
    },
    #[error("combined weights at {timestamp} cannot be normalized")]
    DegenerateCombination { timestamp: Timestamp },
}
