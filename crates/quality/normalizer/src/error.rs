use quality_types::{Indicator, StationId, Timestamp};

/// Errors from a single log-minmax scaling pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScalingError {
    #[error("log undefined at position {index}: value {value} + offset {offset} is not positive")]
    LogDomain { index: usize, value: f64, offset: f64 },
    #[error("invalid log base {0}: must be positive, finite and not 1")]
    InvalidBase(f64),
}

/// Errors from the Normalizer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizerError {
    #[error("smoothing factor {0} outside [0, 1)")]
    InvalidBeta(f64),
    #[error("invalid log base {0}: must be positive, finite and not 1")]
    InvalidLogBase(f64),
    #[error("log offset {0} is not finite")]
    InvalidLogOffset(f64),
    #[error("required indicators absent from input: {}", join(.0))]
    MissingIndicators(Vec<Indicator>),
    #[error("duplicate sample for station {station}, {indicator} at {timestamp}")]
    DuplicateSample {
        station: StationId,
        indicator: Indicator,
        timestamp: Timestamp,
    },
    #[error("non-finite value {value} for station {station}, {indicator} at {timestamp}")]
    NonFiniteValue {
        station: StationId,
        indicator: Indicator,
        timestamp: Timestamp,
        value: f64,
    },
    #[error(
        "log undefined for station {station}, {indicator} at {timestamp}: \
         smoothed value {value} + offset {offset} is not positive"
    )]
    LogDomain {
        station: StationId,
        indicator: Indicator,
        timestamp: Timestamp,
        value: f64,
        offset: f64,
    },
}

fn join(indicators: &[Indicator]) -> String {
    indicators
        .iter()
        .map(|i| i.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
