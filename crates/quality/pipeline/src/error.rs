use quality_grader::GradeError;
use quality_normalizer::NormalizerError;
use quality_types::{StationId, Timestamp};
use quality_weights::WeightError;

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Required input columns are absent.
    #[error("input is missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("invalid input row {index}: {reason}")]
    InvalidRow { index: usize, reason: String },

    #[error("no weight vector for {timestamp}")]
    MissingWeights { timestamp: Timestamp },

    #[error("no grade for station {station} at {timestamp}")]
    Ungraded {
        station: StationId,
        timestamp: Timestamp,
    },

    #[error("scoring scale {0} must be positive and finite")]
    InvalidScale(f64),

    #[error("normalization failed: {0}")]
    Normalizer(#[from] NormalizerError),

    #[error("weighting failed: {0}")]
    Weights(#[from] WeightError),

    #[error("grading failed: {0}")]
    Grade(#[from] GradeError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
