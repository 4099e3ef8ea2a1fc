//! Pipeline configuration.

use crate::error::PipelineError;
use quality_grader::GradingConfig;
use quality_normalizer::NormalizerConfig;
use quality_weights::WeightConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variable overrides, e.g.
/// `STATION_GRADE__GRADING__CV_LOW=0.05`.
pub const ENV_PREFIX: &str = "STATION_GRADE";
const ENV_SEPARATOR: &str = "__";

/// Full pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// EMA smoothing and log-minmax scaling
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Expert panel and blend fraction
    #[serde(default)]
    pub weights: WeightConfig,

    /// CV cutoffs for regime selection
    #[serde(default)]
    pub grading: GradingConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Turns weighted contributions into a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// `score = scale - scale * Σ contribution`
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_scale() -> f64 {
    100.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl PipelineConfig {
    /// Layer built-in defaults, then the file at `path` if given, then
    /// `STATION_GRADE__*` environment variables. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&PipelineConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations no stage can run with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.normalizer.validate()?;
        self.weights.validate()?;
        self.grading.validate()?;
        if !(self.scoring.scale.is_finite() && self.scoring.scale > 0.0) {
            return Err(PipelineError::InvalidScale(self.scoring.scale));
        }
        Ok(())
    }
}
