use crate::indicator::IndicatorValues;
use crate::metric::{StationId, Timestamp};
use serde::{Deserialize, Serialize};

/// A station's weighted score for one timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub station: StationId,
    pub timestamp: Timestamp,
    pub score: f64,
    /// `normalized × weight` per indicator; drives grade explanations.
    pub contributions: IndicatorValues,
}

impl ScoreRecord {
    pub fn new(
        station: impl Into<StationId>,
        timestamp: Timestamp,
        score: f64,
        contributions: IndicatorValues,
    ) -> Self {
        Self {
            station: station.into(),
            timestamp,
            score,
            contributions,
        }
    }
}

/// Rule used to derive a timestamp's thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Regime {
    /// Low variability: mean ± 0.5σ over all earlier timestamps.
    Historical,
    /// High variability: current mean ± 0.8σ.
    CurrentWide,
    /// Ordinary variability: current 25th/75th percentiles.
    CurrentQuantile,
}

impl Regime {
    pub fn label(self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::CurrentWide => "current-wide",
            Self::CurrentQuantile => "current-quantile",
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Thresholds in force for one timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRecord {
    pub timestamp: Timestamp,
    pub t_high: f64,
    pub t_low: f64,
    pub regime: Regime,
}

/// Categorical station grade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    Good,
    Medium,
    Poor,
}

/// Cell highlight applied by report consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Light,
    Alternate,
}

impl Highlight {
    /// Fill colour as an RGB hex string.
    pub fn fill_color(self) -> &'static str {
        match self {
            Self::Light => "#E6F4EA",
            Self::Alternate => "#FCE8E6",
        }
    }
}

impl Grade {
    /// Presentation contract: Good and Poor are highlighted, Medium is not.
    pub fn highlight(self) -> Option<Highlight> {
        match self {
            Self::Good => Some(Highlight::Light),
            Self::Poor => Some(Highlight::Alternate),
            Self::Medium => None,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Medium => write!(f, "Medium"),
            Self::Poor => write!(f, "Poor"),
        }
    }
}

/// Terminal per-station result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub station: StationId,
    pub timestamp: Timestamp,
    pub score: f64,
    pub grade: Grade,
    pub explanation: String,
}

/// Number of stations per grade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCounts {
    pub good: usize,
    pub medium: usize,
    pub poor: usize,
}

impl GradeCounts {
    pub fn record(&mut self, grade: Grade) {
        match grade {
            Grade::Good => self.good += 1,
            Grade::Medium => self.medium += 1,
            Grade::Poor => self.poor += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.medium + self.poor
    }
}

/// Per-timestamp grading summary for observability. Never read back by
/// the grader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimestampDiagnostics {
    pub timestamp: Timestamp,
    pub station_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub cv: f64,
    pub has_history: bool,
    /// Scores accumulated from strictly earlier timestamps.
    pub history_len: usize,
    pub historical_mean: Option<f64>,
    pub historical_std_dev: Option<f64>,
    pub regime: Regime,
    pub t_high: f64,
    pub t_low: f64,
    pub grades: GradeCounts,
}
