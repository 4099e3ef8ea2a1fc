use crate::error::GradeError;
use crate::explain::explain;
use crate::history::HistoricalWindow;
use crate::regime::{compute_thresholds, select_regime};
use crate::stats::Moments;
use quality_types::{
    Degeneracy, Grade, GradeCounts, GradeRecord, ScoreRecord, ThresholdRecord, Timestamp,
    TimestampDiagnostics,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

/// Coefficient-of-variation cutoffs that select the threshold regime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    pub cv_low: f64,
    pub cv_high: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            cv_low: 0.1,
            cv_high: 0.3,
        }
    }
}

impl GradingConfig {
    pub fn validate(&self) -> Result<(), GradeError> {
        let ok = self.cv_low.is_finite()
            && self.cv_high.is_finite()
            && self.cv_low >= 0.0
            && self.cv_low < self.cv_high;
        if !ok {
            return Err(GradeError::InvalidCvCutoffs {
                low: self.cv_low,
                high: self.cv_high,
            });
        }
        Ok(())
    }
}

/// Result of grading one period.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodGrades {
    pub threshold: ThresholdRecord,
    pub grades: Vec<GradeRecord>,
    pub diagnostics: TimestampDiagnostics,
}

/// Result of grading a whole timeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GradingOutcome {
    pub grades: Vec<GradeRecord>,
    pub thresholds: Vec<ThresholdRecord>,
    pub diagnostics: Vec<TimestampDiagnostics>,
    pub degeneracies: Vec<Degeneracy>,
}

/// Assigns Good/Medium/Poor per period against regime-dependent thresholds.
///
/// Periods are processed in ascending order. The historical regime only
/// ever sees scores of strictly earlier periods, so grades at `t` do not
/// depend on anything after `t`.
#[derive(Clone, Debug)]
#[doc(alias = "GradeThreshold")]
pub struct ThresholdGrader {
    config: GradingConfig,
}

impl ThresholdGrader {
    pub fn new(config: GradingConfig) -> Result<Self, GradeError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Grade every period that has at least one score.
    pub fn grade(&self, scores: &[ScoreRecord]) -> Result<GradingOutcome, GradeError> {
        self.grade_timeline(&[], scores)
    }

    /// Grade over `timeline` plus every timestamp appearing in `scores`.
    /// Timeline periods without scores are skipped and flagged.
    pub fn grade_timeline(
        &self,
        timeline: &[Timestamp],
        scores: &[ScoreRecord],
    ) -> Result<GradingOutcome, GradeError> {
        if timeline.is_empty() && scores.is_empty() {
            warn!("threshold grader received no scores");
            return Ok(GradingOutcome::default());
        }

        let mut periods: BTreeMap<Timestamp, Vec<&ScoreRecord>> =
            timeline.iter().map(|t| (*t, Vec::new())).collect();
        for record in scores {
            periods.entry(record.timestamp).or_default().push(record);
        }

        let mut history = HistoricalWindow::new();
        let mut outcome = GradingOutcome::default();
        for (timestamp, period) in periods {
            let graded =
                self.grade_period(&mut history, timestamp, &period, &mut outcome.degeneracies)?;
            if let Some(p) = graded {
                outcome.thresholds.push(p.threshold);
                outcome.grades.extend(p.grades);
                outcome.diagnostics.push(p.diagnostics);
            }
        }

        info!(
            periods = outcome.thresholds.len(),
            graded = outcome.grades.len(),
            degenerate = outcome.degeneracies.len(),
            "graded stations"
        );
        Ok(outcome)
    }

    /// Grade one period against `history`, then commit its scores.
    ///
    /// Returns `None` for a period with no scores; the history still
    /// advances past `timestamp`.
    pub fn grade_period(
        &self,
        history: &mut HistoricalWindow,
        timestamp: Timestamp,
        period: &[&ScoreRecord],
        degeneracies: &mut Vec<Degeneracy>,
    ) -> Result<Option<PeriodGrades>, GradeError> {
        let mut seen = HashSet::with_capacity(period.len());
        for record in period {
            if !record.score.is_finite() {
                return Err(GradeError::NonFiniteScore {
                    station: record.station.clone(),
                    timestamp,
                    score: record.score,
                });
            }
            if !seen.insert(&record.station) {
                return Err(GradeError::DuplicateScore {
                    station: record.station.clone(),
                    timestamp,
                });
            }
        }

        let values: Vec<f64> = period.iter().map(|r| r.score).collect();
        let Some(current) = Moments::of(&values) else {
            warn!(%timestamp, "no scores for period; skipped");
            degeneracies.push(Degeneracy::EmptySlice { timestamp });
            history.commit(timestamp, [])?;
            return Ok(None);
        };

        let prior = history.moments();
        let historical = match prior {
            Some(m) => m,
            None => {
                warn!(%timestamp, "no score history; using current period statistics");
                degeneracies.push(Degeneracy::NoHistory { timestamp });
                current
            }
        };

        let cv = current.cv();
        let regime = select_regime(cv, self.config.cv_low, self.config.cv_high);
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        let thresholds = compute_thresholds(regime, &sorted, &current, &historical);
        if !thresholds.is_ordered() {
            return Err(GradeError::InvertedThresholds {
                timestamp,
                regime,
                t_low: thresholds.t_low,
                t_high: thresholds.t_high,
            });
        }

        let mut counts = GradeCounts::default();
        let grades: Vec<GradeRecord> = period
            .iter()
            .map(|record| {
                let grade = classify(record.score, thresholds.t_low, thresholds.t_high);
                counts.record(grade);
                GradeRecord {
                    station: record.station.clone(),
                    timestamp,
                    score: record.score,
                    grade,
                    explanation: explain(grade, &record.contributions),
                }
            })
            .collect();

        debug!(
            %timestamp,
            stations = current.len,
            mean = current.mean,
            cv,
            %regime,
            t_high = thresholds.t_high,
            t_low = thresholds.t_low,
            good = counts.good,
            medium = counts.medium,
            poor = counts.poor,
            "graded period"
        );

        let diagnostics = TimestampDiagnostics {
            timestamp,
            station_count: current.len,
            mean: current.mean,
            std_dev: current.std_dev,
            cv,
            has_history: prior.is_some(),
            history_len: history.len(),
            historical_mean: prior.map(|m| m.mean),
            historical_std_dev: prior.map(|m| m.std_dev),
            regime,
            t_high: thresholds.t_high,
            t_low: thresholds.t_low,
            grades: counts,
        };

        history.commit(timestamp, values)?;

        Ok(Some(PeriodGrades {
            threshold: ThresholdRecord {
                timestamp,
                t_high: thresholds.t_high,
                t_low: thresholds.t_low,
                regime,
            },
            grades,
            diagnostics,
        }))
    }
}

/// `score <= t_low` is Poor and `score >= t_high` is Good; both bounds win
/// over Medium on equality.
pub fn classify(score: f64, t_low: f64, t_high: f64) -> Grade {
    if score <= t_low {
        Grade::Poor
    } else if score >= t_high {
        Grade::Good
    } else {
        Grade::Medium
    }
}
