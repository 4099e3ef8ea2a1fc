//! Report rows handed to presentation and observability consumers.

use crate::error::PipelineError;
use crate::scoring::StationScore;
use quality_types::{
    Degeneracy, Grade, GradeRecord, Highlight, IndicatorValues, Regime, StationId,
    ThresholdRecord, Timestamp, TimestampDiagnostics, WeightVector,
};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One graded (station, timestamp) with everything that produced the grade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradeRow {
    pub station: StationId,
    pub timestamp: Timestamp,
    pub normalized: IndicatorValues,
    pub weights: IndicatorValues,
    pub contributions: IndicatorValues,
    pub score: f64,
    pub t_high: f64,
    pub t_low: f64,
    pub regime: Regime,
    pub grade: Grade,
    pub explanation: String,
    pub highlight: Option<Highlight>,
}

impl GradeRow {
    pub(crate) fn new(score: &StationScore, grade: &GradeRecord, threshold: &ThresholdRecord) -> Self {
        Self {
            station: grade.station.clone(),
            timestamp: grade.timestamp,
            normalized: score.normalized,
            weights: score.weights,
            contributions: score.record.contributions,
            score: grade.score,
            t_high: threshold.t_high,
            t_low: threshold.t_low,
            regime: threshold.regime,
            grade: grade.grade,
            explanation: grade.explanation.clone(),
            highlight: grade.grade.highlight(),
        }
    }
}

/// Everything a pipeline run produced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Ordered by timestamp, then station.
    pub rows: Vec<GradeRow>,
    pub weights: Vec<WeightVector>,
    pub thresholds: Vec<ThresholdRecord>,
    pub diagnostics: Vec<TimestampDiagnostics>,
    pub degeneracies: Vec<Degeneracy>,
}

impl PipelineReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows_at(&self, timestamp: Timestamp) -> impl Iterator<Item = &GradeRow> {
        self.rows.iter().filter(move |r| r.timestamp == timestamp)
    }

    pub fn threshold_at(&self, timestamp: Timestamp) -> Option<&ThresholdRecord> {
        self.thresholds.iter().find(|t| t.timestamp == timestamp)
    }

    /// Write the full report as pretty-printed JSON.
    pub fn write_json(&self, writer: impl Write) -> Result<(), PipelineError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write only the per-timestamp diagnostics table.
    pub fn write_diagnostics(&self, writer: impl Write) -> Result<(), PipelineError> {
        serde_json::to_writer_pretty(writer, &self.diagnostics)?;
        Ok(())
    }
}
