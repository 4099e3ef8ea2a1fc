use crate::config::{PipelineConfig, ScoringConfig};
use crate::error::PipelineError;
use crate::export::{GradeRow, PipelineReport};
use crate::scoring::{score_stations, StationScore};
use quality_grader::ThresholdGrader;
use quality_normalizer::{NormalizedTable, Normalizer};
use quality_types::{GradeRecord, MetricTable, StationId, ThresholdRecord, Timestamp};
use quality_weights::{WeightEngine, WeightTable};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Normalizer → WeightEngine → scoring → ThresholdGrader, over one table.
///
/// The Normalizer sees long-format samples; the WeightEngine sees the raw
/// wide rows. Their outputs meet in the scoring join.
#[derive(Clone, Debug)]
pub struct QualityPipeline {
    normalizer: Normalizer,
    weights: WeightEngine,
    grader: ThresholdGrader,
    scoring: ScoringConfig,
}

impl QualityPipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            normalizer: Normalizer::new(config.normalizer.clone())?,
            weights: WeightEngine::new(config.weights.clone())?,
            grader: ThresholdGrader::new(config.grading.clone())?,
            scoring: config.scoring.clone(),
        })
    }

    pub fn normalize(&self, table: &MetricTable) -> Result<NormalizedTable, PipelineError> {
        Ok(self.normalizer.normalize(&table.samples())?)
    }

    pub fn weigh(&self, table: &MetricTable) -> Result<WeightTable, PipelineError> {
        Ok(self.weights.compute(table.rows())?)
    }

    pub fn run(&self, table: &MetricTable) -> Result<PipelineReport, PipelineError> {
        if table.is_empty() {
            warn!("no input rows; nothing to grade");
            return Ok(PipelineReport::default());
        }
        info!(
            rows = table.len(),
            stations = table.stations().len(),
            timestamps = table.timestamps().len(),
            "running quality pipeline"
        );

        let normalized = self.normalize(table)?;
        let weights = self.weigh(table)?;
        let scoring = score_stations(&normalized.samples, &weights, &self.scoring)?;
        let graded = self
            .grader
            .grade_timeline(&scoring.timeline, &scoring.records())?;

        let rows = join_rows(&scoring.scores, &graded.grades, &graded.thresholds)?;

        let mut degeneracies = normalized.degeneracies;
        degeneracies.extend(weights.degeneracies);
        degeneracies.extend(scoring.degeneracies);
        degeneracies.extend(graded.degeneracies);
        if !degeneracies.is_empty() {
            warn!(
                count = degeneracies.len(),
                "run completed with degenerate-data fallbacks"
            );
        }

        info!(
            graded = rows.len(),
            periods = graded.thresholds.len(),
            "quality pipeline finished"
        );

        Ok(PipelineReport {
            rows,
            weights: weights.vectors,
            thresholds: graded.thresholds,
            diagnostics: graded.diagnostics,
            degeneracies,
        })
    }
}

/// Pair every score with its grade and its period's thresholds, keyed by
/// (timestamp, station).
fn join_rows(
    scores: &[StationScore],
    grades: &[GradeRecord],
    thresholds: &[ThresholdRecord],
) -> Result<Vec<GradeRow>, PipelineError> {
    let by_key: BTreeMap<(Timestamp, &StationId), &GradeRecord> = grades
        .iter()
        .map(|g| ((g.timestamp, &g.station), g))
        .collect();
    let by_time: BTreeMap<Timestamp, &ThresholdRecord> =
        thresholds.iter().map(|t| (t.timestamp, t)).collect();

    scores
        .iter()
        .map(|score| {
            let record = &score.record;
            let ungraded = || PipelineError::Ungraded {
                station: record.station.clone(),
                timestamp: record.timestamp,
            };
            let grade = by_key
                .get(&(record.timestamp, &record.station))
                .ok_or_else(ungraded)?;
            let threshold = by_time.get(&record.timestamp).ok_or_else(ungraded)?;
            Ok(GradeRow::new(score, grade, threshold))
        })
        .collect()
}
