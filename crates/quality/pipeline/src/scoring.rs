//! Join of normalized indicators with per-timestamp weights.

use crate::config::ScoringConfig;
use crate::error::PipelineError;
use quality_types::{
    Degeneracy, Indicator, IndicatorValues, NormalizedSample, ScoreRecord, StationId, Timestamp,
};
use quality_weights::WeightTable;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// One scored station-period with the inputs its score came from.
#[derive(Clone, Debug, PartialEq)]
pub struct StationScore {
    pub normalized: IndicatorValues,
    pub weights: IndicatorValues,
    pub record: ScoreRecord,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scoring {
    /// Ordered by timestamp, then station.
    pub scores: Vec<StationScore>,
    /// Every timestamp with normalized data, scored or not.
    pub timeline: Vec<Timestamp>,
    pub degeneracies: Vec<Degeneracy>,
}

impl Scoring {
    pub fn records(&self) -> Vec<ScoreRecord> {
        self.scores.iter().map(|s| s.record.clone()).collect()
    }
}

/// Score every (station, timestamp) that has all four normalized indicators:
/// `contribution = normalized × weight`, `score = scale − scale × Σ contribution`.
pub fn score_stations(
    samples: &[NormalizedSample],
    weights: &WeightTable,
    config: &ScoringConfig,
) -> Result<Scoring, PipelineError> {
    let mut cells: BTreeMap<(Timestamp, StationId), [Option<f64>; Indicator::COUNT]> =
        BTreeMap::new();
    for sample in samples {
        let cell = cells
            .entry((sample.timestamp, sample.station.clone()))
            .or_default();
        cell[sample.indicator.index()] = Some(sample.value);
    }

    let timeline: BTreeSet<Timestamp> = cells.keys().map(|(t, _)| *t).collect();
    let mut scoring = Scoring {
        timeline: timeline.into_iter().collect(),
        ..Default::default()
    };

    for ((timestamp, station), cell) in cells {
        let weight = weights
            .get(timestamp)
            .ok_or(PipelineError::MissingWeights { timestamp })?;

        let mut normalized = IndicatorValues::default();
        let mut complete = true;
        for indicator in Indicator::ALL {
            match cell[indicator.index()] {
                Some(v) => normalized.set(indicator, v),
                None => complete = false,
            }
        }
        if !complete {
            warn!(%station, %timestamp, "station lacks normalized indicators; not scored");
            scoring
                .degeneracies
                .push(Degeneracy::IncompleteRow { station, timestamp });
            continue;
        }

        let contributions = normalized.weighted_by(&weight.weights);
        let score = config.scale - config.scale * contributions.sum();
        debug!(%station, %timestamp, score, "scored station");

        scoring.scores.push(StationScore {
            normalized,
            weights: weight.weights,
            record: ScoreRecord::new(station, timestamp, score, contributions),
        });
    }

    Ok(scoring)
}
