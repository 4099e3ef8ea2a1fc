use crate::critic::critic_weights;
use crate::error::WeightError;
use crate::expert::ExpertPanel;
use crate::window::GrowingWindow;
use quality_types::{Degeneracy, IndicatorValues, MetricRow, StationId, Timestamp, WeightVector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// WeightEngine parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Fraction `p` of the blended weight taken from the expert panel mean;
    /// the remaining `1 - p` comes from CRITIC.
    pub expert_share: f64,
    pub experts: ExpertPanel,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            expert_share: 0.5,
            experts: ExpertPanel::default_panel(),
        }
    }
}

impl WeightConfig {
    pub fn validate(&self) -> Result<(), WeightError> {
        if !(0.0..=1.0).contains(&self.expert_share) {
            return Err(WeightError::InvalidExpertShare(self.expert_share));
        }
        Ok(())
    }
}

/// One weight vector per distinct input timestamp, ascending.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    pub vectors: Vec<WeightVector>,
    pub degeneracies: Vec<Degeneracy>,
}

impl WeightTable {
    pub fn get(&self, timestamp: Timestamp) -> Option<&WeightVector> {
        self.vectors
            .binary_search_by_key(&timestamp, |v| v.timestamp)
            .ok()
            .map(|idx| &self.vectors[idx])
    }
}

/// Computes time-varying indicator weights.
///
/// For each timestamp `t`, in ascending order, CRITIC weights are computed
/// from scratch over every raw row with timestamp `<= t` and blended with
/// the expert panel mean. The window is never truncated.
#[derive(Clone, Debug)]
#[doc(alias = "CombinedWeight")]
pub struct WeightEngine {
    config: WeightConfig,
    expert_mean: IndicatorValues,
}

impl WeightEngine {
    pub fn new(config: WeightConfig) -> Result<Self, WeightError> {
        config.validate()?;
        let expert_mean = config.experts.mean();
        Ok(Self {
            config,
            expert_mean,
        })
    }

    pub fn config(&self) -> &WeightConfig {
        &self.config
    }

    /// Time-invariant expert component.
    pub fn expert_mean(&self) -> IndicatorValues {
        self.expert_mean
    }

    pub fn compute(&self, rows: &[MetricRow]) -> Result<WeightTable, WeightError> {
        if rows.is_empty() {
            warn!("weight engine received no rows");
            return Ok(WeightTable::default());
        }

        let mut by_time: BTreeMap<Timestamp, Vec<IndicatorValues>> = BTreeMap::new();
        let mut seen: BTreeSet<(Timestamp, &StationId)> = BTreeSet::new();
        for row in rows {
            if !seen.insert((row.timestamp, &row.station)) {
                return Err(WeightError::DuplicateRow {
                    station: row.station.clone(),
                    timestamp: row.timestamp,
                });
            }
            if let Some((indicator, _)) = row.values.iter().find(|(_, v)| !v.is_finite()) {
                return Err(WeightError::NonFiniteValue {
                    station: row.station.clone(),
                    indicator,
                    timestamp: row.timestamp,
                });
            }
            by_time.entry(row.timestamp).or_default().push(row.values);
        }

        let mut window = GrowingWindow::new();
        let mut table = WeightTable::default();
        for (timestamp, slice) in by_time {
            window.commit(timestamp, slice)?;
            let vector = self.step(&window, timestamp, &mut table.degeneracies)?;
            table.vectors.push(vector);
        }

        info!(
            timestamps = table.vectors.len(),
            rows = window.len(),
            degenerate = table.degeneracies.len(),
            "computed combined weights"
        );
        Ok(table)
    }

    /// Weights for `timestamp` given a window already holding every row up
    /// to and including it.
    pub fn step(
        &self,
        window: &GrowingWindow,
        timestamp: Timestamp,
        degeneracies: &mut Vec<Degeneracy>,
    ) -> Result<WeightVector, WeightError> {
        let critic = critic_weights(window.rows(), timestamp);
        degeneracies.extend(critic.degeneracies);

        let p = self.config.expert_share;
        let blended = IndicatorValues::from_fn(|i| {
            p * self.expert_mean.get(i) + (1.0 - p) * critic.weights.get(i)
        });
        let weights = blended
            .normalized()
            .ok_or(WeightError::DegenerateCombination { timestamp })?;

        debug!(
            %timestamp,
            window_rows = window.len(),
            inspection_cost = weights.inspection_cost,
            defect_rate = weights.defect_rate,
            rework_cost = weights.rework_cost,
            scrap_cost = weights.scrap_cost,
            "combined weights"
        );

        Ok(WeightVector {
            timestamp,
            weights,
            critic: critic.weights,
            expert: self.expert_mean,
            window_rows: window.len(),
        })
    }
}
