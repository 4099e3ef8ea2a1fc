use crate::error::WeightError;
use quality_types::{Indicator, IndicatorValues};
use serde::{Deserialize, Serialize};

/// A fixed panel of expert-assigned weight vectors.
///
/// Individual vectors need not sum to one; only the panel mean is used, and
/// the blended result is renormalized downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<IndicatorValues>", into = "Vec<IndicatorValues>")]
pub struct ExpertPanel {
    experts: Vec<IndicatorValues>,
}

impl ExpertPanel {
    pub fn new(experts: Vec<IndicatorValues>) -> Result<Self, WeightError> {
        if experts.is_empty() {
            return Err(WeightError::EmptyPanel);
        }
        for (expert, weights) in experts.iter().enumerate() {
            for (indicator, value) in weights.iter() {
                if !(value.is_finite() && value >= 0.0) {
                    return Err(WeightError::InvalidExpertWeight {
                        expert,
                        indicator,
                        value,
                    });
                }
            }
        }
        let panel = Self { experts };
        if panel.mean().sum() <= 0.0 {
            return Err(WeightError::DegenerateExpertPanel);
        }
        Ok(panel)
    }

    /// The ten-expert panel used by default. Defect rate is weighted highest
    /// by every expert.
    pub fn default_panel() -> Self {
        let experts = [
            [0.25, 0.26, 0.22, 0.27],
            [0.24, 0.26, 0.24, 0.26],
            [0.23, 0.27, 0.25, 0.25],
            [0.22, 0.28, 0.25, 0.25],
            [0.21, 0.29, 0.25, 0.25],
            [0.20, 0.30, 0.25, 0.25],
            [0.19, 0.31, 0.25, 0.25],
            [0.18, 0.32, 0.25, 0.25],
            [0.17, 0.33, 0.25, 0.25],
            [0.20, 0.30, 0.25, 0.25],
        ]
        .into_iter()
        .map(|[a, b, c, d]| IndicatorValues::new(a, b, c, d))
        .collect();
        Self { experts }
    }

    pub fn experts(&self) -> &[IndicatorValues] {
        &self.experts
    }

    pub fn len(&self) -> usize {
        self.experts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experts.is_empty()
    }

    /// Arithmetic mean of each indicator's weight across the panel.
    pub fn mean(&self) -> IndicatorValues {
        let n = self.experts.len() as f64;
        IndicatorValues::from_fn(|i: Indicator| {
            self.experts.iter().map(|e| e.get(i)).sum::<f64>() / n
        })
    }
}

impl Default for ExpertPanel {
    fn default() -> Self {
        Self::default_panel()
    }
}

impl TryFrom<Vec<IndicatorValues>> for ExpertPanel {
    type Error = WeightError;

    fn try_from(experts: Vec<IndicatorValues>) -> Result<Self, Self::Error> {
        Self::new(experts)
    }
}

impl From<ExpertPanel> for Vec<IndicatorValues> {
    fn from(panel: ExpertPanel) -> Self {
        panel.experts
    }
}
