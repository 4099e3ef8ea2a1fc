use crate::indicator::IndicatorValues;
use crate::metric::Timestamp;
use serde::{Deserialize, Serialize};

/// Tolerance for "weights sum to one".
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Per-timestamp indicator weights.
///
/// `weights` is the blended vector used for scoring; `critic` and `expert`
/// are the two components it was blended from, kept for export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub timestamp: Timestamp,
    pub weights: IndicatorValues,
    pub critic: IndicatorValues,
    pub expert: IndicatorValues,
    /// Rows in the growing window the CRITIC component was computed over.
    pub window_rows: usize,
}

impl WeightVector {
    /// Non-negative and summing to one within [`WEIGHT_SUM_TOLERANCE`].
    pub fn is_valid(&self) -> bool {
        self.weights.iter().all(|(_, w)| w >= 0.0 && w.is_finite())
            && (self.weights.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }
}
