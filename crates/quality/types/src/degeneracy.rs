use crate::indicator::Indicator;
use crate::metric::{StationId, Timestamp};
use serde::{Deserialize, Serialize};

/// A degenerate-data condition that was recovered locally.
///
/// None of these abort a run. Each is logged where it happens and collected
/// into the run report so the result set is complete but flagged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degeneracy {
    /// All reporting stations scaled to the same value; emitted as zeros.
    ConstantCrossSection {
        indicator: Indicator,
        timestamp: Timestamp,
    },
    /// Indicator had zero range over the weighting window; normalized to 0.
    ZeroRange {
        indicator: Indicator,
        timestamp: Timestamp,
    },
    /// Fewer than two rows in the weighting window; conflicts set to 0.
    InsufficientCorrelationRows { timestamp: Timestamp, rows: usize },
    /// A zero-variance indicator made a correlation undefined; that pair
    /// contributes no conflict.
    UndefinedCorrelation {
        timestamp: Timestamp,
        left: Indicator,
        right: Indicator,
    },
    /// All CRITIC scores were zero; equal weights used instead.
    EqualWeightFallback { timestamp: Timestamp },
    /// No station scores at this timestamp; skipped.
    EmptySlice { timestamp: Timestamp },
    /// First graded timestamp; current statistics stood in for history.
    NoHistory { timestamp: Timestamp },
    /// Station lacked one or more normalized indicators; not scored.
    IncompleteRow {
        station: StationId,
        timestamp: Timestamp,
    },
}

impl Degeneracy {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::ConstantCrossSection { timestamp, .. }
            | Self::ZeroRange { timestamp, .. }
            | Self::InsufficientCorrelationRows { timestamp, .. }
            | Self::UndefinedCorrelation { timestamp, .. }
            | Self::EqualWeightFallback { timestamp }
            | Self::EmptySlice { timestamp }
            | Self::NoHistory { timestamp }
            | Self::IncompleteRow { timestamp, .. } => *timestamp,
        }
    }
}
