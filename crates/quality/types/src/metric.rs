use crate::indicator::{Indicator, IndicatorValues};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Reporting period. One value per calendar day.
pub type Timestamp = chrono::NaiveDate;

/// Identifier of a production station (work cell).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One raw row from the ingestion collaborator: a station's four indicator
/// values for one day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub station: StationId,
    pub timestamp: Timestamp,
    pub values: IndicatorValues,
}

impl MetricRow {
    pub fn new(station: impl Into<StationId>, timestamp: Timestamp, values: IndicatorValues) -> Self {
        Self {
            station: station.into(),
            timestamp,
            values,
        }
    }
}

/// A single raw observation in long format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub station: StationId,
    pub indicator: Indicator,
    pub timestamp: Timestamp,
    pub value: f64,
}

/// A smoothed, cross-sectionally scaled observation in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSample {
    pub station: StationId,
    pub indicator: Indicator,
    pub timestamp: Timestamp,
    pub value: f64,
}

/// The raw per-station daily metric table. Read-only to the scoring stages.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTable {
    rows: Vec<MetricRow>,
}

impl MetricTable {
    pub fn new(rows: Vec<MetricRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct timestamps in ascending order.
    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.rows
            .iter()
            .map(|r| r.timestamp)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct stations in ascending order.
    pub fn stations(&self) -> Vec<StationId> {
        self.rows
            .iter()
            .map(|r| r.station.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Flatten into long format, four samples per row.
    pub fn samples(&self) -> Vec<MetricSample> {
        self.rows
            .iter()
            .flat_map(|row| {
                row.values.iter().map(move |(indicator, value)| MetricSample {
                    station: row.station.clone(),
                    indicator,
                    timestamp: row.timestamp,
                    value,
                })
            })
            .collect()
    }
}

impl FromIterator<MetricRow> for MetricTable {
    fn from_iter<I: IntoIterator<Item = MetricRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
