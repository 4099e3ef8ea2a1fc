//! JSON ingestion of raw station metrics.
//!
//! Input is an array of objects, one per station and day:
//!
//! ```json
//! [{"station": "S01", "timestamp": "2024-08-01", "inspection_cost": 1250.0,
//!   "defect_rate": 0.021, "rework_cost": 310.5, "scrap_cost": 88.0}]
//! ```
//!
//! `pass_rate` may stand in for `defect_rate`, which is then `1 - pass_rate`.

use crate::error::PipelineError;
use quality_types::{Indicator, IndicatorValues, MetricRow, MetricTable, StationId, Timestamp};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::io::Read;
use tracing::info;

pub const STATION_COLUMN: &str = "station";
pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const PASS_RATE_COLUMN: &str = "pass_rate";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d";

/// Parse rows from a JSON reader.
pub fn read_rows(reader: impl Read) -> Result<MetricTable, PipelineError> {
    let objects: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;
    rows_from_objects(&objects)
}

/// Parse rows from a JSON string.
pub fn parse_rows(json: &str) -> Result<MetricTable, PipelineError> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(json)?;
    rows_from_objects(&objects)
}

fn rows_from_objects(objects: &[Map<String, Value>]) -> Result<MetricTable, PipelineError> {
    check_schema(objects)?;
    let rows = objects
        .iter()
        .enumerate()
        .map(|(index, object)| parse_row(index, object))
        .collect::<Result<MetricTable, _>>()?;
    info!(rows = rows.len(), "ingested metric rows");
    Ok(rows)
}

/// Every required column absent from at least one row, in one error.
fn check_schema(objects: &[Map<String, Value>]) -> Result<(), PipelineError> {
    let mut missing = BTreeSet::new();
    for object in objects {
        for column in [STATION_COLUMN, TIMESTAMP_COLUMN] {
            if !object.contains_key(column) {
                missing.insert(column.to_string());
            }
        }
        for indicator in Indicator::ALL {
            let present = object.contains_key(indicator.as_str())
                || (indicator == Indicator::DefectRate && object.contains_key(PASS_RATE_COLUMN));
            if !present {
                missing.insert(indicator.as_str().to_string());
            }
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::Schema {
            missing: missing.into_iter().collect(),
        })
    }
}

fn parse_row(index: usize, object: &Map<String, Value>) -> Result<MetricRow, PipelineError> {
    let invalid = |reason: String| PipelineError::InvalidRow { index, reason };

    let station = match object.get(STATION_COLUMN) {
        Some(Value::String(s)) => StationId::new(s.as_str()),
        Some(Value::Number(n)) => StationId::new(n.to_string()),
        other => return Err(invalid(format!("station must be a string or number, got {other:?}"))),
    };

    let timestamp = object
        .get(TIMESTAMP_COLUMN)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("timestamp must be a string".to_string()))
        .and_then(|s| {
            Timestamp::parse_from_str(s, TIMESTAMP_FORMAT)
                .map_err(|e| invalid(format!("timestamp {s:?}: {e}")))
        })?;

    let number = |column: &str| -> Result<f64, PipelineError> {
        object
            .get(column)
            .and_then(Value::as_f64)
            .ok_or_else(|| invalid(format!("{column} must be a number")))
    };

    let mut values = IndicatorValues::default();
    for indicator in Indicator::ALL {
        let value = if indicator == Indicator::DefectRate && !object.contains_key(indicator.as_str()) {
            1.0 - number(PASS_RATE_COLUMN)?
        } else {
            number(indicator.as_str())?
        };
        values.set(indicator, value);
    }

    Ok(MetricRow {
        station,
        timestamp,
        values,
    })
}
