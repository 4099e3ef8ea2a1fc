//! Shared fixtures for the cross-crate test suites.

use chrono::Days;
use quality_types::{IndicatorValues, MetricRow, MetricTable, Timestamp};
use serde_json::{json, Value};

/// Stations in [`plant_table`].
pub const PLANT_STATIONS: [&str; 5] = ["S01", "S02", "S03", "S04", "S05"];

/// First day of every fixture.
pub fn start() -> Timestamp {
    Timestamp::from_ymd_opt(2024, 8, 1).expect("valid fixture date")
}

/// `offset` days after [`start`].
pub fn day(offset: u32) -> Timestamp {
    start() + Days::new(u64::from(offset))
}

/// Metrics of one station on one day. Stations differ in level, days
/// wobble around it, and every value is strictly positive.
pub fn plant_values(station: usize, offset: u32) -> IndicatorValues {
    let k = station as f64;
    let d = f64::from(offset);
    IndicatorValues::new(
        100.0 + 40.0 * k + 10.0 * (d + k).sin(),
        0.01 + 0.01 * k + 0.003 * (0.7 * d + k).cos(),
        50.0 + 15.0 * ((station * 3) % 5) as f64 + 5.0 * (1.3 * d).sin(),
        5.0 + 3.0 * ((station * 2) % 5) as f64 + (d + 2.0 * k).cos(),
    )
}

/// A five-station plant reporting every day for `days` days.
pub fn plant_table(days: u32) -> MetricTable {
    (0..days)
        .flat_map(|offset| {
            PLANT_STATIONS
                .iter()
                .enumerate()
                .map(move |(k, s)| MetricRow::new(*s, day(offset), plant_values(k, offset)))
        })
        .collect()
}

/// Serialize rows the way the ingestion boundary expects them.
pub fn to_json(table: &MetricTable) -> String {
    let rows: Vec<Value> = table
        .rows()
        .iter()
        .map(|r| {
            json!({
                "station": r.station.as_str(),
                "timestamp": r.timestamp.to_string(),
                "inspection_cost": r.values.inspection_cost,
                "defect_rate": r.values.defect_rate,
                "rework_cost": r.values.rework_cost,
                "scrap_cost": r.values.scrap_cost,
            })
        })
        .collect();
    Value::Array(rows).to_string()
}
