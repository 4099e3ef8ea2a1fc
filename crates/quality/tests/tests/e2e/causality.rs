//! End-to-end test: results for a day never depend on later days.

use quality_pipeline::{PipelineConfig, PipelineReport, QualityPipeline};
use quality_tests::{day, plant_table};
use quality_types::{IndicatorValues, MetricRow, MetricTable};

const CUTOFF: u32 = 4;

fn run(table: &MetricTable) -> PipelineReport {
    QualityPipeline::new(&PipelineConfig::default())
        .unwrap()
        .run(table)
        .unwrap()
}

/// Rewrite every row from `CUTOFF` onward.
fn perturb_future(table: &MetricTable) -> MetricTable {
    table
        .rows()
        .iter()
        .map(|row| {
            if row.timestamp < day(CUTOFF) {
                return row.clone();
            }
            let values = row.values.map(|_, v| v * 3.0 + 1.0);
            MetricRow { values, ..row.clone() }
        })
        .collect()
}

fn assert_past_unchanged(base: &PipelineReport, mutated: &PipelineReport) {
    let past = |r: &PipelineReport| {
        (
            r.rows
                .iter()
                .filter(|x| x.timestamp < day(CUTOFF))
                .cloned()
                .collect::<Vec<_>>(),
            r.thresholds
                .iter()
                .filter(|x| x.timestamp < day(CUTOFF))
                .cloned()
                .collect::<Vec<_>>(),
            r.weights
                .iter()
                .filter(|x| x.timestamp < day(CUTOFF))
                .cloned()
                .collect::<Vec<_>>(),
            r.diagnostics
                .iter()
                .filter(|x| x.timestamp < day(CUTOFF))
                .cloned()
                .collect::<Vec<_>>(),
        )
    };
    let (rows_a, thresholds_a, weights_a, diag_a) = past(base);
    let (rows_b, thresholds_b, weights_b, diag_b) = past(mutated);
    assert_eq!(rows_a.len(), 5 * CUTOFF as usize);
    assert_eq!(rows_a, rows_b);
    assert_eq!(thresholds_a, thresholds_b);
    assert_eq!(weights_a, weights_b);
    assert_eq!(diag_a, diag_b);
}

#[test]
fn future_values_do_not_change_past_grades() {
    let table = plant_table(8);
    let base = run(&table);
    let mutated = run(&perturb_future(&table));

    assert_past_unchanged(&base, &mutated);
    // The perturbation does reach the future.
    assert_ne!(
        base.weights.last().map(|w| w.weights),
        mutated.weights.last().map(|w| w.weights)
    );
}

#[test]
fn appending_days_does_not_change_past_grades() {
    let short = run(&plant_table(CUTOFF));
    let long = run(&plant_table(8));
    assert_past_unchanged(&short, &long);
}

#[test]
fn new_station_joining_later_does_not_change_past_grades() {
    let table = plant_table(8);
    let mut rows = table.rows().to_vec();
    for offset in CUTOFF..8 {
        rows.push(MetricRow::new(
            "S99",
            day(offset),
            IndicatorValues::new(500.0, 0.5, 400.0, 90.0),
        ));
    }
    let base = run(&table);
    let joined = run(&MetricTable::new(rows));
    assert_past_unchanged(&base, &joined);
}
