//! End-to-end test: degenerate inputs are recovered and flagged; domain and
//! invariant violations abort the run.

use quality_grader::GradeError;
use quality_normalizer::NormalizerError;
use quality_pipeline::{parse_rows, PipelineConfig, PipelineError, QualityPipeline};
use quality_tests::{day, plant_table, plant_values, PLANT_STATIONS};
use quality_types::{Degeneracy, Grade, Indicator, IndicatorValues, MetricRow, MetricTable};
use quality_weights::WeightError;

fn pipeline() -> QualityPipeline {
    QualityPipeline::new(&PipelineConfig::default()).unwrap()
}

#[test]
fn shared_constant_indicator_is_flagged_not_fatal() {
    let table: MetricTable = plant_table(4)
        .rows()
        .iter()
        .map(|r| {
            let mut row = r.clone();
            row.values.scrap_cost = 5.0;
            row
        })
        .collect();

    let report = pipeline().run(&table).unwrap();
    assert_eq!(report.rows.len(), PLANT_STATIONS.len() * 4);

    for offset in 0..4 {
        assert!(report.degeneracies.contains(&Degeneracy::ConstantCrossSection {
            indicator: Indicator::ScrapCost,
            timestamp: day(offset),
        }));
    }
    assert!(report.degeneracies.contains(&Degeneracy::ZeroRange {
        indicator: Indicator::ScrapCost,
        timestamp: day(0),
    }));
    for row in &report.rows {
        assert_eq!(row.normalized.scrap_cost, 0.0);
        assert_eq!(row.contributions.scrap_cost, 0.0);
        assert!(row.score.is_finite());
    }
    for w in &report.weights {
        assert!(w.is_valid());
        assert_eq!(w.critic.scrap_cost, 0.0);
    }
}

#[test]
fn gaps_in_reporting_are_tolerated() {
    // S03 misses days 1 and 2.
    let rows: Vec<MetricRow> = plant_table(5)
        .rows()
        .iter()
        .filter(|r| !(r.station.as_str() == "S03" && (r.timestamp == day(1) || r.timestamp == day(2))))
        .cloned()
        .collect();
    let report = pipeline().run(&MetricTable::new(rows)).unwrap();

    assert_eq!(report.rows.len(), PLANT_STATIONS.len() * 5 - 2);
    assert_eq!(report.diagnostics[1].station_count, PLANT_STATIONS.len() - 1);
    assert_eq!(report.rows_at(day(3)).count(), PLANT_STATIONS.len());
    assert!(report.rows.iter().all(|r| r.score.is_finite()));
}

#[test]
fn lone_reporter_is_graded_against_history() {
    let mut rows = plant_table(3).rows().to_vec();
    rows.push(MetricRow::new("S02", day(3), plant_values(1, 3)));
    let report = pipeline().run(&MetricTable::new(rows)).unwrap();

    let last = report.threshold_at(day(3)).unwrap();
    let diag = report.diagnostics.last().unwrap();
    assert_eq!(diag.station_count, 1);
    assert_eq!(diag.cv, 0.0);
    assert!(diag.has_history);
    assert!(last.t_low < last.t_high);

    // Alone in its cross-section, the station normalizes to zero cost.
    let row = report.rows_at(day(3)).next().unwrap();
    assert_eq!(row.score, 100.0);
    assert_eq!(row.grade, Grade::Good);
}

#[test]
fn single_row_weights_fall_back_to_equal_critic() {
    let table = MetricTable::new(vec![MetricRow::new("S01", day(0), plant_values(0, 0))]);
    let weights = pipeline().weigh(&table).unwrap();
    assert_eq!(weights.vectors[0].critic, IndicatorValues::splat(0.25));
    assert!(weights
        .degeneracies
        .contains(&Degeneracy::InsufficientCorrelationRows {
            timestamp: day(0),
            rows: 1
        }));
}

#[test]
fn identical_stations_invert_the_thresholds() {
    let rows: Vec<MetricRow> = PLANT_STATIONS
        .iter()
        .map(|s| MetricRow::new(*s, day(0), IndicatorValues::new(10.0, 0.02, 5.0, 1.0)))
        .collect();
    let err = pipeline().run(&MetricTable::new(rows)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Grade(GradeError::InvertedThresholds { .. })
    ));
}

#[test]
fn negative_cost_is_a_domain_error() {
    let table = parse_rows(
        r#"[
            {"station": "A", "timestamp": "2024-08-01", "inspection_cost": 10,
             "defect_rate": 0.1, "rework_cost": 4, "scrap_cost": 1},
            {"station": "B", "timestamp": "2024-08-01", "inspection_cost": 12,
             "defect_rate": 0.1, "rework_cost": -3, "scrap_cost": 1}
        ]"#,
    )
    .unwrap();
    let err = pipeline().run(&table).unwrap_err();
    match err {
        PipelineError::Normalizer(NormalizerError::LogDomain {
            station, indicator, ..
        }) => {
            assert_eq!(station.as_str(), "B");
            assert_eq!(indicator, Indicator::ReworkCost);
        }
        other => panic!("expected log domain error, got {other}"),
    }
}

#[test]
fn duplicate_rows_are_rejected() {
    let mut rows = plant_table(1).rows().to_vec();
    rows.push(rows[0].clone());
    assert!(matches!(
        pipeline().run(&MetricTable::new(rows)),
        Err(PipelineError::Normalizer(NormalizerError::DuplicateSample { .. }))
    ));
}

#[test]
fn duplicate_rows_are_rejected_when_only_weighing() {
    let mut rows = plant_table(2).rows().to_vec();
    rows.push(rows[0].clone());
    let err = pipeline().weigh(&MetricTable::new(rows)).unwrap_err();
    match err {
        PipelineError::Weights(WeightError::DuplicateRow { station, timestamp }) => {
            assert_eq!(station.as_str(), "S01");
            assert_eq!(timestamp, day(0));
        }
        other => panic!("expected duplicate row error, got {other}"),
    }
}

#[test]
fn empty_input_is_an_empty_report() {
    let report = pipeline().run(&parse_rows("[]").unwrap()).unwrap();
    assert!(report.is_empty());
    assert!(report.thresholds.is_empty());
}
