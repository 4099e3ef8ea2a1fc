//! End-to-end test: reference scenarios through each stage and the full pipeline.

use quality_grader::{GradingConfig, ThresholdGrader};
use quality_normalizer::{ema, ema_mean};
use quality_pipeline::{parse_rows, PipelineConfig, QualityPipeline};
use quality_tests::{day, plant_table, plant_values, to_json, PLANT_STATIONS};
use quality_types::{Grade, Indicator, IndicatorValues, MetricRow, MetricTable, Regime, ScoreRecord};
use quality_weights::{ExpertPanel, WeightConfig, WeightEngine};

// ---------------------------------------------------------------------------
// Stage scenarios
// ---------------------------------------------------------------------------

#[test]
fn three_station_quantile_period() {
    let scores: Vec<ScoreRecord> = [("s1", 40.0), ("s2", 60.0), ("s3", 80.0)]
        .into_iter()
        .map(|(s, v)| ScoreRecord::new(s, day(0), v, IndicatorValues::splat(0.1)))
        .collect();

    let out = ThresholdGrader::new(GradingConfig::default())
        .unwrap()
        .grade(&scores)
        .unwrap();

    let threshold = &out.thresholds[0];
    assert_eq!(threshold.regime, Regime::CurrentQuantile);
    assert_eq!(threshold.t_low, 50.0);
    assert_eq!(threshold.t_high, 70.0);
    let grades: Vec<Grade> = out.grades.iter().map(|g| g.grade).collect();
    assert_eq!(grades, vec![Grade::Poor, Grade::Medium, Grade::Good]);
}

#[test]
fn constant_series_ema_without_bias_correction() {
    let v = ema(&[10.0, 10.0, 10.0], 0.9);
    let expected = [1.0, 1.9, 2.71];
    for (a, b) in v.iter().zip(expected) {
        assert!((a - b).abs() < 1e-9, "{a} vs {b}");
    }
    let corrected = ema_mean(&[10.0, 10.0, 10.0], 0.9, true);
    for c in corrected {
        assert!((c - 10.0).abs() < 1e-9);
    }
}

#[test]
fn single_expert_full_share_ignores_critic() {
    let expert = IndicatorValues::new(0.4, 0.3, 0.2, 0.1);
    let engine = WeightEngine::new(WeightConfig {
        expert_share: 1.0,
        experts: ExpertPanel::new(vec![expert]).unwrap(),
    })
    .unwrap();

    let table = plant_table(6);
    let weights = engine.compute(table.rows()).unwrap();
    assert_eq!(weights.vectors.len(), 6);
    for v in &weights.vectors {
        for indicator in Indicator::ALL {
            assert!((v.weights.get(indicator) - expert.get(indicator)).abs() < 1e-12);
        }
    }
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

#[test]
fn plant_report_is_complete_and_consistent() {
    let table = plant_table(8);
    let pipeline = QualityPipeline::new(&PipelineConfig::default()).unwrap();
    let report = pipeline.run(&table).unwrap();

    assert_eq!(report.rows.len(), PLANT_STATIONS.len() * 8);
    assert_eq!(report.weights.len(), 8);
    assert_eq!(report.thresholds.len(), 8);
    assert_eq!(report.diagnostics.len(), 8);

    for w in &report.weights {
        assert!(w.is_valid(), "weights at {} not a distribution", w.timestamp);
    }
    for t in &report.thresholds {
        assert!(t.t_low < t.t_high);
    }

    for row in &report.rows {
        for (_, n) in row.normalized.iter() {
            assert!((0.0..=1.0).contains(&n));
        }
        let expected = 100.0 - 100.0 * row.contributions.sum();
        assert!((row.score - expected).abs() < 1e-9);

        let grade = if row.score <= row.t_low {
            Grade::Poor
        } else if row.score >= row.t_high {
            Grade::Good
        } else {
            Grade::Medium
        };
        assert_eq!(row.grade, grade);
        assert_eq!(row.highlight, row.grade.highlight());

        let named = row.explanation.matches('=').count();
        match row.grade {
            Grade::Good => assert!(row.explanation.is_empty()),
            Grade::Medium => assert_eq!(named, 1),
            Grade::Poor => {
                assert_eq!(named, 2);
                assert!(row.explanation.contains(", "));
            }
        }
    }

    // The first station is cheapest on every indicator every day.
    for row in report.rows.iter().filter(|r| r.station.as_str() == "S01") {
        assert_eq!(row.score, 100.0);
        assert_eq!(row.grade, Grade::Good);
    }
    let grades: Vec<Grade> = report.rows.iter().map(|r| r.grade).collect();
    assert!(grades.contains(&Grade::Medium));
    assert!(grades.contains(&Grade::Poor));
}

#[test]
fn diagnostics_track_history() {
    let report = QualityPipeline::new(&PipelineConfig::default())
        .unwrap()
        .run(&plant_table(4))
        .unwrap();

    let first = &report.diagnostics[0];
    assert!(!first.has_history);
    assert_eq!(first.history_len, 0);
    assert_eq!(first.historical_mean, None);

    for (k, d) in report.diagnostics.iter().enumerate().skip(1) {
        assert!(d.has_history);
        assert_eq!(d.history_len, PLANT_STATIONS.len() * k);
        assert_eq!(d.station_count, PLANT_STATIONS.len());
        assert_eq!(d.grades.total(), PLANT_STATIONS.len());
    }
}

#[test]
fn cutoffs_select_the_regime() {
    let table = plant_table(5);

    // Plant periods have a CV near 0.6.
    let mut config = PipelineConfig::default();
    config.grading = GradingConfig {
        cv_low: 0.8,
        cv_high: 0.9,
    };
    let report = QualityPipeline::new(&config).unwrap().run(&table).unwrap();
    assert!(report
        .thresholds
        .iter()
        .all(|t| t.regime == Regime::Historical));

    config.grading = GradingConfig {
        cv_low: 0.1,
        cv_high: 0.9,
    };
    let report = QualityPipeline::new(&config).unwrap().run(&table).unwrap();
    assert!(report
        .thresholds
        .iter()
        .all(|t| t.regime == Regime::CurrentQuantile));
}

#[test]
fn json_ingestion_matches_in_memory_table() {
    let table = plant_table(3);
    let parsed = parse_rows(&to_json(&table)).unwrap();
    assert_eq!(parsed.len(), table.len());
    for (a, b) in parsed.rows().iter().zip(table.rows()) {
        assert_eq!(a.station, b.station);
        assert_eq!(a.timestamp, b.timestamp);
        for (i, v) in a.values.iter() {
            assert!((v - b.values.get(i)).abs() <= 1e-12 * v.abs().max(1.0));
        }
    }

    let pipeline = QualityPipeline::new(&PipelineConfig::default()).unwrap();
    let from_json = pipeline.run(&parsed).unwrap();
    let direct = pipeline.run(&table).unwrap();
    for (a, b) in from_json.rows.iter().zip(&direct.rows) {
        assert_eq!(a.station, b.station);
        assert_eq!(a.grade, b.grade);
        assert!((a.score - b.score).abs() < 1e-9);
    }
}

#[test]
fn json_ingestion_keeps_unusual_station_ids() {
    let table: MetricTable = ["line \"A\"", "cell\\7"]
        .iter()
        .enumerate()
        .map(|(k, s)| MetricRow::new(*s, day(0), plant_values(k, 0)))
        .collect();
    let parsed = parse_rows(&to_json(&table)).unwrap();
    let ids: Vec<&str> = parsed.rows().iter().map(|r| r.station.as_str()).collect();
    assert_eq!(ids, vec!["line \"A\"", "cell\\7"]);
}
