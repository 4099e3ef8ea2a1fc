//! Property tests: grades agree with thresholds, and a period's grades
//! depend only on that period and earlier ones.

use proptest::prelude::*;
use quality_grader::{GradingConfig, ThresholdGrader};
use quality_types::{Grade, IndicatorValues, ScoreRecord};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// One period: between 2 and 9 distinct scores in [0, 100].
fn arb_period() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::btree_set(0u32..10_000, 2..10)
        .prop_map(|set| set.into_iter().map(|v| f64::from(v) / 100.0).collect())
}

fn arb_periods(min: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(arb_period(), min..8)
}

fn arb_config() -> impl Strategy<Value = GradingConfig> {
    (0.0f64..0.5, 0.01f64..0.5).prop_map(|(cv_low, gap)| GradingConfig {
        cv_low,
        cv_high: cv_low + gap,
    })
}

fn records(periods: &[Vec<f64>]) -> Vec<ScoreRecord> {
    periods
        .iter()
        .enumerate()
        .flat_map(|(d, scores)| {
            scores.iter().enumerate().map(move |(s, &score)| {
                ScoreRecord::new(
                    format!("S{s}").as_str(),
                    quality_tests::day(d as u32),
                    score,
                    IndicatorValues::new(0.1, 0.2, 0.3, 0.05),
                )
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn grades_follow_thresholds(periods in arb_periods(1), config in arb_config()) {
        let grader = ThresholdGrader::new(config).unwrap();
        let out = grader.grade(&records(&periods)).unwrap();
        prop_assert_eq!(out.thresholds.len(), periods.len());

        for g in &out.grades {
            let t = out.thresholds.iter().find(|t| t.timestamp == g.timestamp).unwrap();
            prop_assert!(t.t_low < t.t_high);
            let expected = if g.score <= t.t_low {
                Grade::Poor
            } else if g.score >= t.t_high {
                Grade::Good
            } else {
                Grade::Medium
            };
            prop_assert_eq!(g.grade, expected);
        }
    }

    #[test]
    fn future_scores_do_not_change_the_past(
        periods in arb_periods(2),
        replacement in arb_periods(1),
        config in arb_config(),
    ) {
        let cut = periods.len() / 2;
        let mut altered = periods[..cut].to_vec();
        altered.extend(replacement);

        let grader = ThresholdGrader::new(config).unwrap();
        let base = grader.grade(&records(&periods)).unwrap();
        let other = grader.grade(&records(&altered)).unwrap();

        let before = quality_tests::day(cut as u32);
        prop_assert_eq!(
            base.thresholds.iter().filter(|t| t.timestamp < before).collect::<Vec<_>>(),
            other.thresholds.iter().filter(|t| t.timestamp < before).collect::<Vec<_>>()
        );
        prop_assert_eq!(
            base.grades.iter().filter(|g| g.timestamp < before).collect::<Vec<_>>(),
            other.grades.iter().filter(|g| g.timestamp < before).collect::<Vec<_>>()
        );
    }
}
