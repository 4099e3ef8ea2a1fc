//! CRITIC weighting: indicators that vary more, and that disagree more with
//! the other indicators, carry more information and get more weight.

use quality_types::{Degeneracy, Indicator, IndicatorValues, Timestamp};
use tracing::warn;

/// CRITIC result over one window.
#[derive(Clone, Debug, PartialEq)]
pub struct CriticOutcome {
    /// Non-negative, summing to one.
    pub weights: IndicatorValues,
    /// Sample standard deviation of each min-max normalized column.
    pub std_dev: IndicatorValues,
    /// `Σ_j (1 - r_ij)` over all indicators `j`, including `i` itself.
    pub conflict: IndicatorValues,
    pub degeneracies: Vec<Degeneracy>,
}

/// Compute CRITIC weights over every row of `window`.
///
/// `timestamp` only labels any degeneracy flags raised.
pub fn critic_weights(window: &[IndicatorValues], timestamp: Timestamp) -> CriticOutcome {
    let mut degeneracies = Vec::new();
    let columns = normalized_columns(window, timestamp, &mut degeneracies);

    let std_dev = IndicatorValues::from_fn(|i| sample_std(&columns[i.index()]));

    let conflict = if window.len() < 2 {
        warn!(%timestamp, rows = window.len(), "too few rows for correlation; conflicts set to 0");
        degeneracies.push(Degeneracy::InsufficientCorrelationRows {
            timestamp,
            rows: window.len(),
        });
        IndicatorValues::splat(0.0)
    } else {
        conflict_scores(&columns, timestamp, &mut degeneracies)
    };

    let scores = IndicatorValues::from_fn(|i| std_dev.get(i) * conflict.get(i));
    let weights = match scores.normalized() {
        Some(w) => w,
        None => {
            warn!(%timestamp, "all CRITIC scores are zero; using equal weights");
            degeneracies.push(Degeneracy::EqualWeightFallback { timestamp });
            IndicatorValues::splat(1.0 / Indicator::COUNT as f64)
        }
    };

    CriticOutcome {
        weights,
        std_dev,
        conflict,
        degeneracies,
    }
}

/// Min-max normalize each indicator column over the window. A column with
/// zero range normalizes to all zeros.
fn normalized_columns(
    window: &[IndicatorValues],
    timestamp: Timestamp,
    degeneracies: &mut Vec<Degeneracy>,
) -> [Vec<f64>; Indicator::COUNT] {
    let mut columns: [Vec<f64>; Indicator::COUNT] = Default::default();
    if window.is_empty() {
        return columns;
    }
    for indicator in Indicator::ALL {
        let raw: Vec<f64> = window.iter().map(|row| row.get(indicator)).collect();
        let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
        let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        columns[indicator.index()] = if range == 0.0 {
            if window.len() > 1 {
                degeneracies.push(Degeneracy::ZeroRange {
                    indicator,
                    timestamp,
                });
            }
            vec![0.0; raw.len()]
        } else {
            raw.iter().map(|v| (v - min) / range).collect()
        };
    }
    columns
}

/// Sample (n - 1) standard deviation; 0 for fewer than two values.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Pearson correlation, or `None` when either column has zero variance.
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

fn conflict_scores(
    columns: &[Vec<f64>; Indicator::COUNT],
    timestamp: Timestamp,
    degeneracies: &mut Vec<Degeneracy>,
) -> IndicatorValues {
    let mut conflict = IndicatorValues::splat(0.0);
    for left in Indicator::ALL {
        let mut total = 0.0;
        for right in Indicator::ALL {
            match pearson(&columns[left.index()], &columns[right.index()]) {
                Some(r) => total += 1.0 - r,
                None => {
                    if left < right {
                        degeneracies.push(Degeneracy::UndefinedCorrelation {
                            timestamp,
                            left,
                            right,
                        });
                    }
                }
            }
        }
        conflict.set(left, total);
    }
    conflict
}
