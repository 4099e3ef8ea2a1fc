//! Exponential moving average primitives over dense series.
//!
//! All functions take a contiguous slice with no missing entries and a
//! smoothing factor `beta` in `[0, 1)`. The recursion cold-starts from
//! `v[-1] = 0`, so `v[0] = (1 - beta) * theta[0]`.

/// Deviations smaller than this are snapped to zero, and standard
/// deviations are floored to it before dividing.
pub const NORMALIZE_EPSILON: f64 = 1e-6;

/// Raw EMA: `v[t] = beta * v[t-1] + (1 - beta) * theta[t]`.
pub fn ema(theta: &[f64], beta: f64) -> Vec<f64> {
    debug_assert!((0.0..1.0).contains(&beta));
    let mut out = Vec::with_capacity(theta.len());
    let mut prev = 0.0;
    for &x in theta {
        let v = beta * prev + (1.0 - beta) * x;
        out.push(v);
        prev = v;
    }
    out
}

/// Divide out the cold-start bias: `v[t] / (1 - beta^(t+1))`.
pub fn bias_correct(raw: &[f64], beta: f64) -> Vec<f64> {
    raw.iter()
        .enumerate()
        .map(|(t, v)| v / (1.0 - beta.powi(t as i32 + 1)))
        .collect()
}

/// EMA mean, bias-corrected when requested.
pub fn ema_mean(theta: &[f64], beta: f64, bias_correction: bool) -> Vec<f64> {
    let raw = ema(theta, beta);
    if bias_correction {
        bias_correct(&raw, beta)
    } else {
        raw
    }
}

/// EMA standard deviation from `EMA(theta²) - EMA(theta)²`.
///
/// Floating error can leave the variance slightly negative; it is clamped
/// to zero so the result is always a real, non-negative number.
pub fn ema_std(theta: &[f64], beta: f64, bias_correction: bool) -> Vec<f64> {
    let mu = ema_mean(theta, beta, bias_correction);
    let squares: Vec<f64> = theta.iter().map(|x| x * x).collect();
    let nu = ema_mean(&squares, beta, bias_correction);
    mu.iter()
        .zip(&nu)
        .map(|(m, n)| (n - m * m).max(0.0).sqrt())
        .collect()
}

/// EMA-based z-score normalization of one series.
#[derive(Clone, Debug, PartialEq)]
pub struct EmaNormalization {
    /// `(theta - mean) / max(std, eps)`, with near-zero deviations snapped to 0.
    pub z: Vec<f64>,
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
}

pub fn ema_normalize(theta: &[f64], beta: f64, bias_correction: bool) -> EmaNormalization {
    let mean = ema_mean(theta, beta, bias_correction);
    let std_dev = ema_std(theta, beta, bias_correction);
    let z = theta
        .iter()
        .zip(mean.iter().zip(&std_dev))
        .map(|(x, (m, s))| {
            let deviation = x - m;
            if deviation.abs() < NORMALIZE_EPSILON {
                0.0
            } else {
                deviation / s.max(NORMALIZE_EPSILON)
            }
        })
        .collect();
    EmaNormalization { z, mean, std_dev }
}
