use crate::error::ScalingError;

/// Ranges narrower than this are treated as constant.
pub const RANGE_EPSILON: f64 = 1e-6;

/// Result of scaling one cross-section.
#[derive(Clone, Debug, PartialEq)]
pub struct Scaled {
    /// Values in `[0, 1]`, in input order.
    pub values: Vec<f64>,
    /// True when the log-transformed values had (numerically) no spread and
    /// the output is all zeros.
    pub constant: bool,
}

/// Log transform followed by min-max scaling to `[0, 1]`.
///
/// Each value becomes `ln(value + offset) / ln(base)`; the resulting vector
/// is rescaled by its own min and max. A flat vector maps to all zeros.
#[doc(alias = "norma")]
pub fn log_minmax(values: &[f64], offset: f64, base: f64) -> Result<Scaled, ScalingError> {
    if !(base.is_finite() && base > 0.0 && base != 1.0) {
        return Err(ScalingError::InvalidBase(base));
    }
    let log_base = base.ln();

    let mut logged = Vec::with_capacity(values.len());
    for (index, &value) in values.iter().enumerate() {
        let shifted = value + offset;
        if !(shifted > 0.0 && shifted.is_finite()) {
            return Err(ScalingError::LogDomain {
                index,
                value,
                offset,
            });
        }
        logged.push(shifted.ln() / log_base);
    }

    if logged.is_empty() {
        return Ok(Scaled {
            values: logged,
            constant: false,
        });
    }

    let min = logged.iter().copied().fold(f64::INFINITY, f64::min);
    let max = logged.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range.abs() <= RANGE_EPSILON {
        return Ok(Scaled {
            values: vec![0.0; logged.len()],
            constant: true,
        });
    }

    let values = logged
        .iter()
        .map(|v| ((v - min) / range).clamp(0.0, 1.0))
        .collect();
    Ok(Scaled {
        values,
        constant: false,
    })
}
