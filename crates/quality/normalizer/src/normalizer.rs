use crate::ema::ema_normalize;
use crate::error::{NormalizerError, ScalingError};
use crate::scaling::log_minmax;
use crate::tensor::MetricTensor;
use quality_types::{Degeneracy, Indicator, MetricSample, NormalizedSample};
use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};

/// Normalizer parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// EMA smoothing factor, in `[0, 1)`.
    pub beta: f64,
    /// Divide out the EMA cold-start bias.
    pub bias_correction: bool,
    /// Added to each smoothed value before taking the log.
    pub log_offset: f64,
    /// Logarithm base for the cross-sectional scaling.
    pub log_base: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            beta: 0.9,
            bias_correction: true,
            log_offset: 1.0,
            log_base: 10.0,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<(), NormalizerError> {
        if !(self.beta >= 0.0 && self.beta < 1.0) {
            return Err(NormalizerError::InvalidBeta(self.beta));
        }
        if !(self.log_base.is_finite() && self.log_base > 0.0 && self.log_base != 1.0) {
            return Err(NormalizerError::InvalidLogBase(self.log_base));
        }
        if !self.log_offset.is_finite() {
            return Err(NormalizerError::InvalidLogOffset(self.log_offset));
        }
        Ok(())
    }
}

/// Normalizer output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    /// Ordered by timestamp, station, indicator.
    pub samples: Vec<NormalizedSample>,
    pub degeneracies: Vec<Degeneracy>,
}

/// Smooths each (station, indicator) series with an EMA, then log-minmax
/// scales each (indicator, timestamp) cross-section into `[0, 1]`.
#[derive(Clone, Debug)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Result<Self, NormalizerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn normalize(&self, samples: &[MetricSample]) -> Result<NormalizedTable, NormalizerError> {
        if samples.is_empty() {
            warn!("normalizer received no samples");
            return Ok(NormalizedTable::default());
        }

        let raw = MetricTensor::from_samples(samples)?;
        let absent = raw.absent_indicators();
        if !absent.is_empty() {
            return Err(NormalizerError::MissingIndicators(absent));
        }

        let smoothed = self.smooth(&raw);
        let (scaled, degeneracies) = self.scale(&smoothed)?;

        let samples = scaled.to_normalized_samples();
        info!(
            stations = raw.stations().len(),
            timestamps = raw.timestamps().len(),
            samples = samples.len(),
            degenerate = degeneracies.len(),
            "normalized indicator table"
        );
        Ok(NormalizedTable {
            samples,
            degeneracies,
        })
    }

    /// Replace each observed series with its EMA mean. The z-score and EMA
    /// standard deviation are computed alongside but only the mean is kept.
    fn smooth(&self, raw: &MetricTensor) -> MetricTensor {
        let mut out = MetricTensor::empty(raw.stations().to_vec(), raw.timestamps().to_vec());
        for (s, station) in raw.stations().iter().enumerate() {
            for indicator in Indicator::ALL {
                let series = raw.series(s, indicator);
                if series.values.is_empty() {
                    continue;
                }
                let norm =
                    ema_normalize(&series.values, self.config.beta, self.config.bias_correction);
                trace!(
                    %station,
                    %indicator,
                    z = ?norm.z,
                    std_dev = ?norm.std_dev,
                    "ema normalization"
                );
                for (&t, &mean) in series.positions.iter().zip(&norm.mean) {
                    out.set(s, indicator, t, Some(mean));
                }
            }
        }
        out
    }

    fn scale(
        &self,
        smoothed: &MetricTensor,
    ) -> Result<(MetricTensor, Vec<Degeneracy>), NormalizerError> {
        let mut out =
            MetricTensor::empty(smoothed.stations().to_vec(), smoothed.timestamps().to_vec());
        let mut degeneracies = Vec::new();

        for indicator in Indicator::ALL {
            for (t, &timestamp) in smoothed.timestamps().iter().enumerate() {
                let section = smoothed.cross_section(indicator, t);
                if section.values.is_empty() {
                    continue;
                }
                let scaled =
                    log_minmax(&section.values, self.config.log_offset, self.config.log_base)
                        .map_err(|e| match e {
                            ScalingError::LogDomain {
                                index,
                                value,
                                offset,
                            } => NormalizerError::LogDomain {
                                station: smoothed.stations()[section.positions[index]].clone(),
                                indicator,
                                timestamp,
                                value,
                                offset,
                            },
                            ScalingError::InvalidBase(base) => NormalizerError::InvalidLogBase(base),
                        })?;

                if scaled.constant && section.values.len() > 1 {
                    warn!(%indicator, %timestamp, "constant cross-section scaled to zero");
                    degeneracies.push(Degeneracy::ConstantCrossSection {
                        indicator,
                        timestamp,
                    });
                }
                for (&s, &value) in section.positions.iter().zip(&scaled.values) {
                    out.set(s, indicator, t, Some(value));
                }
            }
        }
        Ok((out, degeneracies))
    }
}
