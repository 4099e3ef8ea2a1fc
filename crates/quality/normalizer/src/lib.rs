#![deny(unsafe_code)]
//! # quality-normalizer
//!
//! First stage of the grading pipeline. Each (station, indicator) series is
//! smoothed with an exponential moving average over time; each
//! (indicator, timestamp) cross-section is then log-transformed and
//! min-max scaled into `[0, 1]` across the reporting stations.

pub mod ema;
pub mod error;
pub mod normalizer;
pub mod scaling;
pub mod tensor;

pub use ema::{bias_correct, ema, ema_mean, ema_normalize, ema_std, EmaNormalization};
pub use error::{NormalizerError, ScalingError};
pub use normalizer::{NormalizedTable, Normalizer, NormalizerConfig};
pub use scaling::{log_minmax, Scaled};
pub use tensor::{DenseSlice, MetricTensor};
