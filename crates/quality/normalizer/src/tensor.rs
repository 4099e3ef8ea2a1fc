//! Sparse-to-dense conversion of long-format samples.
//!
//! The tensor is indexed `(station, indicator, time)`. A cell is `None`
//! when the station did not report that indicator on that day; `None` is
//! the only missing-value sentinel and never reaches the EMA or scaling
//! math, which operate on the dense slices returned by [`MetricTensor::series`]
//! and [`MetricTensor::cross_section`].

use crate::error::NormalizerError;
use quality_types::{Indicator, MetricSample, NormalizedSample, StationId, Timestamp};
use std::collections::{BTreeSet, HashMap};

/// Dense slice gathered from a tensor axis: positions along the axis that
/// held a value, and those values in the same order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DenseSlice {
    pub positions: Vec<usize>,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetricTensor {
    stations: Vec<StationId>,
    timestamps: Vec<Timestamp>,
    cells: Vec<Option<f64>>,
}

impl MetricTensor {
    /// An all-missing tensor over the given axes.
    pub fn empty(stations: Vec<StationId>, timestamps: Vec<Timestamp>) -> Self {
        let len = stations.len() * Indicator::COUNT * timestamps.len();
        Self {
            stations,
            timestamps,
            cells: vec![None; len],
        }
    }

    /// Build from long-format samples. Stations and timestamps are sorted
    /// ascending; combinations absent from the input stay missing.
    pub fn from_samples(samples: &[MetricSample]) -> Result<Self, NormalizerError> {
        let stations: Vec<StationId> = samples
            .iter()
            .map(|s| s.station.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let timestamps: Vec<Timestamp> = samples
            .iter()
            .map(|s| s.timestamp)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let station_pos: HashMap<&StationId, usize> =
            stations.iter().enumerate().map(|(i, s)| (s, i)).collect();
        let time_pos: HashMap<Timestamp, usize> =
            timestamps.iter().enumerate().map(|(i, t)| (*t, i)).collect();

        let mut tensor = Self::empty(stations.clone(), timestamps.clone());
        for sample in samples {
            if !sample.value.is_finite() {
                return Err(NormalizerError::NonFiniteValue {
                    station: sample.station.clone(),
                    indicator: sample.indicator,
                    timestamp: sample.timestamp,
                    value: sample.value,
                });
            }
            let s = station_pos[&sample.station];
            let t = time_pos[&sample.timestamp];
            let idx = tensor.offset(s, sample.indicator, t);
            if tensor.cells[idx].is_some() {
                return Err(NormalizerError::DuplicateSample {
                    station: sample.station.clone(),
                    indicator: sample.indicator,
                    timestamp: sample.timestamp,
                });
            }
            tensor.cells[idx] = Some(sample.value);
        }
        Ok(tensor)
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn offset(&self, station: usize, indicator: Indicator, time: usize) -> usize {
        (station * Indicator::COUNT + indicator.index()) * self.timestamps.len() + time
    }

    pub fn get(&self, station: usize, indicator: Indicator, time: usize) -> Option<f64> {
        self.cells[self.offset(station, indicator, time)]
    }

    pub fn set(&mut self, station: usize, indicator: Indicator, time: usize, value: Option<f64>) {
        let idx = self.offset(station, indicator, time);
        self.cells[idx] = value;
    }

    /// Indicators with no observation anywhere in the tensor.
    pub fn absent_indicators(&self) -> Vec<Indicator> {
        Indicator::ALL
            .into_iter()
            .filter(|&i| {
                (0..self.stations.len())
                    .all(|s| (0..self.timestamps.len()).all(|t| self.get(s, i, t).is_none()))
            })
            .collect()
    }

    /// Observed values of one (station, indicator) series along the time axis.
    pub fn series(&self, station: usize, indicator: Indicator) -> DenseSlice {
        let mut slice = DenseSlice::default();
        for t in 0..self.timestamps.len() {
            if let Some(v) = self.get(station, indicator, t) {
                slice.positions.push(t);
                slice.values.push(v);
            }
        }
        slice
    }

    /// Observed values of one indicator across stations at one time.
    pub fn cross_section(&self, indicator: Indicator, time: usize) -> DenseSlice {
        let mut slice = DenseSlice::default();
        for s in 0..self.stations.len() {
            if let Some(v) = self.get(s, indicator, time) {
                slice.positions.push(s);
                slice.values.push(v);
            }
        }
        slice
    }

    /// Long-format output ordered by timestamp, station, indicator.
    /// Missing cells are omitted.
    pub fn to_normalized_samples(&self) -> Vec<NormalizedSample> {
        let mut out = Vec::new();
        for (t, timestamp) in self.timestamps.iter().enumerate() {
            for (s, station) in self.stations.iter().enumerate() {
                for indicator in Indicator::ALL {
                    if let Some(value) = self.get(s, indicator, t) {
                        out.push(NormalizedSample {
                            station: station.clone(),
                            indicator,
                            timestamp: *timestamp,
                            value,
                        });
                    }
                }
            }
        }
        out
    }
}
