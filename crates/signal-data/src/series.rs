//! Timestamped Sample Series

use crate::error::SeriesError;
use serde::Serialize;

/// Equal-length timestamps (seconds, non-decreasing) and sample values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    timestamps: Vec<f64>,
    samples: Vec<f64>,
}

impl Series {
    /// Create a series, rejecting mismatched lengths and unordered timestamps
    pub fn new(timestamps: Vec<f64>, samples: Vec<f64>) -> Result<Self, SeriesError> {
        if timestamps.len() != samples.len() {
            return Err(SeriesError::ShapeMismatch {
                samples: samples.len(),
                timestamps: timestamps.len(),
            });
        }

        for (index, pair) in timestamps.windows(2).enumerate() {
            // NaN fails this comparison too
            if !(pair[0] <= pair[1]) {
                return Err(SeriesError::UnorderedTimestamps {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        if let Some(&first) = timestamps.first() {
            if first.is_nan() {
                return Err(SeriesError::UnorderedTimestamps {
                    index: 0,
                    previous: f64::NAN,
                    current: first,
                });
            }
        }

        Ok(Self {
            timestamps,
            samples,
        })
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// (timestamp, sample) pairs in time order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.samples.iter().copied())
    }

    /// First and last timestamp
    pub fn time_span(&self) -> Option<(f64, f64)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }

    /// Transform every sample, keeping the timestamps
    pub fn map_samples(mut self, f: impl Fn(f64) -> f64) -> Self {
        self.samples.iter_mut().for_each(|v| *v = f(*v));
        self
    }

    /// Keep the samples whose position and timestamp satisfy `keep`, in order
    pub fn retain(self, mut keep: impl FnMut(usize, f64) -> bool) -> Self {
        let (timestamps, samples) = self
            .timestamps
            .into_iter()
            .zip(self.samples)
            .enumerate()
            .filter(|(i, (t, _))| keep(*i, *t))
            .map(|(_, pair)| pair)
            .unzip();
        Self {
            timestamps,
            samples,
        }
    }

    /// Replace the samples with values taken on the same timestamps
    pub fn with_samples(&self, samples: Vec<f64>) -> Result<Self, SeriesError> {
        if samples.len() != self.timestamps.len() {
            return Err(SeriesError::ShapeMismatch {
                samples: samples.len(),
                timestamps: self.timestamps.len(),
            });
        }
        Ok(Self {
            timestamps: self.timestamps.clone(),
            samples,
        })
    }
}
