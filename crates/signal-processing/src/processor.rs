//! Series Processor

use crate::error::ProcessingError;
use channel_config::ChannelConfig;
use signal_data::Series;
use tracing::debug;

/// Stateless processor applying the per-channel preparation steps
#[derive(Debug, Clone, Copy, Default)]
pub struct DataProcessor;

impl DataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Scale, then restrict to the configured time window.
    ///
    /// Windowing compares timestamps only, so it selects the same samples
    /// whatever the scaling factor.
    pub fn process(&self, series: Series, config: &ChannelConfig) -> Series {
        let raw_len = series.len();

        let series = self.scale(series, config.scaling);
        let series = if config.has_window() {
            self.window(series, config.start_time, config.end_time)
        } else {
            series
        };

        debug!(
            "Processed {}: {} -> {} samples (scaling {})",
            config.name,
            raw_len,
            series.len(),
            config.scaling
        );
        series
    }

    /// Multiply every sample by `factor`; identity for exactly 1.0
    pub fn scale(&self, series: Series, factor: f64) -> Series {
        if factor == 1.0 {
            return series;
        }
        series.map_samples(|v| v * factor)
    }

    /// Keep samples with `start <= t <= end` (each bound only when set)
    pub fn window(&self, series: Series, start: Option<f64>, end: Option<f64>) -> Series {
        series.retain(|_, t| start.map_or(true, |s| t >= s) && end.map_or(true, |e| t <= e))
    }

    /// Keep samples at which the flag channel holds `value`.
    ///
    /// The flag is read with zero-order hold: its latest sample at or before
    /// each timestamp, or its first sample before the flag starts.
    pub fn gate(&self, series: Series, flag: &Series, value: i64) -> Result<Series, ProcessingError> {
        if flag.is_empty() {
            return Err(ProcessingError::EmptySeries("test flag"));
        }

        let held: Vec<f64> = series
            .timestamps()
            .iter()
            .map(|&t| hold(flag, t))
            .collect();
        let target = value as f64;

        Ok(series.retain(|i, _| held[i] == target))
    }

    /// Piecewise-linear resampling of `series` onto `target` timestamps.
    ///
    /// Outside the source range the first/last sample is held. On a repeated
    /// source timestamp the last sample logged at that time wins, so the
    /// series maps onto its own grid unchanged only where timestamps are
    /// strictly increasing.
    pub fn interpolate(&self, series: &Series, target: &[f64]) -> Result<Vec<f64>, ProcessingError> {
        if target.is_empty() {
            return Ok(Vec::new());
        }
        if series.is_empty() {
            return Err(ProcessingError::EmptySeries("source"));
        }

        let xs = series.timestamps();
        let ys = series.samples();
        let last = xs.len() - 1;

        Ok(target
            .iter()
            .map(|&t| {
                // first index with xs[idx] > t
                let idx = xs.partition_point(|&x| x <= t);
                if idx == 0 {
                    ys[0]
                } else if idx > last {
                    ys[last]
                } else {
                    let (x0, x1) = (xs[idx - 1], xs[idx]);
                    let (y0, y1) = (ys[idx - 1], ys[idx]);
                    if t == x0 {
                        y0
                    } else {
                        y0 + (t - x0) * (y1 - y0) / (x1 - x0)
                    }
                }
            })
            .collect())
    }

    /// Resample `setpoint` onto the timestamp grid of `onto`
    pub fn align(&self, setpoint: &Series, onto: &Series) -> Result<Series, ProcessingError> {
        let samples = self.interpolate(setpoint, onto.timestamps())?;
        Ok(onto.with_samples(samples)?)
    }
}

fn hold(flag: &Series, t: f64) -> f64 {
    let idx = flag.timestamps().partition_point(|&x| x <= t);
    flag.samples()[idx.saturating_sub(1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(timestamps: &[f64], samples: &[f64]) -> Series {
        Series::new(timestamps.to_vec(), samples.to_vec()).unwrap()
    }

    #[test]
    fn test_scaling() {
        let processor = DataProcessor::new();
        let scaled = processor.scale(series(&[0.0, 1.0], &[2.0, -3.0]), 0.5);
        assert_eq!(scaled.samples(), &[1.0, -1.5]);
        assert_eq!(scaled.timestamps(), &[0.0, 1.0]);
    }

    #[test]
    fn test_window_is_inclusive() {
        let processor = DataProcessor::new();
        let data = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 10.0, 20.0, 30.0, 40.0]);

        let both = processor.window(data.clone(), Some(1.0), Some(3.0));
        assert_eq!(both.timestamps(), &[1.0, 2.0, 3.0]);
        assert_eq!(both.samples(), &[10.0, 20.0, 30.0]);

        let from = processor.window(data.clone(), Some(3.0), None);
        assert_eq!(from.timestamps(), &[3.0, 4.0]);

        let until = processor.window(data, None, Some(0.0));
        assert_eq!(until.timestamps(), &[0.0]);
    }

    #[test]
    fn test_process_scales_then_windows() {
        let config = ChannelConfig::fixed("Pressure_System", 100.0, 10.0)
            .scaled(2.0)
            .windowed(Some(1.0), Some(2.0));
        let processed =
            DataProcessor::new().process(series(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0]), &config);
        assert_eq!(processed.timestamps(), &[1.0, 2.0]);
        assert_eq!(processed.samples(), &[4.0, 6.0]);
    }

    #[test]
    fn test_interpolation_clamps_and_blends() {
        let processor = DataProcessor::new();
        let data = series(&[1.0, 2.0, 4.0], &[10.0, 20.0, 0.0]);
        let values = processor
            .interpolate(&data, &[0.0, 1.5, 3.0, 4.0, 9.0])
            .unwrap();
        assert_eq!(values, vec![10.0, 15.0, 10.0, 0.0, 0.0]);
    }

    #[test]
    fn test_interpolation_on_repeated_timestamps() {
        let processor = DataProcessor::new();
        let data = series(&[0.0, 1.0, 1.0, 2.0], &[0.0, 10.0, 30.0, 40.0]);
        let values = processor
            .interpolate(&data, &[0.5, 1.0, 1.5])
            .unwrap();
        // left of the step blends toward the first duplicate, right of it from the last
        assert_eq!(values, vec![5.0, 30.0, 35.0]);
    }

    #[test]
    fn test_interpolation_of_empty_source() {
        let processor = DataProcessor::new();
        let empty = series(&[], &[]);
        assert_eq!(
            processor.interpolate(&empty, &[1.0]),
            Err(ProcessingError::EmptySeries("source"))
        );
        assert_eq!(processor.interpolate(&empty, &[]), Ok(vec![]));
    }

    #[test]
    fn test_align_setpoint_grid() {
        let processor = DataProcessor::new();
        let setpoint = series(&[0.0, 10.0], &[90.0, 100.0]);
        let channel = series(&[2.0, 5.0], &[91.0, 96.0]);
        let aligned = processor.align(&setpoint, &channel).unwrap();
        assert_eq!(aligned.timestamps(), channel.timestamps());
        assert_eq!(aligned.samples(), &[92.0, 95.0]);
    }

    #[test]
    fn test_gate_holds_flag_value() {
        let processor = DataProcessor::new();
        let data = series(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let flag = series(&[0.5, 2.0, 3.5], &[1.0, 0.0, 1.0]);

        // t=0 reads the first flag sample, t=1 holds the sample from 0.5
        let gated = processor.gate(data, &flag, 1).unwrap();
        assert_eq!(gated.timestamps(), &[0.0, 1.0, 4.0]);
        assert_eq!(gated.samples(), &[1.0, 2.0, 5.0]);

        let empty = series(&[], &[]);
        assert!(processor.gate(gated, &empty, 1).is_err());
    }

    fn ascending_series() -> impl Strategy<Value = Series> {
        prop::collection::vec((0.01f64..5.0, -1e3f64..1e3), 1..40).prop_map(|steps| {
            let mut t = 0.0;
            let (timestamps, samples) = steps
                .into_iter()
                .map(|(dt, v)| {
                    t += dt;
                    (t, v)
                })
                .unzip();
            Series::new(timestamps, samples).unwrap()
        })
    }

    proptest! {
        #[test]
        fn interpolation_on_own_grid_is_identity(data in ascending_series()) {
            let values = DataProcessor::new().interpolate(&data, data.timestamps()).unwrap();
            prop_assert_eq!(values.as_slice(), data.samples());
        }

        #[test]
        fn interpolation_stays_within_sample_range(
            data in ascending_series(),
            fractions in prop::collection::vec(0.0f64..=1.0, 1..20),
        ) {
            let (first, last) = data.time_span().unwrap();
            let target: Vec<f64> = fractions.iter().map(|f| first + f * (last - first)).collect();
            let values = DataProcessor::new().interpolate(&data, &target).unwrap();

            let min = data.samples().iter().cloned().fold(f64::MAX, f64::min);
            let max = data.samples().iter().cloned().fold(f64::MIN, f64::max);
            for v in values {
                prop_assert!(v >= min - 1e-9 && v <= max + 1e-9);
            }
        }

        #[test]
        fn window_selection_ignores_scaling(
            data in ascending_series(),
            factor in 0.1f64..10.0,
            a in 0.0f64..50.0,
            width in 0.0f64..50.0,
        ) {
            let processor = DataProcessor::new();
            let base = ChannelConfig::fixed("X", 0.0, 1.0).windowed(Some(a), Some(a + width));
            let scaled_config = base.clone().scaled(factor);

            let plain = processor.process(data.clone(), &base);
            let scaled = processor.process(data, &scaled_config);

            prop_assert_eq!(plain.timestamps(), scaled.timestamps());
            for (p, s) in plain.samples().iter().zip(scaled.samples()) {
                prop_assert_eq!(*s, p * factor);
            }
        }
    }
}
