//! Threshold Evaluator

use crate::error::EvaluationError;
use crate::result::{AnalysisResult, Violation};
use channel_config::{ChannelConfig, SetpointMode};
use signal_data::Series;
use tracing::debug;

/// Compares series against `reference ± tolerance`.
///
/// Bounds are inclusive: only samples strictly above the upper or strictly
/// below the lower bound are violations. Each violating sample is reported
/// on its own, adjacent violations are not merged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdEvaluator;

impl ThresholdEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Violations of `series`, in time order.
    ///
    /// Dynamic mode needs `setpoint` on exactly the grid of `series`;
    /// static mode ignores it.
    pub fn evaluate(
        &self,
        series: &Series,
        setpoint: Option<&Series>,
        config: &ChannelConfig,
    ) -> Result<Vec<Violation>, EvaluationError> {
        let tolerance = config.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(EvaluationError::InvalidTolerance {
                channel: config.name.clone(),
                tolerance,
            });
        }

        let violations = match &config.mode {
            SetpointMode::Static { setpoint: reference } => {
                debug!("Checking {} against static setpoint {} ± {}", config.name, reference, tolerance);
                series
                    .iter()
                    .filter_map(|(t, v)| check(t, v, *reference, tolerance))
                    .collect()
            }
            SetpointMode::Dynamic { channel, .. } => {
                let reference = setpoint.ok_or_else(|| EvaluationError::MissingSetpoint {
                    channel: config.name.clone(),
                    setpoint_channel: channel.clone(),
                })?;
                if reference.timestamps() != series.timestamps() {
                    return Err(EvaluationError::MisalignedSetpoint {
                        channel: config.name.clone(),
                        expected: series.len(),
                        actual: reference.len(),
                    });
                }

                debug!("Checking {} against setpoint channel {} ± {}", config.name, channel, tolerance);
                series
                    .iter()
                    .zip(reference.samples())
                    .filter_map(|((t, v), &s)| check(t, v, s, tolerance))
                    .collect()
            }
        };

        Ok(violations)
    }

    /// Evaluate and wrap the violations into an [`AnalysisResult`]
    pub fn analyze(
        &self,
        series: &Series,
        setpoint: Option<&Series>,
        config: &ChannelConfig,
    ) -> Result<AnalysisResult, EvaluationError> {
        let violations = self.evaluate(series, setpoint, config)?;
        Ok(AnalysisResult::new(&config.name, series, violations))
    }
}

fn check(timestamp: f64, value: f64, reference: f64, tolerance: f64) -> Option<Violation> {
    let upper = reference + tolerance;
    let lower = reference - tolerance;

    if value > upper || value < lower {
        Some(Violation {
            timestamp,
            value,
            deviation: (value - upper).max(lower - value),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(timestamps: &[f64], samples: &[f64]) -> Series {
        Series::new(timestamps.to_vec(), samples.to_vec()).unwrap()
    }

    #[test]
    fn test_static_violations() {
        let config = ChannelConfig::fixed("Pressure_System", 100.0, 10.0);
        let data = series(&[0.0, 1.0, 2.0, 3.0], &[95.0, 105.0, 120.0, 80.0]);

        let result = ThresholdEvaluator::new().analyze(&data, None, &config).unwrap();
        assert!(!result.passed);
        assert_eq!(
            result.violations,
            vec![
                Violation {
                    timestamp: 2.0,
                    value: 120.0,
                    deviation: 10.0
                },
                Violation {
                    timestamp: 3.0,
                    value: 80.0,
                    deviation: 10.0
                },
            ]
        );
        assert_eq!(result.max_deviation, 10.0);
    }

    #[test]
    fn test_dynamic_violations() {
        let config = ChannelConfig::tracking("Temperature_Engine", "Temp_Setpoint", 5.0);
        let data = series(&[0.0, 1.0, 2.0], &[88.0, 96.0, 85.0]);
        let setpoint = series(&[0.0, 1.0, 2.0], &[90.0, 90.0, 90.0]);

        let violations = ThresholdEvaluator::new()
            .evaluate(&data, Some(&setpoint), &config)
            .unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].timestamp, 1.0);
        assert_eq!(violations[0].value, 96.0);
        assert_eq!(violations[0].deviation, 1.0);
    }

    #[test]
    fn test_zero_tolerance_band() {
        let config = ChannelConfig::fixed("Gear", 3.0, 0.0);
        let data = series(&[0.0, 1.0], &[3.0, 4.0]);
        let violations = ThresholdEvaluator::new().evaluate(&data, None, &config).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].deviation, 1.0);
    }

    #[test]
    fn test_negative_tolerance_is_a_defect() {
        let config = ChannelConfig::fixed("Pressure_System", 100.0, -1.0);
        let data = series(&[0.0], &[100.0]);
        assert!(matches!(
            ThresholdEvaluator::new().evaluate(&data, None, &config),
            Err(EvaluationError::InvalidTolerance { .. })
        ));
    }

    #[test]
    fn test_dynamic_requires_aligned_setpoint() {
        let config = ChannelConfig::tracking("Temperature_Engine", "Temp_Setpoint", 5.0);
        let data = series(&[0.0, 1.0], &[90.0, 90.0]);
        let evaluator = ThresholdEvaluator::new();

        assert!(matches!(
            evaluator.evaluate(&data, None, &config),
            Err(EvaluationError::MissingSetpoint { .. })
        ));

        let shifted = series(&[0.0, 1.5], &[90.0, 90.0]);
        assert!(matches!(
            evaluator.evaluate(&data, Some(&shifted), &config),
            Err(EvaluationError::MisalignedSetpoint { .. })
        ));

        let short = series(&[0.0], &[90.0]);
        assert!(matches!(
            evaluator.evaluate(&data, Some(&short), &config),
            Err(EvaluationError::MisalignedSetpoint { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_static_mode_ignores_setpoint_series() {
        let config = ChannelConfig::fixed("Pressure_System", 100.0, 10.0);
        let data = series(&[0.0, 1.0], &[100.0, 100.0]);
        let unrelated = series(&[5.0], &[0.0]);
        let violations = ThresholdEvaluator::new()
            .evaluate(&data, Some(&unrelated), &config)
            .unwrap();
        assert!(violations.is_empty());
    }

    proptest! {
        #[test]
        fn samples_on_the_bounds_pass(
            setpoint in -1e3f64..1e3,
            tolerance in 0.0f64..1e2,
        ) {
            let config = ChannelConfig::fixed("X", setpoint, tolerance);
            let upper = setpoint + tolerance;
            let lower = setpoint - tolerance;
            let data = Series::new(vec![0.0, 1.0], vec![upper, lower]).unwrap();

            let result = ThresholdEvaluator::new().analyze(&data, None, &config).unwrap();
            prop_assert!(result.passed);
        }

        #[test]
        fn in_band_series_pass(
            setpoints in prop::collection::vec(-1e3f64..1e3, 1..50),
            tolerance in 0.01f64..1e2,
            offsets in prop::collection::vec(-0.99f64..0.99, 50),
        ) {
            let timestamps: Vec<f64> = (0..setpoints.len()).map(|i| i as f64).collect();
            let samples: Vec<f64> = setpoints
                .iter()
                .zip(&offsets)
                .map(|(s, o)| s + o * tolerance)
                .collect();
            let data = Series::new(timestamps.clone(), samples).unwrap();
            let reference = Series::new(timestamps, setpoints).unwrap();
            let config = ChannelConfig::tracking("X", "X_Setpoint", tolerance);

            let result = ThresholdEvaluator::new()
                .analyze(&data, Some(&reference), &config)
                .unwrap();
            prop_assert!(result.passed);
            prop_assert!(result.violations.is_empty());
        }

        #[test]
        fn deviations_are_positive(
            samples in prop::collection::vec(-1e3f64..1e3, 1..50),
            setpoint in -1e3f64..1e3,
            tolerance in 0.0f64..1e2,
        ) {
            let timestamps: Vec<f64> = (0..samples.len()).map(|i| i as f64).collect();
            let data = Series::new(timestamps, samples).unwrap();
            let config = ChannelConfig::fixed("X", setpoint, tolerance);

            let violations = ThresholdEvaluator::new().evaluate(&data, None, &config).unwrap();
            for pair in violations.windows(2) {
                prop_assert!(pair[0].timestamp < pair[1].timestamp);
            }
            for v in violations {
                prop_assert!(v.deviation > 0.0);
            }
        }
    }
}
