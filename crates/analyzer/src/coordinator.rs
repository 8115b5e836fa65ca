//! Analysis Coordinator

use crate::analysis::{ChannelAnalysis, ProcessedChannel, RecordingAnalysis};
use crate::ChannelError;
use channel_config::{ChannelConfig, ConfigSet, SetpointMode};
use signal_data::{ChannelResolver, RecordingSource, Series};
use signal_processing::DataProcessor;
use threshold_validator::ThresholdEvaluator;
use tracing::{debug, error, info, warn};

/// Runs the channel pipeline over recordings.
///
/// Holds only the configuration set; every call to [`analyze`](Self::analyze)
/// starts from an empty result, so recordings never share state.
pub struct AnalysisCoordinator {
    configs: ConfigSet,
    resolver: ChannelResolver,
    processor: DataProcessor,
    evaluator: ThresholdEvaluator,
}

impl AnalysisCoordinator {
    /// Create a coordinator for a validated configuration set
    pub fn new(configs: ConfigSet) -> Self {
        info!("Creating analysis coordinator for {} channels", configs.len());
        Self {
            configs,
            resolver: ChannelResolver::new(),
            processor: DataProcessor::new(),
            evaluator: ThresholdEvaluator::new(),
        }
    }

    /// Configuration the results refer to (units, bounds)
    pub fn configs(&self) -> &ConfigSet {
        &self.configs
    }

    /// Analyze every configured channel of one recording
    pub fn analyze(&self, source: &dyn RecordingSource) -> RecordingAnalysis {
        info!("Starting analysis of {}", source.name());
        let mut analysis = RecordingAnalysis::new(source.name());

        for config in self.configs.iter() {
            match self.analyze_channel(source, config) {
                Ok(channel) => {
                    debug!(
                        "Channel {}: {} ({} violations)",
                        config.name,
                        if channel.result.passed { "passed" } else { "failed" },
                        channel.result.violation_count()
                    );
                    analysis.insert(&config.name, channel);
                }
                Err(err) => {
                    log_skip(source.name(), &config.name, &err);
                    analysis.skip(&config.name, err);
                }
            }
        }

        let summary = analysis.summary();
        info!(
            "Finished {}: {}/{} channels passed, {} skipped",
            source.name(),
            summary.passed,
            summary.total,
            summary.skipped
        );
        analysis
    }

    /// Analyze recordings one after another, each from a clean state
    pub fn analyze_all<'a>(
        &self,
        sources: impl IntoIterator<Item = &'a dyn RecordingSource>,
    ) -> Vec<RecordingAnalysis> {
        sources.into_iter().map(|source| self.analyze(source)).collect()
    }

    /// Resolve, process and evaluate one channel
    pub fn analyze_channel(
        &self,
        source: &dyn RecordingSource,
        config: &ChannelConfig,
    ) -> Result<ChannelAnalysis, ChannelError> {
        let raw = self.fetch(source, &config.name, config)?;
        let mut series = self.processor.process(raw, config);

        if let Some(flag) = &config.test_flag {
            let flag_series = self.fetch(source, &flag.channel, config)?;
            series = self.processor.gate(series, &flag_series, flag.value)?;
        }

        let setpoint = match &config.mode {
            SetpointMode::Dynamic { channel, scaling } => {
                let raw = self.fetch(source, channel, config)?;
                let scaled = self.processor.scale(raw, *scaling);
                Some(self.processor.align(&scaled, &series)?)
            }
            SetpointMode::Static { .. } => None,
        };

        let result = self.evaluator.analyze(&series, setpoint.as_ref(), config)?;
        Ok(ChannelAnalysis {
            result,
            processed: ProcessedChannel { series, setpoint },
        })
    }

    /// Resolved series of `channel`, discriminated like the analyzed channel
    fn fetch(
        &self,
        source: &dyn RecordingSource,
        channel: &str,
        config: &ChannelConfig,
    ) -> Result<Series, ChannelError> {
        let occurrences = source.occurrences(channel)?;
        let occurrence = self.resolver.resolve(channel, occurrences, config)?;
        Ok(occurrence.series.clone())
    }
}

fn log_skip(recording: &str, channel: &str, err: &ChannelError) {
    match err {
        ChannelError::Resolution(_) => {
            warn!("Skipping channel {} in {}: {}", channel, recording, err)
        }
        ChannelError::Shape(_) | ChannelError::Processing(_) => {
            error!("Failed to analyze channel {} in {}: {}", channel, recording, err)
        }
        ChannelError::Evaluation(_) => error!(
            "Contract breach evaluating channel {} in {}: {} (configuration validation was bypassed)",
            channel, recording, err
        ),
    }
}
