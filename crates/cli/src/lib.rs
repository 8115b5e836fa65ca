//! Channel Check Runner
//!
//! Loads a channel configuration table and JSON recordings, analyzes each
//! recording and writes per-recording JSON reports.

use analyzer::{AnalysisCoordinator, RecordingAnalysis, RecordingReport};
use anyhow::{bail, Context};
use channel_config::ConfigSet;
use clap::Parser;
use signal_data::InMemoryRecording;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Validate recorded measurement channels against acceptance bounds
#[derive(Debug, Clone, Parser)]
#[command(name = "channel-check", version, about)]
pub struct Args {
    /// Channel configuration table (TOML, JSON or YAML)
    #[arg(short, long, env = "CHANNEL_CHECK_CONFIG")]
    pub config: PathBuf,

    /// Recordings to analyze (JSON)
    #[arg(required = true)]
    pub recordings: Vec<PathBuf>,

    /// Directory receiving one `<file stem>_report.json` per recording
    #[arg(short, long)]
    pub report_dir: Option<PathBuf>,

    /// Maximum log level
    #[arg(long, default_value = "info", env = "CHANNEL_CHECK_LOG")]
    pub log_level: Level,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Exit with status 2 when any channel fails or is skipped, or a recording
    /// cannot be processed
    #[arg(long)]
    pub fail_on_violation: bool,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Recordings analyzed
    pub analyzed: usize,
    /// Recordings that could not be loaded or reported
    pub failed: usize,
    /// Every evaluated channel of every recording passed
    pub all_passed: bool,
    /// Configured channels that could not be evaluated, over all recordings
    pub skipped: usize,
}

impl RunOutcome {
    /// Every recording was processed and every configured channel evaluated and passed
    pub fn clean(&self) -> bool {
        self.all_passed && self.skipped == 0 && self.failed == 0
    }
}

/// Initialize logging
pub fn init_logging(level: Level, json: bool) -> anyhow::Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.context("Failed to set tracing subscriber")
}

/// Analyze every recording named in `args`
pub fn run(args: &Args) -> anyhow::Result<RunOutcome> {
    let configs = ConfigSet::load(&args.config)
        .with_context(|| format!("Failed to load configuration {}", args.config.display()))?;
    if configs.is_empty() {
        bail!(
            "No valid channel configuration in {} ({} rejected)",
            args.config.display(),
            configs.rejected().len()
        );
    }

    let coordinator = AnalysisCoordinator::new(configs);
    let mut outcome = RunOutcome {
        all_passed: true,
        ..Default::default()
    };

    for path in &args.recordings {
        info!("Processing {}", path.display());
        let recording = match InMemoryRecording::load(path) {
            Ok(recording) => recording,
            Err(err) => {
                error!("Failed to process {}: {}", path.display(), err);
                outcome.failed += 1;
                continue;
            }
        };

        let analysis = coordinator.analyze(&recording);
        print_summary(&analysis);
        outcome.analyzed += 1;
        outcome.all_passed &= analysis.all_passed();
        outcome.skipped += analysis.skipped.len();

        if let Some(dir) = &args.report_dir {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| analysis.recording.clone());
            if let Err(err) = write_report(dir, &stem, &analysis, coordinator.configs()) {
                error!("Failed to write report for {}: {:#}", analysis.recording, err);
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}

fn print_summary(analysis: &RecordingAnalysis) {
    let summary = analysis.summary();
    println!("\nResults for {}:", analysis.recording);
    println!("Passed: {}/{} channels", summary.passed, summary.total);
    if summary.skipped > 0 {
        println!("Skipped: {} channels (see log)", summary.skipped);
    }
}

/// Write `<stem>_report.json` into `dir`, returning the file path.
///
/// `stem` is reduced to a single file name component, so the report always
/// lands directly inside `dir`.
pub fn write_report(
    dir: &Path,
    stem: &str,
    analysis: &RecordingAnalysis,
    configs: &ConfigSet,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

    let path = dir.join(report_file_name(stem));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let report = RecordingReport::new(analysis, configs);
    serde_json::to_writer_pretty(BufWriter::new(file), &report)?;

    info!("Report written to {}", path.display());
    Ok(path)
}

fn report_file_name(stem: &str) -> String {
    let safe: String = stem
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '_',
        })
        .collect();
    let safe = safe.trim_start_matches('.');
    if safe.is_empty() {
        "recording_report.json".to_string()
    } else {
        format!("{}_report.json", safe)
    }
}
