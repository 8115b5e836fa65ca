//! Recording Occurrences and Sources

use crate::error::{RecordingError, SeriesError};
use crate::series::Series;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, info};

/// One place a channel name is logged in a recording
#[derive(Debug, Clone)]
pub struct Occurrence {
    /// Data group of the occurrence
    pub group: usize,
    /// Channel index within the group
    pub index: usize,
    /// Source identity (acquisition source / ECU name)
    pub source: String,
    /// Samples logged at this occurrence
    pub series: Series,
}

impl Occurrence {
    pub fn new(group: usize, index: usize, source: impl Into<String>, series: Series) -> Self {
        Self {
            group,
            index,
            source: source.into(),
            series,
        }
    }
}

/// Decoded recording the analysis reads channel occurrences from
pub trait RecordingSource {
    /// Recording identity used in logs and reports
    fn name(&self) -> &str;

    /// Occurrences of `channel` in encounter order, empty when not logged.
    ///
    /// Fails when the provider decoded the channel into a malformed series.
    fn occurrences(&self, channel: &str) -> Result<&[Occurrence], SeriesError>;
}

#[derive(Debug, Deserialize)]
struct RecordingFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    occurrences: Vec<RawOccurrence>,
}

#[derive(Debug, Deserialize)]
struct RawOccurrence {
    channel: String,
    #[serde(default)]
    group: usize,
    #[serde(default)]
    index: usize,
    #[serde(default)]
    source: String,
    timestamps: Vec<f64>,
    samples: Vec<f64>,
}

/// Recording held fully in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecording {
    name: String,
    channels: HashMap<String, Vec<Occurrence>>,
    defects: HashMap<String, SeriesError>,
}

impl InMemoryRecording {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append an occurrence of `channel` (encounter order is insertion order)
    pub fn push(&mut self, channel: impl Into<String>, occurrence: Occurrence) {
        self.channels
            .entry(channel.into())
            .or_default()
            .push(occurrence);
    }

    /// Builder form of [`InMemoryRecording::push`]
    pub fn with(mut self, channel: impl Into<String>, occurrence: Occurrence) -> Self {
        self.push(channel, occurrence);
        self
    }

    /// Mark an occurrence of `channel` as decoded into a malformed series.
    ///
    /// The defect is reported only while `channel` has no valid occurrence.
    pub fn push_defect(&mut self, channel: impl Into<String>, defect: SeriesError) {
        self.defects.insert(channel.into(), defect);
    }

    /// Parse the JSON recording format; `fallback_name` is used when the file has none
    pub fn from_json(json: &str, fallback_name: &str) -> Result<Self, RecordingError> {
        let file: RecordingFile = serde_json::from_str(json)?;
        let mut recording = Self::new(file.name.unwrap_or_else(|| fallback_name.to_string()));

        for raw in file.occurrences {
            match Series::new(raw.timestamps, raw.samples) {
                Ok(series) => recording.push(
                    raw.channel,
                    Occurrence::new(raw.group, raw.index, raw.source, series),
                ),
                Err(err) => {
                    error!(
                        "Recording {}: channel {} ({}:{}) is malformed: {}",
                        recording.name, raw.channel, raw.group, raw.index, err
                    );
                    recording.push_defect(raw.channel, err);
                }
            }
        }

        debug!(
            "Recording {} holds {} channel names",
            recording.name,
            recording.channels.len()
        );
        Ok(recording)
    }

    /// Load a JSON recording file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordingError> {
        let path = path.as_ref();
        info!("Loading recording: {}", path.display());

        let json = std::fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_json(&json, &stem)
    }
}

impl RecordingSource for InMemoryRecording {
    fn name(&self) -> &str {
        &self.name
    }

    fn occurrences(&self, channel: &str) -> Result<&[Occurrence], SeriesError> {
        match (self.channels.get(channel), self.defects.get(channel)) {
            (Some(valid), _) if !valid.is_empty() => Ok(valid.as_slice()),
            (_, Some(defect)) => Err(defect.clone()),
            _ => Ok(&[][..]),
        }
    }
}
