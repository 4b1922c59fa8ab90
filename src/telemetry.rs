//! Mission telemetry: an injectable event sink and a JSON mission log.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

use crate::error::TelemetryError;
use crate::rover::{Rover, RoverStatus};
use crate::types::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    MissionStart,
    Command,
    MissionEnd,
}

/// A single timestamped telemetry record.
#[derive(Clone, Debug, Serialize)]
pub struct TelemetryEvent {
    pub timestamp: DateTime<Local>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub data: Value,
}

impl TelemetryEvent {
    pub fn new(event_type: EventType, data: Value) -> Self {
        Self {
            timestamp: Local::now(),
            event_type,
            data,
        }
    }
}

/// Destination for telemetry events produced by a session.
pub trait TelemetrySink {
    fn record(&mut self, event: TelemetryEvent);
}

/// Sink used when telemetry is disabled.
#[derive(Debug, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn record(&mut self, _event: TelemetryEvent) {}
}

/// Buffers events in memory and writes them out as one JSON document.
#[derive(Debug)]
pub struct MissionLog {
    mission_name: String,
    folder: PathBuf,
    start_time: DateTime<Local>,
    events: Vec<TelemetryEvent>,
}

#[derive(Serialize)]
struct MissionRecord<'a> {
    mission_name: &'a str,
    start_time: DateTime<Local>,
    end_time: DateTime<Local>,
    final_status: RoverStatus,
    path_history: &'a [Position],
    events: &'a [TelemetryEvent],
}

impl MissionLog {
    /// Start a log, creating the output folder up front so a bad path fails
    /// before any command runs.
    pub fn create(
        mission_name: impl Into<String>,
        folder: impl Into<PathBuf>,
    ) -> Result<Self, TelemetryError> {
        let folder = folder.into();
        ensure_folder(&folder)?;
        Ok(Self {
            mission_name: mission_name.into(),
            folder,
            start_time: Local::now(),
            events: Vec::new(),
        })
    }

    pub fn events(&self) -> &[TelemetryEvent] {
        &self.events
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Output file name, derived from the mission start time.
    pub fn file_name(&self) -> String {
        format!("mission_{}.json", self.start_time.format("%Y%m%d_%H%M%S"))
    }

    /// Serialize the log with the rover's final state; returns the file path.
    pub fn save(&self, rover: &Rover<'_>) -> Result<PathBuf, TelemetryError> {
        // The folder may have been removed while the session ran.
        ensure_folder(&self.folder)?;
        let record = MissionRecord {
            mission_name: &self.mission_name,
            start_time: self.start_time,
            end_time: Local::now(),
            final_status: rover.status(),
            path_history: rover.path(),
            events: &self.events,
        };
        let json = serde_json::to_string_pretty(&record)?;
        let path = self.folder.join(self.file_name());
        fs::write(&path, json).map_err(|source| TelemetryError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn ensure_folder(folder: &Path) -> Result<(), TelemetryError> {
    fs::create_dir_all(folder).map_err(|source| TelemetryError::CreateFolder {
        path: folder.to_path_buf(),
        source,
    })
}

impl TelemetrySink for MissionLog {
    fn record(&mut self, event: TelemetryEvent) {
        self.events.push(event);
    }
}
