//! Error types for configuration, command input, and telemetry.
//!
//! Blocked moves are not errors; they are reported through
//! [`crate::command::Outcome`]. Only construction-time misconfiguration and
//! driver I/O failures live here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Position;

/// Invalid mission setup, surfaced before any rover is created.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    NonPositiveDimensions { width: i32, height: i32 },

    #[error("obstacle {obstacle} lies outside the {width}x{height} grid")]
    ObstacleOutOfBounds {
        obstacle: Position,
        width: i32,
        height: i32,
    },

    #[error("invalid start direction {0:?}, expected one of N, E, S, W")]
    InvalidDirection(String),

    #[error("start position {0} lies outside the grid")]
    StartOutOfBounds(Position),

    #[error("start position {0} is occupied by an obstacle")]
    StartOnObstacle(Position),

    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_yaml::Error),
}

/// A command token the dispatcher cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty command")]
    Empty,

    #[error("invalid command entered: {0:?}")]
    UnknownCommand(String),
}

/// Failure while persisting a mission log.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to create telemetry folder {}", path.display())]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write telemetry file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize telemetry")]
    Serialize(#[from] serde_json::Error),
}
