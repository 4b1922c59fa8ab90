//! YAML mission configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::grid::Grid;
use crate::heading::Heading;
use crate::types::Position;

/// Default config file looked up by the interactive session.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub grid: GridConfig,
    pub rover: RoverConfig,
    pub mission: MissionSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub obstacles: Vec<(i32, i32)>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            obstacles: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoverConfig {
    pub start_x: i32,
    pub start_y: i32,
    /// One of `N`, `E`, `S`, `W`.
    pub start_direction: String,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            start_x: 0,
            start_y: 0,
            start_direction: "N".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionSettings {
    pub name: String,
    pub enable_telemetry: bool,
    pub telemetry_folder: PathBuf,
}

impl Default for MissionSettings {
    fn default() -> Self {
        Self {
            name: "Mars Mission".to_string(),
            enable_telemetry: true,
            telemetry_folder: PathBuf::from("telemetry"),
        }
    }
}

impl MissionConfig {
    /// Parse a YAML document. Missing sections and fields take defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(yaml) => {
                let config = Self::from_yaml(&yaml)?;
                info!(path = %path.display(), "loaded mission config");
                Ok(config)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Validated grid for this mission.
    pub fn build_grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(
            self.grid.width,
            self.grid.height,
            self.grid.obstacles.iter().copied(),
        )
    }

    /// Validated start position and heading on `grid`.
    pub fn start(&self, grid: &Grid) -> Result<(Position, Heading), ConfigError> {
        let heading: Heading = self.rover.start_direction.parse()?;
        let position = Position::new(self.rover.start_x, self.rover.start_y);
        if !grid.contains(position.x, position.y) {
            return Err(ConfigError::StartOutOfBounds(position));
        }
        if grid.has_obstacle(position.x, position.y) {
            return Err(ConfigError::StartOnObstacle(position));
        }
        Ok((position, heading))
    }
}
