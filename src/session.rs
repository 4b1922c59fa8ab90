//! Interactive, scripted, and demo mission runners.
//!
//! The session owns every side effect around the rover: reading command
//! tokens, drawing the grid after each transition, feeding the telemetry
//! sink, and printing the final summary. Input and output are generic so the
//! whole loop runs headless in tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::command::{Command, Input, Outcome};
use crate::config::MissionConfig;
use crate::error::{ConfigError, TelemetryError};
use crate::grid::Grid;
use crate::heading::Heading;
use crate::render::render_grid;
use crate::rover::{Rover, RoverStatus};
use crate::telemetry::{EventType, MissionLog, NullSink, TelemetryEvent, TelemetrySink};
use crate::types::Position;

const DEMO_OBSTACLES: [(i32, i32); 3] = [(2, 2), (3, 5), (7, 8)];
const DEMO_SCRIPT: [Command; 7] = [
    Command::MoveForward,
    Command::MoveForward,
    Command::TurnRight,
    Command::MoveForward,
    Command::MoveForward,
    Command::TurnLeft,
    Command::MoveForward,
];

/// A validated mission: the grid plus the rover's starting pose.
#[derive(Debug)]
pub struct Mission {
    config: MissionConfig,
    grid: Grid,
    start: Position,
    heading: Heading,
}

/// Final state reported when a session ends.
#[derive(Clone, Debug)]
pub struct MissionSummary {
    pub status: RoverStatus,
    pub report: String,
    pub telemetry: Option<PathBuf>,
}

impl MissionSummary {
    /// Print the `key=value` summary block.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let status = &self.status;
        writeln!(out, "MISSION SUMMARY")?;
        writeln!(out, "final_position={}", status.position)?;
        writeln!(out, "final_heading={}", status.direction)?;
        writeln!(out, "commands_executed={}", status.commands_executed)?;
        writeln!(out, "moves={}", status.moves)?;
        writeln!(out, "turns={}", status.turns)?;
        writeln!(out, "blocked={}", status.blocked)?;
        writeln!(out, "cells_visited={}", status.cells_visited)?;
        writeln!(out, "status={}", self.report)?;
        if let Some(path) = &self.telemetry {
            writeln!(out, "telemetry={}", path.display())?;
        }
        Ok(())
    }
}

impl Mission {
    /// Validate the config into a grid and start pose.
    pub fn from_config(config: MissionConfig) -> Result<Self, ConfigError> {
        let grid = config.build_grid()?;
        let (start, heading) = config.start(&grid)?;
        Ok(Self {
            config,
            grid,
            start,
            heading,
        })
    }

    /// Built-in demo mission on a 10x10 grid with three obstacles.
    pub fn demo() -> Result<Self, ConfigError> {
        let mut config = MissionConfig::default();
        config.grid.obstacles = DEMO_OBSTACLES.to_vec();
        config.mission.name = "Automated Demo".to_string();
        config.mission.enable_telemetry = false;
        Self::from_config(config)
    }

    /// Fresh rover at the mission start.
    pub fn rover(&self) -> Rover<'_> {
        Rover::new(self.start, self.heading, &self.grid)
    }

    /// Open the mission log, if enabled. Runs before the rover exists so an
    /// unusable telemetry folder aborts the mission up front.
    fn telemetry_log(&self) -> Result<Option<MissionLog>, TelemetryError> {
        let settings = &self.config.mission;
        if !settings.enable_telemetry {
            return Ok(None);
        }
        MissionLog::create(settings.name.clone(), settings.telemetry_folder.clone()).map(Some)
    }

    fn open_log(&self) -> Result<Option<MissionLog>> {
        self.telemetry_log().with_context(|| {
            format!(
                "opening telemetry folder {}",
                self.config.mission.telemetry_folder.display()
            )
        })
    }

    /// Drive the rover from line-oriented input until `Q` or end of input.
    /// With `prompt` set, the command menu is printed before each read.
    pub fn run_interactive<R: BufRead, W: Write>(
        &self,
        mut input: R,
        out: &mut W,
        prompt: bool,
    ) -> Result<MissionSummary> {
        let mut log = self.open_log()?;
        let mut rover = self.rover();
        let mut null = NullSink;
        let sink: &mut dyn TelemetrySink = match log.as_mut() {
            Some(log) => log,
            None => &mut null,
        };

        self.begin(&rover, sink, out)?;
        let mut line = String::new();
        loop {
            if prompt {
                write_menu(out)?;
            }
            line.clear();
            let read = input.read_line(&mut line).context("failed to read command")?;
            if read == 0 {
                info!("input closed, ending mission");
                break;
            }
            match Input::parse(&line) {
                Ok(Input::Quit) => break,
                Ok(Input::Command(command)) => {
                    step(&mut rover, command, sink, out)?;
                }
                Err(err) => {
                    error!("{err}");
                    writeln!(out, "Invalid command. Please try again.")?;
                }
            }
        }
        end(&rover, sink)?;
        self.finish(&rover, log.as_ref(), out)
    }

    /// Apply a pre-parsed command sequence.
    pub fn run_script<W: Write>(
        &self,
        commands: &[Command],
        out: &mut W,
    ) -> Result<MissionSummary> {
        let mut log = self.open_log()?;
        let mut rover = self.rover();
        let mut null = NullSink;
        let sink: &mut dyn TelemetrySink = match log.as_mut() {
            Some(log) => log,
            None => &mut null,
        };

        self.begin(&rover, sink, out)?;
        for &command in commands {
            writeln!(out, "Executing: {}", command.label())?;
            step(&mut rover, command, sink, out)?;
        }
        end(&rover, sink)?;
        self.finish(&rover, log.as_ref(), out)
    }

    fn begin<W: Write>(
        &self,
        rover: &Rover<'_>,
        sink: &mut dyn TelemetrySink,
        out: &mut W,
    ) -> Result<()> {
        info!(
            mission = %self.config.mission.name,
            "Rover initialized at {} facing {}",
            rover.position(),
            rover.heading()
        );
        debug!(
            width = self.grid.width(),
            height = self.grid.height(),
            obstacle_count = self.grid.obstacle_count(),
            obstacles = ?self.grid.obstacles().collect::<Vec<_>>(),
            "grid loaded"
        );
        sink.record(TelemetryEvent::new(
            EventType::MissionStart,
            serde_json::to_value(rover.status())?,
        ));
        writeln!(out, "Mission: {}", self.config.mission.name)?;
        write!(out, "{}", render_grid(rover))?;
        Ok(())
    }

    fn finish<W: Write>(
        &self,
        rover: &Rover<'_>,
        log: Option<&MissionLog>,
        out: &mut W,
    ) -> Result<MissionSummary> {
        let mut summary = MissionSummary {
            status: rover.status(),
            report: rover.report(),
            telemetry: None,
        };
        let Some(log) = log else {
            summary.write_to(out)?;
            return Ok(summary);
        };
        // The summary is printed even when the save fails.
        match log.save(rover) {
            Ok(path) => {
                info!(path = %path.display(), events = log.events().len(), "telemetry saved");
                summary.telemetry = Some(path);
                summary.write_to(out)?;
                Ok(summary)
            }
            Err(err) => {
                summary.write_to(out)?;
                Err(err)
                    .with_context(|| format!("saving telemetry to {}", log.folder().display()))
            }
        }
    }
}

fn end(rover: &Rover<'_>, sink: &mut dyn TelemetrySink) -> Result<()> {
    sink.record(TelemetryEvent::new(
        EventType::MissionEnd,
        serde_json::to_value(rover.status())?,
    ));
    Ok(())
}

/// Apply one command, then log, record, and redraw.
fn step<W: Write>(
    rover: &mut Rover<'_>,
    command: Command,
    sink: &mut dyn TelemetrySink,
    out: &mut W,
) -> Result<Outcome> {
    let outcome = command.apply(rover);
    if let Some(warning) = outcome.warning() {
        warn!(command = %command.token(), ?outcome, "move rejected");
        writeln!(out, "{warning}")?;
    }
    info!(success = outcome.is_success(), "Executed command: {}", command.token());
    sink.record(TelemetryEvent::new(
        EventType::Command,
        json!({
            "command": command.token().to_string(),
            "outcome": outcome,
            "result": outcome.kind(),
            "status": rover.status(),
        }),
    ));
    write!(out, "{}", render_grid(rover))?;
    Ok(outcome)
}

/// Run the built-in demo script.
pub fn run_demo<W: Write>(out: &mut W) -> Result<MissionSummary> {
    writeln!(out, "=== AUTOMATED DEMO ===")?;
    let mission = Mission::demo()?;
    mission.run_script(&DEMO_SCRIPT, out)
}

fn write_menu<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Available Commands:")?;
    writeln!(out, "  M - Move Forward")?;
    writeln!(out, "  L - Turn Left")?;
    writeln!(out, "  R - Turn Right")?;
    writeln!(out, "  Q - Quit and show final status")?;
    write!(out, "Enter command: ")?;
    out.flush()
}
