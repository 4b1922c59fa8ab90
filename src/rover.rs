//! Rover state machine: validated moves and turns over a shared grid.

use std::collections::HashSet;

use serde::Serialize;

use crate::command::Outcome;
use crate::grid::Grid;
use crate::heading::Heading;
use crate::types::Position;

/// Mobile state of the rover. Borrows the grid it drives on.
#[derive(Clone, Debug)]
pub struct Rover<'g> {
    position: Position,
    heading: Heading,
    grid: &'g Grid,
    path: Vec<Position>,
    moves: usize,
    turns: usize,
    blocked: usize,
}

/// Point-in-time snapshot for reports, rendering, and telemetry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoverStatus {
    pub position: Position,
    pub direction: Heading,
    pub moves: usize,
    pub turns: usize,
    pub blocked: usize,
    pub commands_executed: usize,
    pub cells_visited: usize,
    /// Obstacle in the adjacent cell straight ahead.
    pub obstacle_ahead: bool,
}

impl<'g> Rover<'g> {
    /// Place a rover on the grid. The start cell is not validated here; the
    /// config loader rejects starts outside the grid or on an obstacle.
    pub fn new(position: Position, heading: Heading, grid: &'g Grid) -> Self {
        Self {
            position,
            heading,
            grid,
            path: vec![position],
            moves: 0,
            turns: 0,
            blocked: 0,
        }
    }

    /// Attempt one step forward. A rejected move leaves position and heading
    /// untouched and only bumps the blocked counter.
    pub fn move_forward(&mut self) -> Outcome {
        let candidate = self.position.offset(self.heading.displacement());
        if !self.grid.contains(candidate.x, candidate.y) {
            self.blocked += 1;
            return Outcome::BoundaryViolation {
                attempted: candidate,
            };
        }
        if self.grid.has_obstacle(candidate.x, candidate.y) {
            self.blocked += 1;
            return Outcome::ObstacleCollision {
                attempted: candidate,
            };
        }
        self.position = candidate;
        self.path.push(candidate);
        self.moves += 1;
        Outcome::Moved { to: candidate }
    }

    pub fn turn_left(&mut self) -> Outcome {
        self.heading = self.heading.turn_left();
        self.turns += 1;
        Outcome::Turned {
            heading: self.heading,
        }
    }

    pub fn turn_right(&mut self) -> Outcome {
        self.heading = self.heading.turn_right();
        self.turns += 1;
        Outcome::Turned {
            heading: self.heading,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// Cells successfully occupied, in visitation order, starting cell first.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Every applied command lands in exactly one of the three counters.
    pub fn commands_executed(&self) -> usize {
        self.moves + self.turns + self.blocked
    }

    /// True if the cell directly ahead holds an obstacle.
    pub fn obstacle_ahead(&self) -> bool {
        let ahead = self.position.offset(self.heading.displacement());
        self.grid.has_obstacle(ahead.x, ahead.y)
    }

    pub fn status(&self) -> RoverStatus {
        let cells_visited = self.path.iter().collect::<HashSet<_>>().len();
        RoverStatus {
            position: self.position,
            direction: self.heading,
            moves: self.moves,
            turns: self.turns,
            blocked: self.blocked,
            commands_executed: self.commands_executed(),
            cells_visited,
            obstacle_ahead: self.obstacle_ahead(),
        }
    }

    /// One-line human readable status.
    pub fn report(&self) -> String {
        let sensors = if self.obstacle_ahead() {
            "Obstacle detected ahead."
        } else {
            "No obstacles detected."
        };
        format!(
            "Rover is at {} facing {}. {sensors}",
            self.position, self.heading
        )
    }
}
