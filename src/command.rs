//! Rover commands, dispatcher input tokens, and transition outcomes.

use serde::Serialize;

use crate::error::InputError;
use crate::heading::Heading;
use crate::rover::Rover;
use crate::types::Position;

/// A transition the rover can be asked to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    MoveForward,
    TurnLeft,
    TurnRight,
}

impl Command {
    /// Run this command against the rover.
    pub fn apply(self, rover: &mut Rover<'_>) -> Outcome {
        match self {
            Command::MoveForward => rover.move_forward(),
            Command::TurnLeft => rover.turn_left(),
            Command::TurnRight => rover.turn_right(),
        }
    }

    /// Dispatcher token for this command.
    pub fn token(self) -> char {
        match self {
            Command::MoveForward => 'M',
            Command::TurnLeft => 'L',
            Command::TurnRight => 'R',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::MoveForward => "Move Forward",
            Command::TurnLeft => "Turn Left",
            Command::TurnRight => "Turn Right",
        }
    }
}

/// One line of dispatcher input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// End the session; never reaches the rover.
    Quit,
}

impl Input {
    fn from_token(token: char) -> Option<Input> {
        match token.to_ascii_uppercase() {
            'M' => Some(Input::Command(Command::MoveForward)),
            'L' => Some(Input::Command(Command::TurnLeft)),
            'R' => Some(Input::Command(Command::TurnRight)),
            'Q' => Some(Input::Quit),
            _ => None,
        }
    }

    /// Parse a single token line such as `"m"` or `" Q "`.
    pub fn parse(line: &str) -> Result<Input, InputError> {
        let trimmed = line.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(InputError::Empty),
            (Some(token), None) => {
                Input::from_token(token)
                    .ok_or_else(|| InputError::UnknownCommand(trimmed.to_string()))
            }
            _ => Err(InputError::UnknownCommand(trimmed.to_string())),
        }
    }
}

/// Parse a compact script like `"MMRML"` into commands, stopping at `Q`.
/// Whitespace and commas between tokens are ignored.
pub fn parse_script(script: &str) -> Result<Vec<Command>, InputError> {
    let mut commands = Vec::new();
    for token in script.chars().filter(|c| !c.is_whitespace() && *c != ',') {
        match Input::from_token(token) {
            Some(Input::Command(command)) => commands.push(command),
            Some(Input::Quit) => break,
            None => return Err(InputError::UnknownCommand(token.to_string())),
        }
    }
    Ok(commands)
}

/// Classification used by telemetry and summaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Boundary,
    Obstacle,
}

/// Result of applying a command. Rejected moves are ordinary outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Moved { to: Position },
    Turned { heading: Heading },
    BoundaryViolation { attempted: Position },
    ObstacleCollision { attempted: Position },
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Moved { .. } | Outcome::Turned { .. } => OutcomeKind::Success,
            Outcome::BoundaryViolation { .. } => OutcomeKind::Boundary,
            Outcome::ObstacleCollision { .. } => OutcomeKind::Obstacle,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind() == OutcomeKind::Success
    }

    /// Operator-facing message for a rejected move, `None` on success.
    pub fn warning(&self) -> Option<&'static str> {
        match self.kind() {
            OutcomeKind::Success => None,
            OutcomeKind::Boundary => Some("! Warning: Cannot move - grid boundary!"),
            OutcomeKind::Obstacle => Some("! Warning: Cannot move - obstacle detected!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn commands_dispatch_to_rover() {
        let grid = Grid::empty(10, 10).unwrap();
        let mut rover = Rover::new(Position::new(5, 5), Heading::North, &grid);

        Command::MoveForward.apply(&mut rover);
        assert_eq!(rover.position(), Position::new(5, 6));

        Command::TurnLeft.apply(&mut rover);
        assert_eq!(rover.heading(), Heading::West);

        Command::TurnRight.apply(&mut rover);
        Command::TurnRight.apply(&mut rover);
        assert_eq!(rover.heading(), Heading::East);
    }

    #[test]
    fn outcome_kinds_are_distinguishable() {
        let grid = Grid::new(2, 2, [(1, 0)]).unwrap();
        let mut rover = Rover::new(Position::new(0, 0), Heading::East, &grid);
        let obstacle = Command::MoveForward.apply(&mut rover);
        Command::TurnRight.apply(&mut rover);
        let boundary = Command::MoveForward.apply(&mut rover);

        assert_eq!(obstacle.kind(), OutcomeKind::Obstacle);
        assert_eq!(boundary.kind(), OutcomeKind::Boundary);
        assert_ne!(obstacle.warning(), boundary.warning());
        assert!(Outcome::Turned { heading: Heading::South }.warning().is_none());
    }

    #[test]
    fn parses_single_tokens() {
        assert_eq!(Input::parse("M"), Ok(Input::Command(Command::MoveForward)));
        assert_eq!(Input::parse(" l\n"), Ok(Input::Command(Command::TurnLeft)));
        assert_eq!(Input::parse("r"), Ok(Input::Command(Command::TurnRight)));
        assert_eq!(Input::parse("q"), Ok(Input::Quit));
    }

    #[test]
    fn rejects_bad_tokens() {
        assert_eq!(Input::parse("   "), Err(InputError::Empty));
        assert_eq!(
            Input::parse("X"),
            Err(InputError::UnknownCommand("X".to_string()))
        );
        assert_eq!(
            Input::parse("MM"),
            Err(InputError::UnknownCommand("MM".to_string()))
        );
    }

    #[test]
    fn script_stops_at_quit() {
        let commands = parse_script("mm, r M q L").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::MoveForward,
                Command::MoveForward,
                Command::TurnRight,
                Command::MoveForward,
            ]
        );
        assert_eq!(
            parse_script("MZ"),
            Err(InputError::UnknownCommand("Z".to_string()))
        );
    }

    #[test]
    fn tokens_round_trip_through_parser() {
        for command in [Command::MoveForward, Command::TurnLeft, Command::TurnRight] {
            assert_eq!(
                Input::parse(&command.token().to_string()),
                Ok(Input::Command(command))
            );
        }
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_value(Outcome::ObstacleCollision {
            attempted: Position::new(2, 2),
        })
        .unwrap();
        assert_eq!(json["outcome"], "obstacle_collision");
        assert_eq!(json["attempted"]["x"], 2);
    }
}
