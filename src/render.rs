//! Plain-text grid snapshots.

use std::collections::HashSet;
use std::fmt::Write;

use crate::rover::Rover;
use crate::types::Position;

const OBSTACLE: char = 'X';
const TRAIL: char = '*';
const EMPTY: char = '.';

/// Draw the grid with north at the top, one character per cell.
pub fn render_grid(rover: &Rover<'_>) -> String {
    let grid = rover.grid();
    let trail: HashSet<Position> = rover.path().iter().copied().collect();
    let mut out = String::new();

    for y in (0..grid.height()).rev() {
        let row: Vec<String> = (0..grid.width())
            .map(|x| {
                let cell = Position::new(x, y);
                let glyph = if cell == rover.position() {
                    rover.heading().symbol()
                } else if grid.has_obstacle(x, y) {
                    OBSTACLE
                } else if trail.contains(&cell) {
                    TRAIL
                } else {
                    EMPTY
                };
                glyph.to_string()
            })
            .collect();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{y:2} | {}", row.join(" "));
    }

    let _ = writeln!(out, "   +{}", "-".repeat(grid.width() as usize * 2));
    let labels: Vec<String> = (0..grid.width()).map(|x| (x % 10).to_string()).collect();
    let _ = writeln!(out, "     {}", labels.join(" "));
    let _ = writeln!(
        out,
        "Legend: ^>v< Rover | {OBSTACLE} Obstacle | {TRAIL} Path | {EMPTY} Empty"
    );
    out
}
