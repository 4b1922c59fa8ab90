//! Bounded surface with a fixed obstacle set.

use std::collections::BTreeSet;

use crate::error::ConfigError;
use crate::types::Position;

/// Grid extent and obstacles; read-only once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    obstacles: BTreeSet<Position>,
}

impl Grid {
    /// Build a grid, rejecting non-positive dimensions and obstacles outside
    /// `[0, width) x [0, height)`. Duplicate obstacles collapse.
    pub fn new<I, P>(width: i32, height: i32, obstacles: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::NonPositiveDimensions { width, height });
        }
        let mut set = BTreeSet::new();
        for obstacle in obstacles {
            let obstacle = obstacle.into();
            if !in_bounds(width, height, obstacle.x, obstacle.y) {
                return Err(ConfigError::ObstacleOutOfBounds {
                    obstacle,
                    width,
                    height,
                });
            }
            set.insert(obstacle);
        }
        Ok(Self {
            width,
            height,
            obstacles: set,
        })
    }

    /// Obstacle-free grid of the given size.
    #[cfg(test)]
    pub fn empty(width: i32, height: i32) -> Result<Self, ConfigError> {
        Self::new(width, height, std::iter::empty::<Position>())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True iff `(x, y)` lies inside the grid extent.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        in_bounds(self.width, self.height, x, y)
    }

    /// True iff an obstacle occupies `(x, y)`. Out-of-bounds cells never do.
    pub fn has_obstacle(&self, x: i32, y: i32) -> bool {
        self.obstacles.contains(&Position::new(x, y))
    }

    /// Obstacles in ascending `(x, y)` order.
    pub fn obstacles(&self) -> impl Iterator<Item = Position> + '_ {
        self.obstacles.iter().copied()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }
}

fn in_bounds(width: i32, height: i32, x: i32, y: i32) -> bool {
    (0..width).contains(&x) && (0..height).contains(&y)
}
