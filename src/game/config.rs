use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::action::Direction;
use super::state::Position;

/// Largest grid the terminal view can draw at two columns per cell
pub const MAX_GRID_SIZE: usize = 100;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs to list what it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square grid
    pub grid_size: usize,
    /// Time between two ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Where the one-segment snake starts
    pub initial_head: Position,
    pub initial_direction: Direction,
    pub initial_food: Position,
    /// Only place food on cells the snake does not occupy
    pub food_avoids_snake: bool,
    /// Ring the terminal bell when food is eaten
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            tick_interval_ms: 200,
            initial_head: Position::new(2, 2),
            initial_direction: Direction::Right,
            initial_food: Position::new(5, 5),
            food_avoids_snake: false,
            sound: true,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check that the grid is usable and the starting cells lie inside it
    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size > 0, "grid_size must be at least 1");
        ensure!(
            self.grid_size <= MAX_GRID_SIZE,
            "grid_size {} is larger than {}",
            self.grid_size,
            MAX_GRID_SIZE
        );
        ensure!(
            self.tick_interval_ms > 0,
            "tick_interval_ms must be at least 1"
        );
        ensure!(
            self.initial_head.in_grid(self.grid_size),
            "initial_head {:?} lies outside a {}x{} grid",
            self.initial_head,
            self.grid_size,
            self.grid_size
        );
        ensure!(
            self.initial_food.in_grid(self.grid_size),
            "initial_food {:?} lies outside a {}x{} grid",
            self.initial_food,
            self.grid_size,
            self.grid_size
        );
        Ok(())
    }
}
