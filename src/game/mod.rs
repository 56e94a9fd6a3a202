//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, InputSource};
pub use board::{Board, CellKind};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use state::{GameState, Position, Snake};
