//! Grid Snake - Snake on a small wrap-around grid
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard and mouse-swipe input mapping (input module)
//! - TUI rendering (render module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
