//! Grid Snake - a terminal snake game
//!
//! This library provides:
//! - Core game logic (game module): the engine, its state and commands
//! - Keyboard mapping (input module)
//! - TUI rendering of engine snapshots (render module)
//! - Session statistics (metrics module)
//! - The interactive play loop and its tick timer (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
