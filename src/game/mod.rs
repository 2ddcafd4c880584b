//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine is driven by commands and ticks and hands out snapshots for rendering.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{GameConfig, MAX_BOARD_SIZE};
pub use engine::{GameEngine, StepResult};
pub use state::{CollisionType, GameState, Position, RunState, Snake, Snapshot};
