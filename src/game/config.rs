use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest board the terminal renderer is expected to draw
pub const MAX_BOARD_SIZE: usize = 100;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width and height of the square board, in cells
    pub board_size: usize,
    /// Milliseconds between two simulation ticks
    pub tick_ms: u64,
    /// Initial length of the snake
    pub initial_snake_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            tick_ms: 120,
            initial_snake_length: 3,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Builder-style override of the tick period
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.board_size * self.board_size
    }

    /// Check that a game can actually be started with this configuration
    ///
    /// The initial snake sits at the centre of the board heading right, so
    /// its tail must still be on the board, and at least one cell has to be
    /// left over for the food.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_ms > 0, "tick period must be at least 1ms");
        ensure!(
            self.board_size <= MAX_BOARD_SIZE,
            "board size {} exceeds the maximum of {MAX_BOARD_SIZE}",
            self.board_size
        );
        ensure!(
            self.initial_snake_length >= 1,
            "initial snake length must be at least 1"
        );
        ensure!(
            self.initial_snake_length <= self.board_size / 2 + 1,
            "a {}-cell snake does not fit on a {}x{} board",
            self.initial_snake_length,
            self.board_size,
            self.board_size
        );
        ensure!(
            self.initial_snake_length < self.cell_count(),
            "no free cell left for food on a {}x{} board",
            self.board_size,
            self.board_size
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 20);
        assert_eq!(config.tick_ms, 120);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.tick_interval(), Duration::from_millis(120));
        assert_eq!(config.cell_count(), 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15).with_tick_ms(80);
        assert_eq!(config.board_size, 15);
        assert_eq!(config.tick_ms, 80);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        assert!(GameConfig::new(2).validate().is_err());
        assert!(GameConfig::default().with_tick_ms(0).validate().is_err());

        let config = GameConfig {
            initial_snake_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_board_rejected() {
        assert!(GameConfig::new(MAX_BOARD_SIZE).validate().is_ok());

        let err = GameConfig::new(40000).validate().unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));
        assert!(GameConfig::new(MAX_BOARD_SIZE + 1).validate().is_err());
    }

    #[test]
    fn test_config_serde() {
        let json = r#"{"board_size":12,"tick_ms":200,"initial_snake_length":4}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.board_size, 12);
        assert_eq!(config.tick_ms, 200);
        assert_eq!(config.initial_snake_length, 4);
    }
}
