use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction of travel committed by the last tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first
    pub fn from_cells(body: Vec<Position>, direction: Direction) -> Self {
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check whether moving the head onto `pos` runs into the body
    ///
    /// The tail is only part of the check when the snake grows this tick;
    /// otherwise it vacates its cell as the head moves in.
    pub fn collides_on_move(&self, pos: Position, growing: bool) -> bool {
        let checked = if growing {
            &self.body[..]
        } else {
            &self.body[..self.body.len().saturating_sub(1)]
        };
        checked.contains(&pos)
    }

    /// Push `new_head` to the front, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Whether the simulation is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Paused,
    GameOver,
}

impl RunState {
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Running => "Running",
            RunState::Paused => "Paused",
            RunState::GameOver => "Game Over",
        }
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state, owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction the snake will adopt on the next tick
    pub pending_direction: Direction,
    pub food: Position,
    pub board_size: usize,
    pub score: u32,
    pub run_state: RunState,
}

impl GameState {
    /// Create a new running game state with score 0
    pub fn new(snake: Snake, food: Position, board_size: usize) -> Self {
        Self {
            pending_direction: snake.direction,
            snake,
            food,
            board_size,
            score: 0,
            run_state: RunState::Running,
        }
    }

    /// Check if a position is within the board
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.board_size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }

    /// Read-only copy of what a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.body.clone(),
            food: self.food,
            score: self.score,
            run_state: self.run_state,
            board_size: self.board_size,
        }
    }
}

/// Immutable view of the game handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snake cells, head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub run_state: RunState,
    pub board_size: usize,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn is_game_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }
}
