use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::{Command, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, Position, RunState, Snake, Snapshot},
};

/// What happened during one call to [`GameEngine::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether the game is over after this step
    pub terminated: bool,
}

impl StepResult {
    fn idle(run_state: RunState) -> Self {
        Self {
            ate_food: false,
            collision_type: None,
            terminated: run_state == RunState::GameOver,
        }
    }
}

/// The game engine: sole owner and mutator of the game state
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new engine with a fresh game
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let state = Self::initial_state(&config, &mut rng);
        Self { config, state, rng }
    }

    /// Resume from an existing state, e.g. a hand-built board
    ///
    /// The board size always comes from `config`, so bounds checks and
    /// food placement agree.
    pub fn from_state(config: GameConfig, mut state: GameState) -> Self {
        state.board_size = config.board_size;
        Self {
            config,
            state,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn direction(&self) -> Direction {
        self.state.snake.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.state.pending_direction
    }

    /// Read-only view of the current game for rendering
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Dispatch an input command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => {
                self.set_direction(direction);
            }
            Command::TogglePause => {
                self.toggle_pause();
            }
            Command::Restart => self.restart(),
        }
    }

    /// Request a direction for the next tick
    ///
    /// Returns false when the request is ignored: the game is not running,
    /// or `direction` would reverse the snake into its own neck.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state.run_state != RunState::Running {
            trace!("ignoring turn to {direction:?} while {:?}", self.state.run_state);
            return false;
        }
        if self.state.snake.direction.is_opposite(direction) {
            trace!("ignoring reversal to {direction:?}");
            return false;
        }

        self.state.pending_direction = direction;
        true
    }

    /// Switch between running and paused; returns the new run state
    pub fn toggle_pause(&mut self) -> RunState {
        self.state.run_state = match self.state.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::GameOver => return RunState::GameOver,
        };
        info!("game {}", self.state.run_state.label().to_lowercase());
        self.state.run_state
    }

    /// Throw away the current game and start a fresh one
    pub fn restart(&mut self) {
        self.state = Self::initial_state(&self.config, &mut self.rng);
        debug!("game restarted, food at {:?}", self.state.food);
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) -> StepResult {
        if self.state.run_state != RunState::Running {
            return StepResult::idle(self.state.run_state);
        }

        self.state.snake.direction = self.state.pending_direction;
        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction);

        // Walls come first: food is never collected off the board
        if !self.state.is_in_bounds(new_head) {
            return self.end_game(CollisionType::Wall);
        }

        let ate_food = new_head == self.state.food;

        if self.state.snake.collides_on_move(new_head, ate_food) {
            return self.end_game(CollisionType::SelfCollision);
        }

        self.state.snake.advance(new_head, ate_food);

        if ate_food {
            self.state.score += 1;
            debug!("food eaten at {new_head:?}, score {}", self.state.score);

            match Self::spawn_food_avoid_snake(&self.config, &mut self.rng, &self.state.snake) {
                Some(food) => self.state.food = food,
                None => {
                    info!("board full, final score {}", self.state.score);
                    self.state.run_state = RunState::GameOver;
                    return StepResult {
                        ate_food,
                        collision_type: None,
                        terminated: true,
                    };
                }
            }
        }

        StepResult {
            ate_food,
            collision_type: None,
            terminated: false,
        }
    }

    fn end_game(&mut self, collision_type: CollisionType) -> StepResult {
        self.state.run_state = RunState::GameOver;
        info!(
            "game over ({collision_type:?}), final score {}",
            self.state.score
        );

        StepResult {
            ate_food: false,
            collision_type: Some(collision_type),
            terminated: true,
        }
    }

    fn initial_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
        let center = (config.board_size / 2) as i32;
        let snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            config.initial_snake_length,
        );

        // A validated config always leaves room for the first food
        let food = Self::spawn_food_avoid_snake(config, rng, &snake)
            .unwrap_or(Position::new(0, 0));

        GameState::new(snake, food, config.board_size)
    }

    /// Spawn food at a uniformly random free cell
    ///
    /// Rejection sampling; returns None only when the snake covers the
    /// whole board.
    fn spawn_food_avoid_snake(
        config: &GameConfig,
        rng: &mut StdRng,
        snake: &Snake,
    ) -> Option<Position> {
        if snake.len() >= config.cell_count() {
            return None;
        }

        loop {
            let x = rng.gen_range(0..config.board_size) as i32;
            let y = rng.gen_range(0..config.board_size) as i32;
            let pos = Position::new(x, y);

            if !snake.contains(pos) {
                return Some(pos);
            }
        }
    }
}
