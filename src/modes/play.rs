use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::ticker::Ticker;
use crate::game::{Command, GameConfig, GameEngine, RunState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive terminal game: keyboard in, board out
pub struct PlayMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    ticker: Ticker,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }

    pub fn with_engine(engine: GameEngine) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            ticker: Ticker::stopped(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        // Whatever happens past this point, the terminal gets restored
        let result = self.run_in_raw_mode().await;
        self.ticker.stop();

        result.and(restore_terminal())
    }

    async fn run_in_raw_mode(&mut self) -> Result<()> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            "starting game on a {0}x{0} board, {1}ms per tick",
            self.engine.config().board_size,
            self.engine.config().tick_ms
        );

        self.run_game_loop(&mut terminal).await
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        self.sync_ticker();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only armed while running
                _ = self.ticker.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(command) => self.apply_command(command),
                KeyAction::Quit => {
                    info!("quit requested");
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn apply_command(&mut self, command: Command) {
        let before = self.engine.run_state();
        self.engine.apply(command);
        let after = self.engine.run_state();

        match (command, before, after) {
            (Command::Restart, _, _) => {
                // Fresh game, fresh tick phase
                self.ticker.stop();
                self.metrics.on_game_start();
            }
            (Command::TogglePause, RunState::Running, RunState::Paused) => {
                self.metrics.on_pause();
            }
            (Command::TogglePause, RunState::Paused, RunState::Running) => {
                self.metrics.on_resume();
            }
            _ => {}
        }

        self.sync_ticker();
    }

    fn update_game(&mut self) {
        let result = self.engine.step();

        if result.terminated {
            let score = self.engine.score();
            self.metrics.on_game_over(score);
            debug!(
                "session: {} games, best {}",
                self.metrics.games_played, self.metrics.high_score
            );
        }

        self.sync_ticker();
    }

    /// Keep the tick timer armed exactly while the game is running
    fn sync_ticker(&mut self) {
        if self.engine.run_state() == RunState::Running {
            self.ticker.start(self.engine.config().tick_interval());
        } else {
            self.ticker.stop();
        }
    }
}

/// Undo raw mode and the alternate screen, attempting every step
fn restore_terminal() -> Result<()> {
    run_cleanup([
        disable_raw_mode().context("Failed to disable raw mode"),
        execute!(stderr(), LeaveAlternateScreen).context("Failed to leave alternate screen"),
        execute!(stderr(), Show).context("Failed to show cursor"),
    ])
}

/// Fold already-attempted cleanup steps into the first failure, if any
fn run_cleanup<I>(steps: I) -> Result<()>
where
    I: IntoIterator<Item = Result<()>>,
{
    steps.into_iter().fold(Ok(()), |first, step| first.and(step))
}
