use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Position, RunState, Snapshot};
use crate::metrics::GameMetrics;

/// Each cell is drawn two columns wide to look square in a terminal
const CELL_WIDTH: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_area = self.board_area(chunks[1], snapshot.board_size);
        frame.render_widget(self.render_grid(snapshot), board_area);

        if snapshot.is_game_over() {
            let popup = centered(board_area, 34, 9);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(snapshot, metrics), popup);
        }

        frame.render_widget(self.render_controls(snapshot.run_state), chunks[2]);
    }

    /// Board rectangle centred in `area`, clipped to what fits
    fn board_area(&self, area: Rect, board_size: usize) -> Rect {
        let size = u16::try_from(board_size).unwrap_or(u16::MAX);
        centered(
            area,
            size.saturating_mul(CELL_WIDTH).saturating_add(2),
            size.saturating_add(2),
        )
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.board_size);

        for y in 0..snapshot.board_size {
            let mut spans = Vec::with_capacity(snapshot.board_size);

            for x in 0..snapshot.board_size {
                let pos = Position::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = match snapshot.run_state {
            RunState::Paused => " Snake (paused) ",
            _ => " Snake ",
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let state_style = match snapshot.run_state {
            RunState::Running => Style::default().fg(Color::Green),
            RunState::Paused => Style::default().fg(Color::Yellow),
            RunState::GameOver => Style::default().fg(Color::Red),
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled(snapshot.run_state.label(), state_style),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if metrics.new_best {
            text.push(Line::from(Span::styled(
                "New best!",
                Style::default().fg(Color::Green),
            )));
        } else {
            text.push(Line::from(""));
        }

        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, run_state: RunState) -> Paragraph<'_> {
        let pause_hint = match run_state {
            RunState::Paused => " to resume | ",
            _ => " to pause | ",
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(pause_hint),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centred in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn snapshot(run_state: RunState, score: u32) -> Snapshot {
        Snapshot {
            snake: vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10),
            ],
            food: Position::new(3, 4),
            score,
            run_state,
            board_size: 20,
        }
    }

    fn draw(snapshot: &Snapshot) -> String {
        draw_with(snapshot, &GameMetrics::new())
    }

    fn draw_with(snapshot: &Snapshot, metrics: &GameMetrics) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let renderer = Renderer::new();
        terminal
            .draw(|frame| renderer.render(frame, snapshot, metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 30);
        let rect = centered(area, 42, 22);
        assert_eq!(rect.width, 42);
        assert_eq!(rect.height, 22);
        assert_eq!(rect.x, 19);
        assert_eq!(rect.y, 4);
    }

    #[test]
    fn test_board_area_clamps_huge_boards() {
        let area = Rect::new(0, 0, 80, 30);
        let rect = Renderer::new().board_area(area, 40000);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);

        let rect = Renderer::new().board_area(area, 20);
        assert_eq!((rect.width, rect.height), (42, 22));
    }

    #[test]
    fn test_running_board_shows_snake_and_food() {
        let screen = draw(&snapshot(RunState::Running, 2));

        assert!(screen.contains("Score: 2"));
        assert!(screen.contains('■'));
        assert!(screen.contains('□'));
        assert!(screen.contains('●'));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_paused_board_is_labelled() {
        let screen = draw(&snapshot(RunState::Paused, 0));

        assert!(screen.contains("Snake (paused)"));
        assert!(screen.contains("to resume"));
    }

    #[test]
    fn test_game_over_overlay_shows_final_score() {
        let screen = draw(&snapshot(RunState::GameOver, 7));

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 7"));
    }

    #[test]
    fn test_new_best_only_when_record_beaten() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(7);
        assert!(draw_with(&snapshot(RunState::GameOver, 7), &metrics).contains("New best!"));

        // Same score again only ties the record
        metrics.on_game_start();
        metrics.on_game_over(7);
        assert!(!draw_with(&snapshot(RunState::GameOver, 7), &metrics).contains("New best!"));
    }
}
