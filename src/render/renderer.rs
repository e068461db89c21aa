use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
};

use crate::game::{Board, GameState, Position};
use crate::metrics::GameMetrics;

pub const PINNI_GLYPH: &str = "🐱";
pub const FOOD_GLYPH: &str = "🍟";

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, board: &Board, metrics: &GameMetrics) {
        let grid_rows = board.grid_size as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),         // Title and message
                Constraint::Length(1),         // Stats
                Constraint::Length(grid_rows), // Board
                Constraint::Length(3),         // Hunger
                Constraint::Min(0),
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(board), chunks[0]);
        frame.render_widget(self.render_stats(metrics), chunks[1]);

        // Each cell is two columns wide
        let board_area = centered(chunks[2], board.grid_size as u16 * 2 + 2);
        frame.render_widget(self.render_grid(board), board_area);

        if board.state == GameState::Playing {
            let hunger_area = centered(chunks[3], board.grid_size as u16 * 2 + 2);
            frame.render_widget(self.render_hunger(board), hunger_area);
        }

        frame.render_widget(self.render_controls(board.state), chunks[5]);
    }

    fn render_header<'a>(&self, board: &'a Board) -> Paragraph<'a> {
        let message = match board.state {
            GameState::Idle => Line::from(vec![
                Span::styled(board.message.as_str(), Style::default().fg(Color::Magenta)),
                Span::raw(" Press Enter to start."),
            ]),
            GameState::Playing => Line::from(Span::styled(
                "Feed Pinni! Don't let her starve!",
                Style::default().fg(Color::Magenta),
            )),
            GameState::GameOver => Line::from(vec![
                Span::styled(
                    board.message.as_str(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Press Enter to restart."),
            ]),
        };

        let text = vec![
            Line::from(Span::styled(
                "Pinni the Cat",
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            )),
            message,
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_stats(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Meals: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.meals.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.best_meals.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Alive: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_grid(&self, board: &Board) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..board.grid_size {
            let mut spans = Vec::new();

            for x in 0..board.grid_size {
                let pos = Position::new(x, y);

                let cell = if pos == board.character.position {
                    Span::raw(PINNI_GLYPH)
                } else if pos == board.food {
                    Span::raw(FOOD_GLYPH)
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let border = if board.state == GameState::GameOver {
            Color::Red
        } else {
            Color::Magenta
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));

        if board.fed {
            block = block.title_bottom(
                Line::from(Span::styled(
                    " Meow! ",
                    Style::default()
                        .fg(Color::LightMagenta)
                        .add_modifier(Modifier::BOLD),
                ))
                .centered(),
            );
        }

        Paragraph::new(lines).block(block)
    }

    fn render_hunger(&self, board: &Board) -> Gauge<'_> {
        let percentage = board.hunger.percentage().clamp(0.0, 100.0);

        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Hunger Level "),
            )
            .gauge_style(Style::default().fg(Color::LightMagenta).bg(Color::DarkGray))
            .ratio(percentage / 100.0)
            .label(format!("{}%", percentage.round() as u32))
    }

    fn render_controls(&self, state: GameState) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
        ];
        if state.can_start() {
            let verb = if state == GameState::Idle {
                " to start | "
            } else {
                " to restart | "
            };
            spans.push(Span::styled("Enter", Style::default().fg(Color::Green)));
            spans.push(Span::raw(verb));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A horizontally centered slice of `area`, at most `width` wide
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(board: &Board) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, board, &metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_idle_screen_prompts_to_start() {
        let engine = GameEngine::with_seed(GameConfig::default(), 1).unwrap();
        let screen = draw(engine.board());
        assert!(screen.contains("Pinni the Cat"));
        assert!(screen.contains("Press Enter to start."));
        assert!(!screen.contains("Hunger Level"));
    }

    #[test]
    fn test_playing_screen_shows_hunger() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1).unwrap();
        engine.start(tokio::time::Instant::now());
        let screen = draw(engine.board());
        assert!(screen.contains("Hunger Level"));
        assert!(screen.contains("100%"));
        assert!(screen.contains(PINNI_GLYPH));
    }

    #[test]
    fn test_game_over_screen_prompts_restart() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1).unwrap();
        let t0 = tokio::time::Instant::now();
        engine.start(t0);
        engine.board_mut().food = Position::new(3, 3);
        engine.advance(t0 + std::time::Duration::from_millis(6000));
        assert_eq!(engine.state(), GameState::GameOver);

        let screen = draw(engine.board());
        assert!(screen.contains("died of hunger"));
        assert!(screen.contains("Press Enter to restart."));
        assert!(!screen.contains("Hunger Level"));
    }

    #[test]
    fn test_meow_marker_follows_fed_flag() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1).unwrap();
        engine.start(tokio::time::Instant::now());
        assert!(!draw(engine.board()).contains("Meow!"));

        let mut board = engine.board().clone();
        board.fed = true;
        assert!(draw(&board).contains(" Meow! "));
    }

    #[test]
    fn test_centered_never_exceeds_area() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(centered(area, 40), area);
        assert_eq!(centered(area, 4), Rect::new(3, 0, 4, 5));
    }
}
