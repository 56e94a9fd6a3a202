use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::game::{Board, CellKind, GameState, Position};
use crate::metrics::GameMetrics;

pub const GAME_OVER_MESSAGE: &str = "Game Over! You ran into yourself.";

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Title screen shown before the first round
    pub fn render_landing(&self, frame: &mut Frame) {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Welcome to Snake",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        let area = centered_rect(frame.area(), 44, 6);
        let landing = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Snake "),
        );
        frame.render_widget(landing, area);
    }

    /// Grid with header and footer, plus the game-over alert when one is up
    pub fn render_game(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        alert: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Two columns per cell keeps the grid roughly square
        let grid_width = (state.grid_size as u16).saturating_mul(2).saturating_add(2);
        let grid_height = (state.grid_size as u16).saturating_add(2);
        let game_area = centered_rect(chunks[1], grid_width, grid_height);
        frame.render_widget(self.render_grid(state), game_area);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);

        if let Some(message) = alert {
            let width = (message.len() as u16).saturating_add(6);
            let popup = centered_rect(frame.area(), width, 5);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_alert(message), popup);
        }
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let board = Board::from_state(state);
        let head = state.snake.head();

        let size = board.size() as i32;
        let lines: Vec<Line> = (0..size)
            .map(|y| {
                let spans: Vec<Span> = (0..size)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        let cell = board.get(pos).unwrap_or(CellKind::Empty);
                        cell_span(cell, pos == head)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("   "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_length.to_string(), value),
            Span::raw("   "),
            Span::styled("Eaten: ", label),
            Span::styled(metrics.food_eaten.to_string(), value),
            Span::raw("   "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_alert(&self, message: &str) -> Paragraph<'static> {
        let text = vec![
            Line::from(vec![Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Press any key",
                Style::default().fg(Color::Gray),
            )]),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("drag", Style::default().fg(Color::Cyan)),
            Span::raw(" to swipe | "),
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

fn cell_span(cell: CellKind, is_head: bool) -> Span<'static> {
    match cell {
        CellKind::Snake if is_head => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        CellKind::Snake => Span::styled("■ ", Style::default().fg(Color::Green)),
        CellKind::Food => Span::styled(
            "● ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        CellKind::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(centered_rect(area, 10, 4), Rect::new(15, 8, 10, 4));
        assert_eq!(centered_rect(area, 80, 40), area);
    }

    #[test]
    fn test_render_game_draws_cells() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let state = GameState::initial(&GameConfig::default());
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();

        terminal
            .draw(|frame| renderer.render_game(frame, &state, &metrics, None))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Eaten: 0"));
        assert_eq!(text.matches('■').count(), 1);
        assert_eq!(text.matches('●').count(), 1);
        assert!(!text.contains(GAME_OVER_MESSAGE));
    }

    #[test]
    fn test_render_alert_and_landing() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let state = GameState::initial(&GameConfig::default());
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();

        terminal
            .draw(|frame| renderer.render_game(frame, &state, &metrics, Some(GAME_OVER_MESSAGE)))
            .unwrap();
        assert!(screen_text(&terminal).contains(GAME_OVER_MESSAGE));

        terminal.draw(|frame| renderer.render_landing(frame)).unwrap();
        assert!(screen_text(&terminal).contains("Welcome to Snake"));
    }
}
