use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameEngine, TickOutcome};
use crate::input::{InputHandler, KeyAction, SwipeTracker};
use crate::metrics::GameMetrics;
use crate::render::{GAME_OVER_MESSAGE, Renderer};

/// Which part of the session is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Landing,
    Playing,
    /// The crash alert is up; ticks wait until it is dismissed
    Alert,
}

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    swipes: SwipeTracker,
    screen: Screen,
    sound: bool,
    should_quit: bool,
    restart_ticks: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>, skip_landing: bool) -> Result<Self> {
        let sound = config.sound;
        let engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed)?,
            None => GameEngine::new(config)?,
        };

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            swipes: SwipeTracker::new(),
            screen: if skip_landing {
                Screen::Playing
            } else {
                Screen::Landing
            },
            sound,
            should_quit: false,
            restart_ticks: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = match setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                // Undo whatever part of the setup went through
                if let Err(cleanup_err) = restore_terminal(&mut stderr()) {
                    warn!("Terminal restore after failed setup: {:#}", cleanup_err);
                }
                return Err(err);
            }
        };
        info!("Terminal session started");

        // Timers and the event stream live inside the loop and go away with it
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal even if the loop failed
        let cleanup = restore_terminal(terminal.backend_mut());
        info!(
            "Terminal session ended after {} crashes, best length {}",
            self.metrics.crashes, self.metrics.best_length
        );

        result.and(cleanup)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.screen == Screen::Playing
                        && self.update_game() == Some(true)
                        && self.sound
                    {
                        ring_bell(terminal)?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.restart_ticks {
                // A full period passes before the first tick of a new round
                tick_timer.reset();
                self.restart_ticks = false;
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| match self.screen {
                Screen::Landing => self.renderer.render_landing(frame),
                Screen::Playing => {
                    self.renderer
                        .render_game(frame, self.engine.state(), &self.metrics, None)
                }
                Screen::Alert => self.renderer.render_game(
                    frame,
                    self.engine.state(),
                    &self.metrics,
                    Some(GAME_OVER_MESSAGE),
                ),
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.input_handler.handle_key_event(key);

                match (self.screen, action) {
                    (_, KeyAction::Quit) => self.should_quit = true,
                    (Screen::Landing, KeyAction::Confirm) => self.start_round(),
                    (Screen::Landing, _) => {}
                    (Screen::Alert, _) => self.start_round(),
                    (Screen::Playing, KeyAction::Steer(action)) => {
                        self.engine.apply(action);
                    }
                    (Screen::Playing, _) => {}
                }
            }
            Event::Mouse(mouse) => match self.screen {
                Screen::Playing => {
                    if let Some(action) = self.swipes.handle_mouse_event(mouse) {
                        debug!("Swipe {:?}", action.direction);
                        self.engine.apply(action);
                    }
                }
                Screen::Alert if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    self.start_round();
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Run one tick. Returns whether food was eaten, `None` on a crash.
    fn update_game(&mut self) -> Option<bool> {
        match self.engine.tick() {
            TickOutcome::Moved => Some(false),
            TickOutcome::AteFood { .. } => {
                self.metrics
                    .on_food_eaten(self.engine.state().snake.len());
                Some(true)
            }
            TickOutcome::GameOver { score, length } => {
                debug!("Round over with score {} and length {}", score, length);
                self.metrics.on_crash();
                self.screen = Screen::Alert;
                None
            }
        }
    }

    fn start_round(&mut self) {
        self.screen = Screen::Playing;
        self.swipes = SwipeTracker::new();
        self.restart_ticks = true;
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Leave raw mode, mouse capture and the alternate screen, and show the cursor.
///
/// Every step runs even when an earlier one fails; the first error wins.
fn restore_terminal<W: Write>(out: &mut W) -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(out, DisableMouseCapture, LeaveAlternateScreen, cursor::Show)
        .context("Failed to leave alternate screen");
    raw.and(screen)
}

/// The food cue
fn ring_bell(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
    let backend = terminal.backend_mut();
    backend
        .write_all(b"\x07")
        .and_then(|_| backend.flush())
        .context("Failed to ring terminal bell")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position, Snake};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_landing_waits_for_confirm() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(1), false).unwrap();
        assert_eq!(mode.screen, Screen::Landing);

        mode.handle_event(press(KeyCode::Up));
        assert_eq!(mode.screen, Screen::Landing);
        assert_eq!(mode.engine.state().direction(), Direction::Right);

        mode.handle_event(press(KeyCode::Enter));
        assert_eq!(mode.screen, Screen::Playing);
        assert!(mode.restart_ticks);
    }

    #[test]
    fn test_keys_steer_with_reverse_guard() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(1), true).unwrap();

        mode.handle_event(press(KeyCode::Left));
        assert_eq!(mode.engine.state().direction(), Direction::Right);

        mode.handle_event(press(KeyCode::Char('s')));
        assert_eq!(mode.engine.state().direction(), Direction::Down);
    }

    #[test]
    fn test_swipe_can_reverse() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(1), true).unwrap();

        mode.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 30, 10));
        mode.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 20, 11));

        assert_eq!(mode.engine.state().direction(), Direction::Left);
    }

    #[test]
    fn test_crash_shows_alert_until_dismissed() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(1), true).unwrap();
        mode.engine.state_mut().snake = Snake::from_body(
            vec![
                Position::new(3, 2),
                Position::new(4, 2),
                Position::new(4, 3),
                Position::new(3, 3),
            ],
            Direction::Down,
        )
        .unwrap();

        assert_eq!(mode.update_game(), None);
        assert_eq!(mode.screen, Screen::Alert);
        assert_eq!(mode.metrics.crashes, 1);
        assert_eq!(mode.engine.state().snake.body(), &[Position::new(2, 2)]);

        // Direction keys only dismiss the alert
        mode.handle_event(press(KeyCode::Down));
        assert_eq!(mode.screen, Screen::Playing);
        assert_eq!(mode.engine.state().direction(), Direction::Right);
    }

    #[test]
    fn test_eating_reports_cue() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(1), true).unwrap();
        mode.engine.state_mut().food = Position::new(3, 2);

        assert_eq!(mode.update_game(), Some(true));
        assert_eq!(mode.metrics.best_length, 2);

        mode.engine.state_mut().food = Position::new(9, 9);
        assert_eq!(mode.update_game(), Some(false));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            grid_size: 0,
            ..Default::default()
        };
        assert!(HumanMode::new(config, None, true).is_err());
    }

    #[test]
    fn test_restore_terminal_emits_every_step() {
        let mut out: Vec<u8> = Vec::new();
        restore_terminal(&mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "alternate screen left: {:?}", written);
        assert!(written.contains("\x1b[?25h"), "cursor shown: {:?}", written);
    }

    #[test]
    fn test_quit_from_any_screen() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(1), false).unwrap();
        mode.handle_event(press(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
