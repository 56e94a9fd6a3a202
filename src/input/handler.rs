use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Action),
    Confirm,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Action::button(Direction::Up)),
            KeyCode::Down => KeyAction::Steer(Action::button(Direction::Down)),
            KeyCode::Left => KeyAction::Steer(Action::button(Direction::Left)),
            KeyCode::Right => KeyAction::Steer(Action::button(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Steer(Action::button(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Steer(Action::button(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Steer(Action::button(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Steer(Action::button(Direction::Right))
            }

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Confirm,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a left-button drag into a swipe direction
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a mouse event; returns a swipe once the button is released
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (start_x, start_y) = self.start.take()?;
                let dx = i32::from(event.column) - i32::from(start_x);
                let dy = i32::from(event.row) - i32::from(start_y);
                Some(Action::swipe(classify_swipe(dx, dy)))
            }
            _ => None,
        }
    }
}

/// Pick a direction from a drag by its dominant axis.
///
/// Anything that is not strictly horizontal counts as vertical, so ties and a
/// drag that ends where it started both resolve on the y axis (the latter to
/// `Up`).
pub fn classify_swipe(dx: i32, dy: i32) -> Direction {
    if dx.abs() > dy.abs() {
        if dx > 0 { Direction::Right } else { Direction::Left }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}
