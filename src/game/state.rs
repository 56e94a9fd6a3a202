use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::GameConfig;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta, wrapping around the edges of a square grid
    pub fn wrapped_by(&self, dx: i32, dy: i32, grid_size: usize) -> Self {
        let size = grid_size as i32;
        Self {
            x: (self.x + dx).rem_euclid(size),
            y: (self.y + dy).rem_euclid(size),
        }
    }

    /// Move one cell in a direction on a wrap-around grid
    pub fn stepped(&self, direction: Direction, grid_size: usize) -> Self {
        let (dx, dy) = direction.delta();
        self.wrapped_by(dx, dy, grid_size)
    }

    pub fn in_grid(&self, grid_size: usize) -> bool {
        let size = grid_size as i64;
        (0..size).contains(&(self.x as i64)) && (0..size).contains(&(self.y as i64))
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty.
    body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a one-segment snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Create a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn from_body(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_size: usize,
    /// Food eaten since the last reset
    pub score: u32,
    /// Ticks since the last reset
    pub steps: u32,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, grid_size: usize) -> Self {
        Self {
            snake,
            food,
            grid_size,
            score: 0,
            steps: 0,
        }
    }

    /// The state every round starts from
    pub fn initial(config: &GameConfig) -> Self {
        Self::new(
            Snake::new(config.initial_head, config.initial_direction),
            config.initial_food,
            config.grid_size,
        )
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrapping() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.wrapped_by(1, 0, 10), Position::new(6, 5));
        assert_eq!(pos.wrapped_by(0, -1, 10), Position::new(5, 4));

        assert_eq!(Position::new(9, 3).stepped(Direction::Right, 10), Position::new(0, 3));
        assert_eq!(Position::new(0, 3).stepped(Direction::Left, 10), Position::new(9, 3));
        assert_eq!(Position::new(4, 0).stepped(Direction::Up, 10), Position::new(4, 9));
        assert_eq!(Position::new(4, 9).stepped(Direction::Down, 10), Position::new(4, 0));
    }

    #[test]
    fn test_in_grid() {
        assert!(Position::new(0, 0).in_grid(10));
        assert!(Position::new(9, 9).in_grid(10));
        assert!(!Position::new(-1, 0).in_grid(10));
        assert!(!Position::new(10, 0).in_grid(10));
        assert!(!Position::new(0, 10).in_grid(10));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(2, 2), Direction::Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.body(), &[Position::new(2, 2)]);
        assert!(!snake.is_empty());

        assert!(Snake::from_body(vec![], Direction::Up).is_none());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::from_body(
            vec![Position::new(3, 2), Position::new(2, 2)],
            Direction::Right,
        )
        .unwrap();

        snake.advance(Position::new(4, 2), false);
        assert_eq!(snake.body(), &[Position::new(4, 2), Position::new(3, 2)]);

        snake.advance(Position::new(5, 2), true);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 2));
        assert_eq!(snake.body()[2], Position::new(3, 2));
    }

    #[test]
    fn test_occupancy() {
        let state = GameState::initial(&GameConfig::default());
        assert!(state.snake.occupies(Position::new(2, 2)));
        assert!(!state.snake.occupies(Position::new(5, 5)));
        assert_eq!(state.direction(), Direction::Right);
        assert!(state.food.in_grid(state.grid_size));
    }
}
