use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Where a direction change came from.
///
/// Button input refuses 180-degree turns, swipes are applied as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Button,
    Swipe,
}

/// A directional request from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub source: InputSource,
    pub direction: Direction,
}

impl Action {
    pub fn button(direction: Direction) -> Self {
        Self {
            source: InputSource::Button,
            direction,
        }
    }

    pub fn swipe(direction: Direction) -> Self {
        Self {
            source: InputSource::Swipe,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Right.is_opposite(Direction::Right));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_action_constructors() {
        assert_eq!(Action::button(Direction::Up).source, InputSource::Button);
        assert_eq!(Action::swipe(Direction::Left).source, InputSource::Swipe);
        assert_eq!(Action::swipe(Direction::Left).direction, Direction::Left);
    }
}
