//! Cell-by-cell view of the game, rebuilt from scratch for every frame.

use super::state::{GameState, Position};

/// What occupies one cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Snake,
    Food,
}

/// Classified grid, indexed `cells[y][x]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Vec<CellKind>>,
}

impl Board {
    /// Classify every cell of the state's grid.
    ///
    /// A cell holding both a snake segment and the food shows as snake.
    pub fn from_state(state: &GameState) -> Self {
        let cells = (0..state.grid_size as i32)
            .map(|y| {
                (0..state.grid_size as i32)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if state.snake.occupies(pos) {
                            CellKind::Snake
                        } else if pos == state.food {
                            CellKind::Food
                        } else {
                            CellKind::Empty
                        }
                    })
                    .collect()
            })
            .collect();

        Self { cells }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, pos: Position) -> Option<CellKind> {
        let row = self.cells.get(usize::try_from(pos.y).ok()?)?;
        row.get(usize::try_from(pos.x).ok()?).copied()
    }
}
