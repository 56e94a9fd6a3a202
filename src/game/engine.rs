use super::{
    action::{Action, Direction, InputSource},
    config::GameConfig,
    state::{GameState, Position, Snake},
};
use anyhow::Result;
use log::{debug, info, trace};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew; food now sits at `new_food`
    AteFood { new_food: Position },
    /// The snake ran into itself and the game was reset
    GameOver { score: u32, length: usize },
}

/// The game engine that owns the state and applies all game rules
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    state: GameState,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with an entropy-seeded random source
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a game engine drawing food positions from `rng`.
    ///
    /// Fails if the config does not pass [`GameConfig::validate`].
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let state = GameState::initial(&config);
        Ok(Self { config, state, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Put everything back to the starting snake, direction and food
    pub fn reset(&mut self) {
        self.state = GameState::initial(&self.config);
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        let grid_size = self.state.grid_size;
        let new_head = self
            .state
            .snake
            .head()
            .stepped(self.state.snake.direction, grid_size);

        // The tail has not moved yet, so it counts as an obstacle too
        if self.state.snake.occupies(new_head) {
            let outcome = TickOutcome::GameOver {
                score: self.state.score,
                length: self.state.snake.len(),
            };
            info!(
                "Snake ran into itself at ({}, {}) with length {}, resetting",
                new_head.x,
                new_head.y,
                self.state.snake.len()
            );
            self.reset();
            return outcome;
        }

        let ate_food = new_head == self.state.food;
        self.state.snake.advance(new_head, ate_food);
        self.state.steps += 1;

        if !ate_food {
            return TickOutcome::Moved;
        }

        self.state.score += 1;
        let new_food = Self::place_food(
            &mut self.rng,
            &self.state.snake,
            grid_size,
            self.config.food_avoids_snake,
        );
        self.state.food = new_food;
        debug!(
            "Food eaten, length now {}, food moved to ({}, {})",
            self.state.snake.len(),
            new_food.x,
            new_food.y
        );

        TickOutcome::AteFood { new_food }
    }

    /// Change direction from button input.
    ///
    /// A 180-degree turn is ignored. Returns whether the direction was taken.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        let current = self.state.snake.direction;
        if current.is_opposite(direction) {
            trace!("Ignoring {:?} while moving {:?}", direction, current);
            return false;
        }
        self.state.snake.direction = direction;
        true
    }

    /// Change direction from a swipe, with no reversal guard
    pub fn steer(&mut self, direction: Direction) {
        self.state.snake.direction = direction;
    }

    /// Apply a player action according to where it came from
    pub fn apply(&mut self, action: Action) -> bool {
        match action.source {
            InputSource::Button => self.set_direction(action.direction),
            InputSource::Swipe => {
                self.steer(action.direction);
                true
            }
        }
    }

    /// Pick a food cell uniformly.
    ///
    /// Unless `avoid_snake` is set the snake's own cells are candidates too.
    /// With no free cell left the whole grid is sampled.
    fn place_food(rng: &mut R, snake: &Snake, grid_size: usize, avoid_snake: bool) -> Position {
        if avoid_snake {
            let free: Vec<Position> = (0..grid_size as i32)
                .flat_map(|y| (0..grid_size as i32).map(move |x| Position::new(x, y)))
                .filter(|pos| !snake.occupies(*pos))
                .collect();

            if let Some(pos) = free.choose(rng) {
                return *pos;
            }
        }

        let x = rng.gen_range(0..grid_size) as i32;
        let y = rng.gen_range(0..grid_size) as i32;
        Position::new(x, y)
    }
}
