pub mod renderer;

pub use renderer::{GAME_OVER_MESSAGE, Renderer};
