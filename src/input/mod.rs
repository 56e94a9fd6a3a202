pub mod handler;

pub use handler::{InputHandler, KeyAction, SwipeTracker, classify_swipe};
