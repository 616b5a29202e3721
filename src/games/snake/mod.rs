/// Snake: steer a growing snake toward food without hitting walls or itself
pub mod game;

pub use game::{SnakeGame, SnakeState};
