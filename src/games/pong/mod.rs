pub mod game;

pub use game::{PongAction, PongGame, PongState};
