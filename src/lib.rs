pub mod core {
	pub mod config;
	pub mod engine;
	pub mod game;
	pub mod menu;
	pub mod renderer;
	pub mod terminal;
}

pub mod cli;
pub mod games;

// Re-export for convenience
pub use crate::core::engine::{Arcade, ArcadeEngine, Control};
pub use crate::core::game::{Game, GameRng, Key, Pos};
