/// Tetris: pure board logic plus the arcade adapter
pub mod game;
pub mod pieces;

pub use game::{TetrisGame, TetrisState};
pub use pieces::{Piece, Tetromino};
