use serde::{Deserialize, Serialize};

use crate::core::game::{GameRng, Pos};
use crate::core::renderer::TerminalColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tetromino {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::O,
        Tetromino::T,
        Tetromino::S,
        Tetromino::Z,
        Tetromino::J,
        Tetromino::L,
    ];

    /// Uniform pick, no bag
    pub fn random(rng: &mut GameRng) -> Self {
        Self::ALL[rng.below(Self::ALL.len())]
    }

    pub fn color(self) -> TerminalColor {
        match self {
            Tetromino::I => TerminalColor::Cyan,
            Tetromino::O => TerminalColor::Yellow,
            Tetromino::T => TerminalColor::Magenta,
            Tetromino::S => TerminalColor::Green,
            Tetromino::Z => TerminalColor::Red,
            Tetromino::J => TerminalColor::Blue,
            Tetromino::L => TerminalColor::Orange,
        }
    }

    pub fn shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            Tetromino::I => &[&[1, 1, 1, 1]],
            Tetromino::O => &[&[1, 1], &[1, 1]],
            Tetromino::T => &[&[0, 1, 0], &[1, 1, 1]],
            Tetromino::S => &[&[0, 1, 1], &[1, 1, 0]],
            Tetromino::Z => &[&[1, 1, 0], &[0, 1, 1]],
            Tetromino::J => &[&[1, 0, 0], &[1, 1, 1]],
            Tetromino::L => &[&[0, 0, 1], &[1, 1, 1]],
        };
        rows.iter().map(|row| row.iter().map(|&c| c == 1).collect()).collect()
    }
}

/// Row-major occupancy matrix of a piece
pub type Shape = Vec<Vec<bool>>;

/// Clockwise rotation: transpose, then reverse every row
pub fn rotate(shape: &Shape) -> Shape {
    let rows = shape.len();
    let cols = shape.first().map_or(0, Vec::len);
    (0..cols)
        .map(|c| (0..rows).rev().map(|r| shape[r][c]).collect())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: Tetromino,
    pub shape: Shape,
    /// Board position of the shape's top-left corner
    pub origin: Pos,
}

impl Piece {
    /// Centered on the top row of a board `board_width` cells wide
    pub fn spawn(kind: Tetromino, board_width: i32) -> Self {
        let shape = kind.shape();
        let width = shape[0].len() as i32;
        Self { kind, shape, origin: Pos::new((board_width - width) / 2, 0) }
    }

    /// Board cells covered by this piece
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.shape.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(c, _)| self.origin + Pos::new(c as i32, r as i32))
        })
    }

    pub fn shifted(&self, by: Pos) -> Self {
        Self { origin: self.origin + by, ..self.clone() }
    }

    pub fn rotated(&self) -> Self {
        Self { shape: rotate(&self.shape), ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_piece_has_four_cells() {
        for kind in Tetromino::ALL {
            let piece = Piece::spawn(kind, 10);
            assert_eq!(piece.cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn rotate_turns_t_clockwise() {
        let rotated = rotate(&Tetromino::T.shape());
        let expected = vec![vec![true, false], vec![true, true], vec![true, false]];
        assert_eq!(rotated, expected);
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in Tetromino::ALL {
            let shape = kind.shape();
            let turned = rotate(&rotate(&rotate(&rotate(&shape))));
            assert_eq!(turned, shape);
        }
    }

    #[test]
    fn spawn_is_centered() {
        assert_eq!(Piece::spawn(Tetromino::I, 10).origin, Pos::new(3, 0));
        assert_eq!(Piece::spawn(Tetromino::O, 10).origin, Pos::new(4, 0));
        assert_eq!(Piece::spawn(Tetromino::T, 10).origin, Pos::new(3, 0));
    }
}
