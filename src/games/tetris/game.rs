use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::ArcadeConfig;
use crate::core::game::{Game, GameRng, Key, Launch, Pos};
use crate::core::renderer::{Scene, TerminalColor};
use crate::games::tetris::pieces::{Piece, Tetromino};

pub const COLS: usize = 10;
pub const ROWS: usize = 20;
pub const CELL_SIZE: f64 = 15.0;
pub const LINE_POINTS: u32 = 100;

const BOARD_X: f64 = 20.0;
const PANEL_X: f64 = 210.0;

/// Settled cells; `Some` remembers which piece filled the cell
pub type Board = [[Option<Tetromino>; COLS]; ROWS];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TetrisState {
    pub board: Board,
    pub current: Piece,
    pub next: Tetromino,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
}

impl TetrisState {
    pub fn new(rng: &mut GameRng) -> Self {
        Self {
            board: [[None; COLS]; ROWS],
            current: Piece::spawn(Tetromino::random(rng), COLS as i32),
            next: Tetromino::random(rng),
            score: 0,
            lines: 0,
            level: 1,
            game_over: false,
        }
    }

    /// Every cell in bounds and not on a settled cell
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece.cells().all(|Pos { x, y }| {
            (0..COLS as i32).contains(&x)
                && (0..ROWS as i32).contains(&y)
                && self.board[y as usize][x as usize].is_none()
        })
    }

    /// Replace the falling piece if the candidate fits. Returns whether it did.
    fn try_place(&mut self, candidate: Piece) -> bool {
        if self.is_valid(&candidate) {
            self.current = candidate;
            true
        } else {
            false
        }
    }

    pub fn shift(&mut self, dx: i32) -> bool {
        let candidate = self.current.shifted(Pos::new(dx, 0));
        self.try_place(candidate)
    }

    pub fn soft_drop(&mut self) -> bool {
        let candidate = self.current.shifted(Pos::new(0, 1));
        self.try_place(candidate)
    }

    pub fn rotate(&mut self) -> bool {
        let candidate = self.current.rotated();
        self.try_place(candidate)
    }

    pub fn tick_interval(&self) -> Duration {
        let ms = 500u64.saturating_sub((self.level.max(1) as u64 - 1) * 50).max(100);
        Duration::from_millis(ms)
    }

    fn lock_piece(&mut self) {
        for Pos { x, y } in self.current.cells() {
            if (0..COLS as i32).contains(&x) && (0..ROWS as i32).contains(&y) {
                self.board[y as usize][x as usize] = Some(self.current.kind);
            }
        }
    }

    /// Drop full rows, shifting the rest down. Returns how many were removed.
    fn clear_lines(&mut self) -> u32 {
        let mut packed: Board = [[None; COLS]; ROWS];
        let mut write = ROWS;
        for row in self.board.iter().rev() {
            if row.iter().all(Option::is_some) {
                continue;
            }
            write -= 1;
            packed[write] = *row;
        }
        self.board = packed;
        write as u32
    }

    pub fn step(&mut self, rng: &mut GameRng) {
        if self.game_over || self.soft_drop() {
            return;
        }

        self.lock_piece();
        let cleared = self.clear_lines();
        if cleared > 0 {
            self.score += cleared * LINE_POINTS * self.level;
            self.lines += cleared;
            let level = self.lines / 10 + 1;
            debug!(cleared, lines = self.lines, score = self.score, "lines cleared");
            if level != self.level {
                info!(level, "level up");
                self.level = level;
            }
        }

        self.current = Piece::spawn(self.next, COLS as i32);
        self.next = Tetromino::random(rng);
        if !self.is_valid(&self.current) {
            self.game_over = true;
            info!(score = self.score, lines = self.lines, level = self.level, "tetris board topped out");
        }
    }
}

pub struct TetrisGame {
    state: TetrisState,
    rng: GameRng,
}

impl TetrisGame {
    pub fn new(mut rng: GameRng) -> Self {
        Self { state: TetrisState::new(&mut rng), rng }
    }

    pub fn from_state(state: TetrisState, rng: GameRng) -> Self {
        Self { state, rng }
    }

    pub fn state(&self) -> &TetrisState {
        &self.state
    }
}

impl Launch for TetrisGame {
    fn launch(_config: &ArcadeConfig, rng: GameRng) -> Self {
        Self::new(rng)
    }
}

fn cell(scene: &mut Scene, x: f64, y: f64, color: TerminalColor) {
    scene.fill_rect(x, y, CELL_SIZE - 1.0, CELL_SIZE - 1.0, color);
}

impl Game for TetrisGame {
    fn tick(&mut self) {
        self.state.step(&mut self.rng);
    }

    fn handle_key(&mut self, key: Key) {
        if self.state.game_over {
            return;
        }
        match key {
            Key::Left => {
                self.state.shift(-1);
            }
            Key::Right => {
                self.state.shift(1);
            }
            Key::Down => {
                self.state.soft_drop();
            }
            Key::Up | Key::Space => {
                self.state.rotate();
            }
            _ => {}
        }
    }

    fn render(&self, scene: &mut Scene) {
        let s = &self.state;

        for (y, row) in s.board.iter().enumerate() {
            for (x, settled) in row.iter().enumerate() {
                let color = settled.map_or(TerminalColor::DarkGray, Tetromino::color);
                cell(scene, BOARD_X + x as f64 * CELL_SIZE, y as f64 * CELL_SIZE, color);
            }
        }
        if !s.game_over {
            for Pos { x, y } in s.current.cells() {
                cell(scene, BOARD_X + x as f64 * CELL_SIZE, y as f64 * CELL_SIZE, s.current.kind.color());
            }
        }

        scene.text(PANEL_X, 10.0, "Next", TerminalColor::White);
        let preview = Piece { origin: Pos::new(0, 0), ..Piece::spawn(s.next, COLS as i32) };
        for Pos { x, y } in preview.cells() {
            cell(scene, PANEL_X + x as f64 * CELL_SIZE, 30.0 + y as f64 * CELL_SIZE, s.next.color());
        }

        scene.text(PANEL_X, 100.0, format!("Score: {}", s.score), TerminalColor::White);
        scene.text(PANEL_X, 120.0, format!("Lines: {}", s.lines), TerminalColor::White);
        scene.text(PANEL_X, 140.0, format!("Level: {}", s.level), TerminalColor::White);

        if s.game_over {
            scene.game_over_overlay(s.score);
        }
    }

    fn tick_rate(&self) -> Duration {
        self.state.tick_interval()
    }

    fn is_over(&self) -> bool {
        self.state.game_over
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    fn snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.state)
    }
}
