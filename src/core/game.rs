/// Core game interface for the arcade
use std::ops::Add;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::config::ArcadeConfig;
use crate::core::renderer::Scene;

/// Integer cell coordinates on a game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Self::Output {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Keys the arcade reacts to. Everything else is dropped at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Esc,
    Char(char),
}

impl Key {
    /// Translate a crossterm key event, ignoring releases and repeats
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        match event.code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Esc),
            KeyCode::Char(' ') => Some(Key::Space),
            KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
            _ => None,
        }
    }
}

/// Random source handed to each game session.
///
/// Seeded sessions are reproducible; unseeded ones pull from OS entropy.
#[derive(Debug, Clone)]
pub struct GameRng(StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    pub fn below(&mut self, bound: usize) -> usize {
        self.0.random_range(0..bound)
    }
}

/// Main game trait that every arcade game implements.
///
/// The engine owns one boxed game at a time and drives it uniformly: ticks
/// on `tick_rate`, forwards keys that are not engine-level commands, and asks
/// for a fresh scene after every state change.
pub trait Game: Send {
    /// Advance the simulation by one step
    fn tick(&mut self);

    /// Apply a key press. Invalid moves are ignored.
    fn handle_key(&mut self, key: Key);

    /// Push this frame's draw commands onto the logical surface
    fn render(&self, scene: &mut Scene);

    /// Interval between two ticks. May change over a session.
    fn tick_rate(&self) -> Duration;

    fn is_over(&self) -> bool;

    fn score(&self) -> u32;

    /// JSON dump of the full game state, logged when a session ends
    fn snapshot(&self) -> serde_json::Result<String>;
}

/// Builds a fresh session of a game; the registry calls this on selection
/// and on reset.
pub trait Launch: Game + Sized + 'static {
    fn launch(config: &ArcadeConfig, rng: GameRng) -> Self;
}
