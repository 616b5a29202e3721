use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::ArcadeConfig;
use crate::core::game::{Game, GameRng, Key, Launch, Pos};
use crate::core::renderer::{Scene, TerminalColor};

pub const CELL_SIZE: i32 = 20;
pub const COLS: i32 = 20;
pub const ROWS: i32 = 15;
pub const FOOD_POINTS: u32 = 10;

const UP: Pos = Pos::new(0, -1);
const DOWN: Pos = Pos::new(0, 1);
const LEFT: Pos = Pos::new(-1, 0);
const RIGHT: Pos = Pos::new(1, 0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeState {
    /// Head first
    pub body: VecDeque<Pos>,
    pub direction: Pos,
    /// Direction used by the last tick; the reversal rule is checked
    /// against this, not against a queued turn.
    pub last_moved: Pos,
    pub food: Pos,
    pub score: u32,
    pub game_over: bool,
}

impl SnakeState {
    pub fn new(rng: &mut GameRng) -> Self {
        let head = Pos::new(COLS / 2, ROWS / 2);
        let body = VecDeque::from(vec![head, head + LEFT, head + LEFT + LEFT]);
        let mut state = Self {
            body,
            direction: RIGHT,
            last_moved: RIGHT,
            food: head,
            score: 0,
            game_over: false,
        };
        // A fresh board always has free cells
        if let Some(food) = state.random_free_cell(rng) {
            state.food = food;
        }
        state
    }

    pub fn head(&self) -> Pos {
        self.body[0]
    }

    fn in_bounds(pos: Pos) -> bool {
        (0..COLS).contains(&pos.x) && (0..ROWS).contains(&pos.y)
    }

    fn random_free_cell(&self, rng: &mut GameRng) -> Option<Pos> {
        let free: Vec<Pos> = (0..ROWS)
            .flat_map(|y| (0..COLS).map(move |x| Pos::new(x, y)))
            .filter(|p| !self.body.contains(p))
            .collect();
        if free.is_empty() {
            None
        } else {
            Some(free[rng.below(free.len())])
        }
    }

    /// Steer, unless the new direction reverses the current axis
    pub fn steer(&mut self, direction: Pos) {
        let reverses = direction.x == -self.last_moved.x && direction.y == -self.last_moved.y;
        if !reverses {
            self.direction = direction;
        }
    }

    pub fn step(&mut self, rng: &mut GameRng) {
        if self.game_over {
            return;
        }

        let next = self.head() + self.direction;
        if !Self::in_bounds(next) || self.body.contains(&next) {
            self.game_over = true;
            info!(score = self.score, length = self.body.len(), "snake crashed");
            return;
        }

        self.body.push_front(next);
        self.last_moved = self.direction;

        if next == self.food {
            self.score += FOOD_POINTS;
            debug!(score = self.score, length = self.body.len(), "snake ate food");
            match self.random_free_cell(rng) {
                Some(food) => self.food = food,
                None => {
                    self.game_over = true;
                    info!(score = self.score, "snake filled the board");
                }
            }
        } else {
            self.body.pop_back();
        }
    }
}

pub struct SnakeGame {
    state: SnakeState,
    rng: GameRng,
    tick_rate: Duration,
}

impl SnakeGame {
    pub fn new(mut rng: GameRng, tick_rate: Duration) -> Self {
        Self { state: SnakeState::new(&mut rng), rng, tick_rate }
    }

    pub fn from_state(state: SnakeState, rng: GameRng) -> Self {
        Self { state, rng, tick_rate: Duration::from_millis(150) }
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }
}

impl Launch for SnakeGame {
    fn launch(config: &ArcadeConfig, rng: GameRng) -> Self {
        Self::new(rng, config.snake_tick())
    }
}

fn cell(scene: &mut Scene, pos: Pos, color: TerminalColor) {
    scene.fill_rect(
        (pos.x * CELL_SIZE) as f64,
        (pos.y * CELL_SIZE) as f64,
        (CELL_SIZE - 1) as f64,
        (CELL_SIZE - 1) as f64,
        color,
    );
}

impl Game for SnakeGame {
    fn tick(&mut self) {
        self.state.step(&mut self.rng);
    }

    fn handle_key(&mut self, key: Key) {
        if self.state.game_over {
            return;
        }
        match key {
            Key::Up => self.state.steer(UP),
            Key::Down => self.state.steer(DOWN),
            Key::Left => self.state.steer(LEFT),
            Key::Right => self.state.steer(RIGHT),
            _ => {}
        }
    }

    fn render(&self, scene: &mut Scene) {
        for (i, segment) in self.state.body.iter().enumerate() {
            let color = if i == 0 { TerminalColor::Yellow } else { TerminalColor::Green };
            cell(scene, *segment, color);
        }
        cell(scene, self.state.food, TerminalColor::Red);
        scene.text(5.0, 5.0, format!("Score: {}", self.state.score), TerminalColor::White);

        if self.state.game_over {
            scene.game_over_overlay(self.state.score);
        }
    }

    fn tick_rate(&self) -> Duration {
        self.tick_rate
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
