use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::config::ArcadeConfig;
use crate::core::game::{Game, GameRng, Key, Launch};
use crate::core::renderer::{Scene, TerminalColor, SURFACE_HEIGHT, SURFACE_WIDTH};

pub const WIDTH: f32 = SURFACE_WIDTH as f32;
pub const HEIGHT: f32 = SURFACE_HEIGHT as f32;
pub const PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_HEIGHT: f32 = 60.0;
pub const PADDLE_STEP: f32 = 20.0;
pub const BALL_SIZE: f32 = 10.0;
pub const BALL_SPEED: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PongAction {
    Player1MoveUp,
    Player1MoveDown,
    Player2MoveUp,
    Player2MoveDown,
}

impl PongAction {
    /// `w`/`s` drive the left paddle, the arrow keys the right one
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char('w') => Some(PongAction::Player1MoveUp),
            Key::Char('s') => Some(PongAction::Player1MoveDown),
            Key::Up => Some(PongAction::Player2MoveUp),
            Key::Down => Some(PongAction::Player2MoveDown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PongState {
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_dx: f32,
    pub ball_dy: f32,
    pub paddle1_y: f32, // left
    pub paddle2_y: f32, // right
    pub score1: u32,
    pub score2: u32,
}

impl Default for PongState {
    fn default() -> Self {
        Self {
            ball_x: (WIDTH - BALL_SIZE) / 2.0,
            ball_y: (HEIGHT - BALL_SIZE) / 2.0,
            ball_dx: BALL_SPEED,
            ball_dy: BALL_SPEED,
            paddle1_y: (HEIGHT - PADDLE_HEIGHT) / 2.0,
            paddle2_y: (HEIGHT - PADDLE_HEIGHT) / 2.0,
            score1: 0,
            score2: 0,
        }
    }
}

impl PongState {
    pub fn apply(&mut self, action: PongAction) {
        let max_y = HEIGHT - PADDLE_HEIGHT;
        match action {
            PongAction::Player1MoveUp => self.paddle1_y = (self.paddle1_y - PADDLE_STEP).max(0.0),
            PongAction::Player1MoveDown => self.paddle1_y = (self.paddle1_y + PADDLE_STEP).min(max_y),
            PongAction::Player2MoveUp => self.paddle2_y = (self.paddle2_y - PADDLE_STEP).max(0.0),
            PongAction::Player2MoveDown => self.paddle2_y = (self.paddle2_y + PADDLE_STEP).min(max_y),
        }
    }

    fn overlaps_paddle(&self, paddle_y: f32) -> bool {
        self.ball_y + BALL_SIZE >= paddle_y && self.ball_y <= paddle_y + PADDLE_HEIGHT
    }

    /// Center the ball and serve it toward the player who just conceded
    fn serve(&mut self, toward_left: bool) {
        self.ball_x = (WIDTH - BALL_SIZE) / 2.0;
        self.ball_y = (HEIGHT - BALL_SIZE) / 2.0;
        self.ball_dx = if toward_left { -BALL_SPEED } else { BALL_SPEED };
    }

    pub fn step(&mut self) {
        self.ball_x += self.ball_dx;
        self.ball_y += self.ball_dy;

        // Bounce off top/bottom
        if self.ball_y <= 0.0 {
            self.ball_y = 0.0;
            self.ball_dy = self.ball_dy.abs();
        } else if self.ball_y >= HEIGHT - BALL_SIZE {
            self.ball_y = HEIGHT - BALL_SIZE;
            self.ball_dy = -self.ball_dy.abs();
        }

        // Left paddle
        if self.ball_x <= PADDLE_WIDTH
            && self.ball_x + BALL_SIZE > 0.0
            && self.overlaps_paddle(self.paddle1_y)
        {
            self.ball_dx = self.ball_dx.abs();
        }

        // Right paddle
        if self.ball_x + BALL_SIZE >= WIDTH - PADDLE_WIDTH
            && self.ball_x < WIDTH
            && self.overlaps_paddle(self.paddle2_y)
        {
            self.ball_dx = -self.ball_dx.abs();
        }

        if self.ball_x + BALL_SIZE < 0.0 {
            self.score2 += 1;
            info!(left = self.score1, right = self.score2, "right player scored");
            self.serve(true);
        } else if self.ball_x > WIDTH {
            self.score1 += 1;
            info!(left = self.score1, right = self.score2, "left player scored");
            self.serve(false);
        }
    }
}

pub struct PongGame {
    state: PongState,
    tick_rate: Duration,
}

impl PongGame {
    pub fn new(tick_rate: Duration) -> Self {
        Self { state: PongState::default(), tick_rate }
    }

    pub fn from_state(state: PongState, tick_rate: Duration) -> Self {
        Self { state, tick_rate }
    }

    pub fn state(&self) -> &PongState {
        &self.state
    }
}

impl Launch for PongGame {
    fn launch(config: &ArcadeConfig, _rng: GameRng) -> Self {
        Self::new(config.pong_tick())
    }
}

impl Game for PongGame {
    fn tick(&mut self) {
        self.state.step();
    }

    fn handle_key(&mut self, key: Key) {
        if let Some(action) = PongAction::from_key(key) {
            self.state.apply(action);
        }
    }

    fn render(&self, scene: &mut Scene) {
        let s = &self.state;

        let mut y = 0.0;
        while y < SURFACE_HEIGHT {
            let x = SURFACE_WIDTH / 2.0;
            scene.line(x, y, x, y + 10.0, TerminalColor::DarkGray);
            y += 20.0;
        }

        scene.fill_rect(0.0, s.paddle1_y as f64, PADDLE_WIDTH as f64, PADDLE_HEIGHT as f64, TerminalColor::White);
        scene.fill_rect(
            (WIDTH - PADDLE_WIDTH) as f64,
            s.paddle2_y as f64,
            PADDLE_WIDTH as f64,
            PADDLE_HEIGHT as f64,
            TerminalColor::White,
        );
        scene.fill_rect(s.ball_x as f64, s.ball_y as f64, BALL_SIZE as f64, BALL_SIZE as f64, TerminalColor::Yellow);

        scene.text(SURFACE_WIDTH / 4.0, 10.0, s.score1.to_string(), TerminalColor::White);
        scene.text(SURFACE_WIDTH * 3.0 / 4.0, 10.0, s.score2.to_string(), TerminalColor::White);
    }

    fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    // endless match
    fn is_over(&self) -> bool {
        false
    }

    fn score(&self) -> u32 {
        self.state.score1 + self.state.score2
    }

    fn snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flying(x: f32, y: f32, dx: f32, dy: f32) -> PongState {
        PongState { ball_x: x, ball_y: y, ball_dx: dx, ball_dy: dy, ..Default::default() }
    }

    #[test]
    fn reflects_off_top_wall() {
        let mut state = flying(200.0, 4.0, 4.0, -4.0);
        state.step();
        assert_eq!(state.ball_y, 0.0);
        assert!(state.ball_dy > 0.0);
        assert_eq!(state.ball_dx, 4.0);
    }

    #[test]
    fn reflects_off_bottom_wall() {
        let mut state = flying(200.0, HEIGHT - BALL_SIZE - 4.0, -4.0, 4.0);
        state.step();
        assert_eq!(state.ball_y, HEIGHT - BALL_SIZE);
        assert!(state.ball_dy < 0.0);
        assert_eq!(state.ball_dx, -4.0);
    }

    #[test]
    fn left_paddle_returns_ball() {
        let mut state = flying(12.0, 130.0, -4.0, 0.0);
        state.paddle1_y = 120.0;
        state.step();
        assert_eq!(state.ball_dx, 4.0);
        assert_eq!(state.score2, 0);
    }

    #[test]
    fn right_paddle_returns_ball() {
        let mut state = flying(WIDTH - PADDLE_WIDTH - BALL_SIZE - 2.0, 50.0, 4.0, 0.0);
        state.paddle2_y = 20.0;
        state.step();
        assert_eq!(state.ball_dx, -4.0);
    }

    #[test]
    fn missed_ball_scores_for_opponent_and_recenters() {
        let mut state = flying(-8.0, 10.0, -4.0, 4.0);
        state.paddle1_y = 200.0;
        state.step();
        assert_eq!(state.score2, 1);
        assert_eq!(state.score1, 0);
        assert_eq!(state.ball_x, (WIDTH - BALL_SIZE) / 2.0);
        assert_eq!(state.ball_y, (HEIGHT - BALL_SIZE) / 2.0);
        assert!(state.ball_dx < 0.0);

        let mut state = flying(WIDTH - 2.0, 10.0, 4.0, 4.0);
        state.paddle2_y = 200.0;
        state.step();
        assert_eq!(state.score1, 1);
        assert!(state.ball_dx > 0.0);
    }

    #[test]
    fn paddles_move_independently_and_clamp() {
        let mut game = PongGame::new(Duration::from_millis(16));
        for _ in 0..20 {
            game.handle_key(Key::Char('w'));
        }
        assert_eq!(game.state().paddle1_y, 0.0);
        assert_eq!(game.state().paddle2_y, (HEIGHT - PADDLE_HEIGHT) / 2.0);

        for _ in 0..20 {
            game.handle_key(Key::Down);
        }
        assert_eq!(game.state().paddle2_y, HEIGHT - PADDLE_HEIGHT);
        assert_eq!(game.state().paddle1_y, 0.0);
    }

    #[test]
    fn renders_scores_and_center_line() {
        let mut game = PongGame::new(Duration::from_millis(16));
        game.state.score1 = 3;
        game.state.score2 = 5;
        let mut scene = Scene::new();
        game.render(&mut scene);
        let texts: Vec<_> = scene.texts().collect();
        assert_eq!(texts, vec!["3", "5"]);
        assert_eq!(scene.rect_count(TerminalColor::White), 2);
        assert_eq!(scene.rect_count(TerminalColor::Yellow), 1);
    }

    #[test]
    fn snapshot_restores_mid_rally() {
        let mut game = PongGame::new(Duration::from_millis(16));
        game.state.score2 = 4;
        game.tick();
        game.handle_key(Key::Up);

        let json = game.snapshot().unwrap();
        let restored = PongGame::from_state(serde_json::from_str(&json).unwrap(), game.tick_rate());
        assert_eq!(restored.state(), game.state());
        assert_eq!(restored.score(), 4);
    }
}
