use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::core::config::ArcadeConfig;
use crate::core::game::{Game, Key};
use crate::core::menu::{MainMenu, MenuResult};
use crate::core::renderer::Scene;
use crate::core::terminal::{FrameView, TerminalRenderer};
use crate::games::{self, GameInfo, GameRegistry};

const MENU_HINTS: &str = "[↑/↓] Navigate  [Enter] Play  [Q/Esc] Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// One running game, created on selection and dropped on leaving
pub struct Session {
    pub info: GameInfo,
    game: Box<dyn Game>,
    pub paused: bool,
}

impl Session {
    pub fn game(&self) -> &dyn Game {
        self.game.as_ref()
    }
}

pub enum Mode {
    Menu,
    Playing(Session),
}

/// Mode machine of the arcade: menu or exactly one game session.
///
/// Holds no terminal or timer so it can be driven directly in tests; the
/// `ArcadeEngine` loop feeds it ticks and keys.
pub struct Arcade {
    config: ArcadeConfig,
    registry: Vec<GameRegistry>,
    games: Vec<GameInfo>,
    menu: MainMenu,
    mode: Mode,
    sessions_started: u64,
}

impl Arcade {
    pub fn new(config: ArcadeConfig) -> Self {
        let registry = games::get_all_games();
        let games = registry.iter().map(|g| g.info.clone()).collect();
        Self {
            config,
            registry,
            games,
            menu: MainMenu::new(),
            mode: Mode::Menu,
            sessions_started: 0,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.mode {
            Mode::Playing(session) => Some(session),
            Mode::Menu => None,
        }
    }

    /// Id of the running game, `None` in the menu
    pub fn active_game(&self) -> Option<&'static str> {
        self.session().map(|s| s.info.id)
    }

    /// Bumped by every launch and reset; doubles as the timer epoch so a new
    /// session always gets a new timer.
    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }

    /// Start a fresh session of `id`, discarding whatever was running
    pub fn launch(&mut self, id: &str) -> Result<()> {
        let entry = self
            .registry
            .iter()
            .find(|g| g.info.id == id)
            .ok_or_else(|| {
                let known: Vec<_> = self.games.iter().map(|g| g.id).collect();
                anyhow!("game '{id}' not found, available: {}", known.join(", "))
            })?;

        let rng = self.config.session_rng(self.sessions_started);
        self.sessions_started += 1;
        let game = (entry.initializer)(&self.config, rng);
        info!(game = entry.info.id, session = self.sessions_started, "starting game");
        self.mode = Mode::Playing(Session { info: entry.info.clone(), game, paused: false });
        Ok(())
    }

    fn back_to_menu(&mut self) {
        if let Some(session) = self.session() {
            info!(game = session.info.id, score = session.game.score(), "back to menu");
        }
        self.mode = Mode::Menu;
    }

    pub fn handle_key(&mut self, key: Key) -> Control {
        match &mut self.mode {
            Mode::Menu => match self.menu.handle_key(key, &self.games) {
                MenuResult::Stay => {}
                MenuResult::Launch(id) => {
                    // ids come from the registry itself
                    if let Err(e) = self.launch(id) {
                        debug!(error = %e, "menu launch failed");
                    }
                }
                MenuResult::Quit => return Control::Quit,
            },
            Mode::Playing(session) => match key {
                Key::Esc => self.back_to_menu(),
                Key::Char('q') => return Control::Quit,
                Key::Char('r') => {
                    let id = session.info.id;
                    info!(game = id, "reset");
                    if let Err(e) = self.launch(id) {
                        debug!(error = %e, "reset failed");
                    }
                }
                Key::Char('p') => {
                    session.paused = !session.paused;
                    info!(game = session.info.id, paused = session.paused, "pause toggled");
                }
                _ if session.paused => {}
                _ => {
                    let was_over = session.game.is_over();
                    session.game.handle_key(key);
                    log_game_over(session, was_over);
                }
            },
        }
        Control::Continue
    }

    pub fn tick(&mut self) {
        if let Mode::Playing(session) = &mut self.mode {
            if session.paused {
                return;
            }
            let was_over = session.game.is_over();
            session.game.tick();
            log_game_over(session, was_over);
        }
    }

    /// Interval the active game wants, `None` when nothing should tick
    pub fn tick_rate(&self) -> Option<Duration> {
        self.session()
            .filter(|s| !s.paused && !s.game.is_over())
            .map(|s| s.game.tick_rate())
    }

    /// Timer the loop should have armed. A different key means the old
    /// interval is dropped and a new one started.
    pub fn timer_key(&self) -> Option<TimerKey> {
        self.tick_rate().map(|rate| (self.sessions_started, rate))
    }

    pub fn title(&self) -> &'static str {
        self.session().map_or("Arcade", |s| s.info.name)
    }

    pub fn hints(&self) -> String {
        match self.session() {
            Some(session) => format!("{}  [P] Pause  [R] Reset  [Esc] Menu  [Q] Quit", session.info.controls),
            None => MENU_HINTS.to_string(),
        }
    }

    /// Clear and redraw the full surface
    pub fn render(&self, scene: &mut Scene) {
        scene.clear();
        match &self.mode {
            Mode::Menu => self.menu.render(scene, &self.games),
            Mode::Playing(session) => {
                session.game.render(scene);
                if session.paused {
                    scene.paused_overlay();
                }
            }
        }
    }
}

fn log_game_over(session: &Session, was_over: bool) {
    if !was_over && session.game.is_over() {
        info!(game = session.info.id, score = session.game.score(), "game over");
        match session.game.snapshot() {
            Ok(state) => debug!(game = session.info.id, %state, "final state"),
            Err(e) => debug!(error = %e, "failed to snapshot game state"),
        }
    }
}

/// Identifies an armed timer: which session and at what rate
pub type TimerKey = (u64, Duration);

/// Drives an `Arcade` from a tick timer and the terminal's key events
pub struct ArcadeEngine {
    arcade: Arcade,
    renderer: TerminalRenderer,
}

impl ArcadeEngine {
    pub fn new(arcade: Arcade, renderer: TerminalRenderer) -> Self {
        Self { arcade, renderer }
    }

    /// Tear down the old timer and arm a new one whenever the session or
    /// its rate changes
    fn sync_timer(&self, timer: &mut Option<(TimerKey, Interval)>) {
        let wanted = self.arcade.timer_key();
        let current = timer.as_ref().map(|(key, _)| *key);
        if wanted == current {
            return;
        }

        *timer = wanted.map(|key @ (_, rate)| {
            debug!(?rate, "arming tick timer");
            let mut interval = tokio::time::interval_at(Instant::now() + rate, rate);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            (key, interval)
        });
    }

    pub async fn run(mut self) -> Result<()> {
        let mut events = EventStream::new();
        let mut timer: Option<(TimerKey, Interval)> = None;
        let mut scene = Scene::new();

        loop {
            self.sync_timer(&mut timer);

            self.arcade.render(&mut scene);
            let hints = self.arcade.hints();
            self.renderer.draw(FrameView { title: self.arcade.title(), scene: &scene, hints: &hints })?;

            tokio::select! {
                _ = async {
                    if let Some((_, ref mut i)) = timer { i.tick().await; }
                    else { std::future::pending::<()>().await; }
                } => {
                    self.arcade.tick();
                }

                event = events.next() => {
                    match event {
                        Some(Ok(Event::Key(key))) => {
                            if let Some(key) = Key::from_event(key) {
                                if self.arcade.handle_key(key) == Control::Quit {
                                    break;
                                }
                            }
                        }
                        // resize and friends only need a redraw
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e).context("failed to read terminal event"),
                        None => break,
                    }
                }
            }
        }

        info!("arcade closed");
        Ok(())
    }
}
