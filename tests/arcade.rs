use std::time::Duration;

use arcade::core::config::ArcadeConfig;
use arcade::core::engine::Mode;
use arcade::core::renderer::Scene;
use arcade::{Arcade, Control, Key};

fn seeded() -> Arcade {
    Arcade::new(ArcadeConfig { seed: Some(11), ..Default::default() })
}

#[test]
fn starts_in_menu_and_selects_games() {
    let mut arcade = seeded();
    assert!(matches!(arcade.mode(), Mode::Menu));
    assert_eq!(arcade.tick_rate(), None);

    arcade.handle_key(Key::Down);
    arcade.handle_key(Key::Enter);
    assert_eq!(arcade.active_game(), Some("pong"));
    assert_eq!(arcade.tick_rate(), Some(Duration::from_millis(16)));
}

#[test]
fn escape_returns_to_menu_and_discards_session() {
    let mut arcade = seeded();
    arcade.launch("snake").unwrap();
    arcade.tick();
    arcade.handle_key(Key::Esc);
    assert!(matches!(arcade.mode(), Mode::Menu));

    // a new selection starts from scratch
    arcade.handle_key(Key::Enter);
    assert_eq!(arcade.active_game(), Some("snake"));
    assert_eq!(arcade.session().unwrap().game().score(), 0);
}

#[test]
fn quit_from_menu_and_from_game() {
    let mut arcade = seeded();
    assert_eq!(arcade.handle_key(Key::Char('q')), Control::Quit);

    arcade.launch("tetris").unwrap();
    assert_eq!(arcade.handle_key(Key::Left), Control::Continue);
    assert_eq!(arcade.handle_key(Key::Char('q')), Control::Quit);
}

#[test]
fn reset_keeps_mode_and_clears_game_over() {
    let mut arcade = seeded();
    arcade.launch("snake").unwrap();
    // drive the snake into the right wall
    for _ in 0..30 {
        arcade.tick();
    }
    assert!(arcade.session().unwrap().game().is_over());
    assert_eq!(arcade.tick_rate(), None);

    let before = arcade.sessions_started();
    arcade.handle_key(Key::Char('r'));
    assert_eq!(arcade.active_game(), Some("snake"));
    assert!(!arcade.session().unwrap().game().is_over());
    assert_eq!(arcade.sessions_started(), before + 1);
    assert_eq!(arcade.tick_rate(), Some(Duration::from_millis(150)));
}

#[test]
fn pause_stops_ticks_and_input() {
    let mut arcade = seeded();
    arcade.launch("tetris").unwrap();
    arcade.handle_key(Key::Char('p'));
    assert!(arcade.session().unwrap().paused);
    assert_eq!(arcade.tick_rate(), None);

    let mut before = Scene::new();
    arcade.render(&mut before);
    arcade.tick();
    arcade.handle_key(Key::Left);
    let mut after = Scene::new();
    arcade.render(&mut after);
    assert_eq!(before.commands(), after.commands());
    assert!(after.texts().any(|t| t == "PAUSED"));

    arcade.handle_key(Key::Char('p'));
    assert_eq!(arcade.tick_rate(), Some(Duration::from_millis(500)));
}

#[test]
fn unknown_game_is_rejected() {
    let mut arcade = seeded();
    let err = arcade.launch("breakout").unwrap_err();
    assert!(err.to_string().contains("snake, pong, tetris"));
    assert!(matches!(arcade.mode(), Mode::Menu));
}

#[test]
fn menu_render_and_hints_follow_mode() {
    let mut arcade = seeded();
    let mut scene = Scene::new();
    arcade.render(&mut scene);
    assert!(scene.texts().any(|t| t == "RETRO ARCADE"));
    assert_eq!(arcade.title(), "Arcade");

    arcade.launch("pong").unwrap();
    arcade.render(&mut scene);
    assert!(!scene.texts().any(|t| t == "RETRO ARCADE"));
    assert_eq!(arcade.title(), "Pong");
    assert!(arcade.hints().contains("[W/S]"));
}

#[test]
fn seeded_sessions_replay_identically() {
    let play = || {
        let mut arcade = seeded();
        arcade.launch("tetris").unwrap();
        for _ in 0..60 {
            arcade.tick();
        }
        let mut scene = Scene::new();
        arcade.render(&mut scene);
        scene
    };
    assert_eq!(play().commands(), play().commands());
}

#[test]
fn timer_key_follows_session_and_pause() {
    let mut arcade = seeded();
    assert_eq!(arcade.timer_key(), None);

    arcade.launch("snake").unwrap();
    let first = arcade.timer_key().unwrap();
    assert_eq!(first.1, Duration::from_millis(150));
    for _ in 0..3 {
        arcade.tick();
        assert_eq!(arcade.timer_key(), Some(first));
    }

    arcade.handle_key(Key::Char('r'));
    let reset = arcade.timer_key().unwrap();
    assert_ne!(reset, first);
    assert_eq!(reset.1, first.1);

    arcade.handle_key(Key::Char('p'));
    assert_eq!(arcade.timer_key(), None);
    arcade.handle_key(Key::Char('p'));
    assert_eq!(arcade.timer_key(), Some(reset));

    arcade.handle_key(Key::Esc);
    assert_eq!(arcade.timer_key(), None);
    arcade.launch("tetris").unwrap();
    let tetris = arcade.timer_key().unwrap();
    assert_ne!(tetris.0, reset.0);
    assert_eq!(tetris.1, Duration::from_millis(500));
}
