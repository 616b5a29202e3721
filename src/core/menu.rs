use crate::core::game::Key;
use crate::core::renderer::{Scene, TerminalColor};
use crate::games::GameInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuResult {
    Stay,
    Launch(&'static str), // game id
    Quit,
}

#[derive(Debug, Default)]
pub struct MainMenu {
    pub selected_game_index: usize,
}

impl MainMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: Key, games: &[GameInfo]) -> MenuResult {
        match key {
            Key::Up => {
                self.selected_game_index = self.selected_game_index.saturating_sub(1);
                MenuResult::Stay
            }
            Key::Down => {
                self.selected_game_index =
                    (self.selected_game_index + 1).min(games.len().saturating_sub(1));
                MenuResult::Stay
            }
            Key::Enter | Key::Space => match games.get(self.selected_game_index) {
                Some(game) => MenuResult::Launch(game.id),
                None => MenuResult::Stay,
            },
            Key::Esc | Key::Char('q') => MenuResult::Quit,
            _ => MenuResult::Stay,
        }
    }

    pub fn render(&self, scene: &mut Scene, games: &[GameInfo]) {
        scene.text(150.0, 30.0, "RETRO ARCADE", TerminalColor::Cyan);

        for (i, game) in games.iter().enumerate() {
            let y = 80.0 + i as f64 * 40.0;
            let (marker, color) = if i == self.selected_game_index {
                ("»", TerminalColor::Yellow)
            } else {
                (" ", TerminalColor::White)
            };
            scene.text(60.0, y, format!("{marker} {}", game.name), color);
            scene.text(80.0, y + 15.0, game.description, TerminalColor::Gray);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games() -> Vec<GameInfo> {
        crate::games::get_all_games().into_iter().map(|g| g.info).collect()
    }

    #[test]
    fn cursor_stays_within_list() {
        let games = games();
        let mut menu = MainMenu::new();
        assert_eq!(menu.handle_key(Key::Up, &games), MenuResult::Stay);
        assert_eq!(menu.selected_game_index, 0);
        for _ in 0..10 {
            menu.handle_key(Key::Down, &games);
        }
        assert_eq!(menu.selected_game_index, games.len() - 1);
    }

    #[test]
    fn enter_launches_selected_game() {
        let games = games();
        let mut menu = MainMenu::new();
        menu.handle_key(Key::Down, &games);
        assert_eq!(menu.handle_key(Key::Enter, &games), MenuResult::Launch(games[1].id));
    }

    #[test]
    fn escape_quits() {
        let mut menu = MainMenu::new();
        assert_eq!(menu.handle_key(Key::Esc, &games()), MenuResult::Quit);
        assert_eq!(menu.handle_key(Key::Char('q'), &games()), MenuResult::Quit);
    }

    #[test]
    fn render_lists_every_game() {
        let games = games();
        let mut scene = Scene::new();
        MainMenu::new().render(&mut scene, &games);
        for game in &games {
            assert!(scene.texts().any(|t| t.ends_with(game.name)));
        }
    }
}
