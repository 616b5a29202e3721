pub mod macros;
pub mod pong;
pub mod snake;
pub mod tetris;

use crate::core::config::ArcadeConfig;
use crate::core::game::{Game, GameRng};
use crate::register_games;

/// Metadata about a game
#[derive(Clone, Debug)]
pub struct GameInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub controls: &'static str,
}

/// Game initializer function - creates a fresh session
pub type GameInitializer = fn(&ArcadeConfig, GameRng) -> Box<dyn Game>;

/// Registry entry containing metadata and initializer
pub struct GameRegistry {
    pub info: GameInfo,
    pub initializer: GameInitializer,
}

// Register all games here - developers only need to add a new entry
register_games! {
    snake => {
        game: SnakeGame,
        id: "snake",
        name: "Snake",
        description: "Eat the food, grow longer, avoid walls and yourself",
        controls: "[Arrows] Steer"
    },
    pong => {
        game: PongGame,
        id: "pong",
        name: "Pong",
        description: "Classic two-player Pong on one keyboard",
        controls: "[W/S] Left paddle  [Up/Down] Right paddle"
    },
    tetris => {
        game: TetrisGame,
        id: "tetris",
        name: "Tetris",
        description: "Stack falling pieces and clear full rows",
        controls: "[Left/Right] Move  [Down] Drop  [Up/Space] Rotate"
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_the_three_games() {
        let ids: Vec<_> = get_all_games().iter().map(|g| g.info.id).collect();
        assert_eq!(ids, vec!["snake", "pong", "tetris"]);
    }

    #[test]
    fn initializers_build_fresh_sessions() {
        let config = ArcadeConfig::default();
        for entry in get_all_games() {
            let game = (entry.initializer)(&config, GameRng::seeded(1));
            assert!(!game.is_over(), "{}", entry.info.id);
            assert_eq!(game.score(), 0);
        }
    }

    #[test]
    fn unknown_id_is_not_found() {
        assert!(get_game("breakout").is_none());
        assert_eq!(get_game("tetris").map(|g| g.info.name), Some("Tetris"));
    }
}
