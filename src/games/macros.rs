/// Macro to register games in the registry with automatic initializer generation
///
/// Usage in games/mod.rs:
/// ```ignore
/// register_games! {
///     snake => {
///         game: SnakeGame,
///         id: "snake",
///         name: "Snake",
///         description: "Eat, grow, don't bite yourself",
///         controls: "[Arrows] Steer"
///     },
/// }
/// ```
#[macro_export]
macro_rules! register_games {
    (
        $(
            $module:ident => {
                game: $game:ident,
                id: $id:expr,
                name: $name:expr,
                description: $desc:expr,
                controls: $controls:expr
            }
        ),* $(,)?
    ) => {
        /// Get all available games with their metadata and initializers
        pub fn get_all_games() -> Vec<GameRegistry> {
            vec![
                $(
                    GameRegistry {
                        info: GameInfo {
                            id: $id,
                            name: $name,
                            description: $desc,
                            controls: $controls,
                        },
                        initializer: |config, rng| {
                            use $crate::core::game::Launch;
                            use $crate::games::$module::$game;

                            Box::new($game::launch(config, rng))
                        },
                    }
                ),*
            ]
        }

        /// Get a game by ID
        pub fn get_game(id: &str) -> Option<GameRegistry> {
            get_all_games().into_iter().find(|g| g.info.id == id)
        }
    };
}
