use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::game::GameRng;

/// Arcade settings. Every field has a default so a config file may be
/// partial or absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArcadeConfig {
    pub seed: Option<u64>,
    pub snake_tick_ms: u64,
    pub pong_tick_ms: u64,
    pub start_game: Option<String>,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            snake_tick_ms: 150,
            pong_tick_ms: 16,
            start_game: None,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl ArcadeConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid arcade config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn snake_tick(&self) -> Duration {
        Duration::from_millis(self.snake_tick_ms.max(1))
    }

    pub fn pong_tick(&self) -> Duration {
        Duration::from_millis(self.pong_tick_ms.max(1))
    }

    /// Fresh random source for one game session. With a seed, the n-th
    /// session of a run always gets the same stream.
    pub fn session_rng(&self, session: u64) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::seeded(seed.wrapping_add(session)),
            None => GameRng::from_entropy(),
        }
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
