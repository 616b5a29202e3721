use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::core::config::ArcadeConfig;
use crate::core::engine::{Arcade, ArcadeEngine};
use crate::core::terminal::TerminalRenderer;
use crate::games::get_all_games;

#[derive(Parser, Debug)]
#[command(name = "arcade")]
#[command(about = "🕹️ Snake, Pong and Tetris in your terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Skip the menu and start this game
    #[arg(short, long)]
    pub game: Option<String>,

    /// List available games and exit
    #[arg(long)]
    pub list: bool,

    /// JSON config file; flags below override its values
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for food placement and piece order
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Available levels: trace, debug, info, warn, error
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the arcade (default)
    Play {
        /// Skip the menu and start this game
        #[arg(short, long)]
        game: Option<String>,
    },
    /// List available games
    List,
}

impl Cli {
    /// Load the config file, if any, and layer the flags on top
    pub fn resolve_config(&self) -> Result<ArcadeConfig> {
        let mut config = match &self.config {
            Some(path) => ArcadeConfig::load(path)?,
            None => ArcadeConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(game) = self.start_game() {
            config.start_game = Some(game.to_string());
        }
        Ok(config)
    }

    /// `--game` given at the top level or to `play`
    fn start_game(&self) -> Option<&str> {
        match &self.command {
            Some(Commands::Play { game: Some(game) }) => Some(game.as_str()),
            _ => self.game.as_deref(),
        }
    }

    fn wants_list(&self) -> bool {
        self.list || matches!(self.command, Some(Commands::List))
    }
}

fn init_logging(config: &ArcadeConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.tracing_level())
        .init();
    Ok(())
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    if cli.wants_list() {
        println!("🎮 Available games:");
        println!();
        for entry in get_all_games() {
            println!("📦 {} ({})", entry.info.name, entry.info.id);
            println!("   {}", entry.info.description);
            println!("   {}", entry.info.controls);
            println!();
        }
        return Ok(());
    }

    let config = cli.resolve_config()?;
    init_logging(&config)?;
    info!(?config, "arcade starting");

    let mut arcade = Arcade::new(config.clone());
    if let Some(id) = &config.start_game {
        arcade.launch(id)?;
    }

    // Restores the terminal on drop, including on error paths
    let renderer = TerminalRenderer::new();
    ArcadeEngine::new(arcade, renderer).run().await
}
