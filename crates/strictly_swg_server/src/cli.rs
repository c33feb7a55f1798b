//! Command-line interface for strictly_swg.

use crate::config::{ConfigError, ServerConfig};
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroU32;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Strictly Snake-Water-Gun - round-bounded game server
#[derive(Parser, Debug)]
#[command(name = "strictly_swg")]
#[command(about = "Snake-Water-Gun game server and terminal client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Shared game options
        #[command(flatten)]
        game: GameArgs,
    },

    /// Play a game in the terminal
    Play {
        /// Shared game options
        #[command(flatten)]
        game: GameArgs,
    },
}

/// Options shared by every command that starts games.
#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rounds per game (overrides the config file)
    #[arg(short, long)]
    pub max_rounds: Option<NonZeroU32>,

    /// Seed for the computer's moves (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GameArgs {
    /// Loads the config file, if any, and applies the command-line overrides.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<ServerConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => {
                debug!("No config file given, using defaults");
                ServerConfig::default()
            }
        };

        let mut game = config.game().clone();
        if let Some(max_rounds) = self.max_rounds {
            game = game.with_max_rounds(max_rounds);
        }
        if let Some(seed) = self.seed {
            game = game.with_seed(seed);
        }
        Ok(config.with_game(game))
    }
}
