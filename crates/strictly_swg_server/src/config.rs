//! Server and game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::Path;
use strictly_swg::{DEFAULT_MAX_ROUNDS, FinalMessages, MoveSource, RandomMoves};
use tracing::{debug, info, instrument};

/// Session cap used when none is configured.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Per-game settings applied to every new session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rounds per game.
    max_rounds: NonZeroU32,

    /// Seed for the computer's moves. Unset means seeded from the OS.
    seed: Option<u64>,

    /// Result text shown to players.
    messages: FinalMessages,

    /// Most sessions the server holds at once, the default session included.
    max_sessions: usize,
}

impl GameConfig {
    /// Overrides the round ceiling.
    pub fn with_max_rounds(mut self, max_rounds: NonZeroU32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Overrides the session cap.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions;
        self
    }

    /// Overrides the opponent seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the random opponent for the `n`th game (counting from zero).
    ///
    /// With a seed, game `n` is seeded with `seed + n`; without one, every
    /// opponent is seeded from the OS.
    #[instrument(skip(self))]
    pub fn opponent(&self, n: u64) -> Box<dyn MoveSource> {
        match self.seed {
            Some(seed) => Box::new(RandomMoves::seeded(seed.wrapping_add(n))),
            None => Box::new(RandomMoves::new()),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            seed: None,
            messages: FinalMessages::default(),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

#[instrument]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[instrument]
fn default_port() -> u16 {
    5000
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// Game settings (`[game]` table).
    #[serde(default)]
    game: GameConfig,
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            host = %config.host,
            port = config.port,
            max_rounds = config.game.max_rounds.get(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Overrides the bind host.
    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Replaces the game settings.
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            game: GameConfig::default(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
