//! Strictly Snake-Water-Gun server
//!
//! Serves round-bounded Snake-Water-Gun games over a JSON REST API and in
//! the terminal.
//!
//! # Architecture
//!
//! - **Registry**: [`SessionManager`] owns every running game
//! - **API**: [`router`] exposes the registry over HTTP (axum)
//! - **Config**: [`ServerConfig`] and [`GameConfig`], loaded from TOML
//! - **Play**: [`play::run`] drives one game from a line-based terminal
//!
//! # Example
//!
//! ```no_run
//! use strictly_swg_server::{GameConfig, SessionManager, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let sessions = SessionManager::with_random_moves(GameConfig::default());
//! let app = router(sessions);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
pub mod cli;
mod config;
mod error;
pub mod play;
mod registry;

pub use api::{
    CreateSessionRequest, MoveInput, MoveRequest, MoveResponse, SessionList, StateResponse, router,
};
pub use config::{ConfigError, DEFAULT_MAX_SESSIONS, GameConfig, ServerConfig};
pub use error::{ApiError, ErrorBody};
pub use registry::{
    DEFAULT_SESSION, GameSession, OpponentFactory, SessionId, SessionManager, SessionSnapshot,
};
