//! Error types for the game engine.

use derive_more::{Display, Error};

/// Rejection raised by the session engine or at the move-parsing boundary.
///
/// Every rejection leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// A move was submitted after the final round.
    #[display("Game over after {} rounds; reset to play again", max_rounds)]
    SessionTerminated {
        /// Round ceiling of the finished game.
        max_rounds: u32,
    },

    /// The submitted tag is not one of the three moves.
    #[display("Invalid move: {:?}", _0)]
    InvalidMove(#[error(not(source))] String),
}

/// A scripted move source was built from an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Scripted move source needs at least one move")]
pub struct ScriptError;
