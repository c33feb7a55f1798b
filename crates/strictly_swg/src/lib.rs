//! Strictly Snake-Water-Gun - round-bounded game logic
//!
//! Snake drinks Water, Water drowns Gun, Gun shoots Snake. This crate holds
//! the server-authoritative part of the game and nothing else: no rendering,
//! no transport.
//!
//! # Architecture
//!
//! - **Rules**: [`resolve`] maps a pair of moves to an [`Outcome`]
//! - **Session**: [`Session`] counts rounds, keeps score and ends the game
//! - **Opponent**: [`MoveSource`] supplies the computer's moves
//! - **Messages**: [`FinalMessages`] holds the configurable result text
//!
//! # Example
//!
//! ```
//! use strictly_swg::{Move, Outcome, ScriptedMoves, Session, Standing};
//! use std::num::NonZeroU32;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opponent = ScriptedMoves::new([Move::Water])?;
//! let mut session = Session::new(NonZeroU32::new(1).unwrap(), opponent);
//!
//! let result = session.submit_move(Move::Snake)?;
//! assert_eq!(*result.outcome(), Outcome::UserWins);
//! assert_eq!(*result.standing(), Some(Standing::UserAhead));
//! assert!(session.submit_move(Move::Gun).is_err());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod messages;
mod opponent;
pub mod rules;
mod session;
mod types;

pub use error::{ScriptError, SessionError};
pub use messages::FinalMessages;
pub use opponent::{FixedMove, FromFn, MoveSource, RandomMoves, ScriptedMoves, from_fn};
pub use rules::{resolve, standing};
pub use session::{DEFAULT_MAX_ROUNDS, RoundResult, Session, SessionState};
pub use types::{Move, Outcome, Standing};
