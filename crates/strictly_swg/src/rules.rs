//! Move resolution rules.
//!
//! Pure functions over the closed move domain. Nothing here knows about
//! rounds or sessions.

use crate::{Move, Outcome, Standing};
use std::cmp::Ordering;
use tracing::instrument;

/// Resolves one round: Snake beats Water, Water beats Gun, Gun beats Snake.
#[instrument(level = "trace")]
pub fn resolve(user_move: Move, computer_move: Move) -> Outcome {
    if user_move == computer_move {
        Outcome::Draw
    } else if user_move.beats() == computer_move {
        Outcome::UserWins
    } else {
        Outcome::ComputerWins
    }
}

/// Compares the two scores.
#[instrument(level = "trace")]
pub fn standing(user_score: u32, computer_score: u32) -> Standing {
    match user_score.cmp(&computer_score) {
        Ordering::Greater => Standing::UserAhead,
        Ordering::Less => Standing::ComputerAhead,
        Ordering::Equal => Standing::Tied,
    }
}
