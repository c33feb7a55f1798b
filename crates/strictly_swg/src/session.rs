//! Round-bounded game session.
//!
//! A [`Session`] is the single authority over one game: it counts rounds,
//! keeps score, draws the computer's move and refuses play once the round
//! ceiling has been passed. It is a plain owned value; callers that share a
//! session across threads must serialize access themselves.

use crate::rules::{resolve, standing};
use crate::{Move, MoveSource, Outcome, SessionError, Standing};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use tracing::{debug, info, instrument, warn};

/// Round ceiling used when none is configured.
pub const DEFAULT_MAX_ROUNDS: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Mutable state of one game.
///
/// Deserialization checks the same invariants play maintains: the round
/// counter starts at 1 and runs at most one past the ceiling, and the scores
/// never exceed the rounds played.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(try_from = "StoredState")]
pub struct SessionState {
    /// Round about to be played, starting at 1.
    current_round: u32,
    /// Rounds won by the user.
    user_score: u32,
    /// Rounds won by the computer.
    computer_score: u32,
    /// Round ceiling for this game.
    max_rounds: NonZeroU32,
}

impl SessionState {
    /// Creates start-of-game state.
    pub fn new(max_rounds: NonZeroU32) -> Self {
        Self {
            current_round: 1,
            user_score: 0,
            computer_score: 0,
            max_rounds,
        }
    }

    /// True once every round has been played.
    pub fn is_terminated(&self) -> bool {
        self.current_round > self.max_rounds.get()
    }

    /// Number of rounds resolved so far.
    pub fn rounds_played(&self) -> u32 {
        self.current_round - 1
    }

    /// Number of rounds still to play.
    pub fn rounds_remaining(&self) -> u32 {
        self.max_rounds.get().saturating_sub(self.rounds_played())
    }

    /// Current comparison of the two scores.
    pub fn standing(&self) -> Standing {
        standing(self.user_score, self.computer_score)
    }

    /// Applies a resolved round. Callers check termination first.
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::UserWins => self.user_score += 1,
            Outcome::ComputerWins => self.computer_score += 1,
            Outcome::Draw => {}
        }
        self.current_round += 1;
    }
}

/// Unchecked wire form of [`SessionState`].
#[derive(Deserialize)]
struct StoredState {
    current_round: u32,
    user_score: u32,
    computer_score: u32,
    max_rounds: NonZeroU32,
}

impl TryFrom<StoredState> for SessionState {
    type Error = String;

    fn try_from(stored: StoredState) -> Result<Self, Self::Error> {
        let last = stored.max_rounds.get().saturating_add(1);
        if stored.current_round == 0 || stored.current_round > last {
            return Err(format!(
                "current_round {} outside 1..={}",
                stored.current_round, last
            ));
        }
        let played = u64::from(stored.current_round - 1);
        if u64::from(stored.user_score) + u64::from(stored.computer_score) > played {
            return Err(format!(
                "scores {}-{} exceed {} rounds played",
                stored.user_score, stored.computer_score, played
            ));
        }
        Ok(Self {
            current_round: stored.current_round,
            user_score: stored.user_score,
            computer_score: stored.computer_score,
            max_rounds: stored.max_rounds,
        })
    }
}

/// Everything a caller needs to display one resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RoundResult {
    /// Move submitted by the user.
    user_move: Move,
    /// Move drawn for the computer.
    computer_move: Move,
    /// Who won the round.
    outcome: Outcome,
    /// Number of the round just played (1-based).
    round_number: u32,
    /// User score after this round.
    user_score: u32,
    /// Computer score after this round.
    computer_score: u32,
    /// Round ceiling of the game.
    max_rounds: u32,
    /// Final standing, present only when this round ended the game.
    standing: Option<Standing>,
}

impl RoundResult {
    /// True if this round ended the game.
    pub fn is_final(&self) -> bool {
        self.standing.is_some()
    }
}

/// One game against the computer.
#[derive(Debug, Clone)]
pub struct Session<S> {
    state: SessionState,
    opponent: S,
}

impl<S: MoveSource> Session<S> {
    /// Starts a game of `max_rounds` rounds against `opponent`.
    #[instrument(skip(opponent))]
    pub fn new(max_rounds: NonZeroU32, opponent: S) -> Self {
        info!(max_rounds = max_rounds.get(), "Starting new session");
        Self {
            state: SessionState::new(max_rounds),
            opponent,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// True once every round has been played.
    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    /// Plays one round with the user's move.
    ///
    /// Fails with [`SessionError::SessionTerminated`] after the final round,
    /// leaving the state and the opponent untouched.
    #[instrument(skip(self), fields(round = self.state.current_round))]
    pub fn submit_move(&mut self, user_move: Move) -> Result<RoundResult, SessionError> {
        if self.state.is_terminated() {
            warn!(
                max_rounds = self.state.max_rounds.get(),
                "Move submitted after game over"
            );
            return Err(SessionError::SessionTerminated {
                max_rounds: self.state.max_rounds.get(),
            });
        }

        let computer_move = self.opponent.next_move();
        let outcome = resolve(user_move, computer_move);
        let round_number = self.state.current_round;
        self.state.record(outcome);

        let final_standing = self.state.is_terminated().then(|| self.state.standing());

        debug!(
            %user_move,
            %computer_move,
            ?outcome,
            user_score = self.state.user_score,
            computer_score = self.state.computer_score,
            "Round resolved"
        );
        if let Some(standing) = final_standing {
            info!(
                %standing,
                user_score = self.state.user_score,
                computer_score = self.state.computer_score,
                "Game over"
            );
        }

        Ok(RoundResult {
            user_move,
            computer_move,
            outcome,
            round_number,
            user_score: self.state.user_score,
            computer_score: self.state.computer_score,
            max_rounds: self.state.max_rounds.get(),
            standing: final_standing,
        })
    }

    /// Starts over: round 1, both scores zero. Keeps the round ceiling and
    /// the opponent.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(
            rounds_played = self.state.rounds_played(),
            "Resetting session"
        );
        self.state = SessionState::new(self.state.max_rounds);
    }
}
