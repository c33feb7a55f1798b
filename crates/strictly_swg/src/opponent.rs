//! Computer move selection.
//!
//! The session engine never reaches for a global random source; it asks a
//! [`MoveSource`] for each computer move, so tests and demos can script the
//! opponent.

use crate::{Move, ScriptError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Supplies the computer's move for each round.
pub trait MoveSource: Send {
    /// Draws the next computer move.
    fn next_move(&mut self) -> Move;
}

impl<T: MoveSource + ?Sized> MoveSource for Box<T> {
    fn next_move(&mut self) -> Move {
        (**self).next_move()
    }
}

/// Uniform random opponent.
///
/// Each draw is independent of the previous ones. Not suitable for anything
/// that needs unpredictability guarantees beyond a casual game.
#[derive(Debug, Clone)]
pub struct RandomMoves {
    rng: StdRng,
}

impl RandomMoves {
    /// Creates a random opponent seeded from the operating system.
    #[instrument]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible random opponent.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        debug!(seed, "Seeding random opponent");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMoves {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for RandomMoves {
    fn next_move(&mut self) -> Move {
        Move::ALL[self.rng.random_range(0..Move::ALL.len())]
    }
}

/// Replays a fixed sequence of moves, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedMoves {
    script: Vec<Move>,
    cursor: usize,
}

impl ScriptedMoves {
    /// Creates a scripted opponent; the script must not be empty.
    #[instrument(skip(script))]
    pub fn new(script: impl IntoIterator<Item = Move>) -> Result<Self, ScriptError> {
        let script: Vec<Move> = script.into_iter().collect();
        if script.is_empty() {
            return Err(ScriptError);
        }
        debug!(len = script.len(), "Created scripted opponent");
        Ok(Self { script, cursor: 0 })
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self) -> Move {
        let mv = self.script[self.cursor % self.script.len()];
        self.cursor = self.cursor.wrapping_add(1);
        mv
    }
}

/// Always plays the same move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMove(pub Move);

impl MoveSource for FixedMove {
    fn next_move(&mut self) -> Move {
        self.0
    }
}

/// Move source backed by a closure. Built with [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<F> MoveSource for FromFn<F>
where
    F: FnMut() -> Move + Send,
{
    fn next_move(&mut self) -> Move {
        (self.0)()
    }
}

/// Wraps a closure as a move source.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Move + Send,
{
    FromFn(f)
}
