//! Core domain types for Snake-Water-Gun.

use crate::SessionError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// One of the three game choices.
///
/// Serialized as the single-letter wire tag (`"s"`, `"w"`, `"g"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Move {
    /// Snake drinks the water.
    #[serde(rename = "s")]
    Snake,
    /// Water drowns the gun.
    #[serde(rename = "w")]
    Water,
    /// Gun shoots the snake.
    #[serde(rename = "g")]
    Gun,
}

impl Move {
    /// All three moves.
    pub const ALL: [Move; 3] = [Move::Snake, Move::Water, Move::Gun];

    /// Display name of the move.
    pub fn label(self) -> &'static str {
        match self {
            Move::Snake => "Snake",
            Move::Water => "Water",
            Move::Gun => "Gun",
        }
    }

    /// Single-letter wire tag.
    pub fn tag(self) -> &'static str {
        match self {
            Move::Snake => "s",
            Move::Water => "w",
            Move::Gun => "g",
        }
    }

    /// The move this one defeats.
    pub fn beats(self) -> Move {
        match self {
            Move::Snake => Move::Water,
            Move::Water => Move::Gun,
            Move::Gun => Move::Snake,
        }
    }

    /// The move that defeats this one.
    pub fn beaten_by(self) -> Move {
        match self {
            Move::Snake => Move::Gun,
            Move::Water => Move::Snake,
            Move::Gun => Move::Water,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Move {
    type Err = SessionError;

    /// Parses a wire tag (`s`) or a full name (`snake`), ignoring case.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Move::ALL
            .into_iter()
            .find(|mv| {
                wanted.eq_ignore_ascii_case(mv.tag()) || wanted.eq_ignore_ascii_case(mv.label())
            })
            .ok_or_else(|| SessionError::InvalidMove(s.to_string()))
    }
}

/// Result of comparing the user's move against the computer's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The user's move beats the computer's.
    #[serde(rename = "User")]
    UserWins,
    /// The computer's move beats the user's.
    #[serde(rename = "Computer")]
    ComputerWins,
    /// Both sides played the same move.
    Draw,
}

impl Outcome {
    /// Returns true if neither side scored.
    pub fn is_draw(self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::UserWins => write!(f, "User"),
            Outcome::ComputerWins => write!(f, "Computer"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Comparison of the running scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standing {
    /// The user has more round wins.
    UserAhead,
    /// The computer has more round wins.
    ComputerAhead,
    /// Both sides have the same number of round wins.
    Tied,
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Standing::UserAhead => write!(f, "user ahead"),
            Standing::ComputerAhead => write!(f, "computer ahead"),
            Standing::Tied => write!(f, "tied"),
        }
    }
}
