//! Presentation text for round and game results.
//!
//! The engine only decides *which* outcome or standing applies; the words
//! shown to the player are configuration.

use crate::{Outcome, Standing};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Text shown for each round outcome and each final standing.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalMessages {
    /// Shown when the user finishes with more round wins.
    user_ahead: String,
    /// Shown when the computer finishes with more round wins.
    computer_ahead: String,
    /// Shown when the game ends level.
    tied: String,
    /// Shown after a round the user won.
    user_wins_round: String,
    /// Shown after a round the computer won.
    computer_wins_round: String,
    /// Shown after a drawn round.
    draw_round: String,
}

impl FinalMessages {
    /// Text for the final standing of a game.
    pub fn for_standing(&self, standing: Standing) -> &str {
        match standing {
            Standing::UserAhead => &self.user_ahead,
            Standing::ComputerAhead => &self.computer_ahead,
            Standing::Tied => &self.tied,
        }
    }

    /// Text for a single round outcome.
    pub fn for_outcome(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::UserWins => &self.user_wins_round,
            Outcome::ComputerWins => &self.computer_wins_round,
            Outcome::Draw => &self.draw_round,
        }
    }
}

impl Default for FinalMessages {
    fn default() -> Self {
        Self {
            user_ahead: "🎉 You won the game!".to_string(),
            computer_ahead: "💻 Computer won the game!".to_string(),
            tied: "🤝 The game is tied!".to_string(),
            user_wins_round: "🏆 You win!".to_string(),
            computer_wins_round: "🤖 Computer wins!".to_string(),
            draw_round: "🤝 It's a draw!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let messages: FinalMessages = toml::from_str(r#"tied = "Even stevens""#).unwrap();
        assert_eq!(messages.for_standing(Standing::Tied), "Even stevens");
        assert_eq!(
            messages.for_standing(Standing::UserAhead),
            FinalMessages::default().for_standing(Standing::UserAhead)
        );
        assert_eq!(messages.for_outcome(Outcome::Draw), "🤝 It's a draw!");
    }
}
