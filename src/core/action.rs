//! Player actions.
//!
//! Everything a player can do during their own turn. Undoing a whole turn
//! is not a player action: it rewinds the shared history rather than acting
//! on the current turn, so it lives on the engine directly.

use serde::{Deserialize, Serialize};

use super::turn::ScoreType;

/// An action taken by the current player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Add a scoring roll to the turn in progress.
    AddScore {
        points: u32,
        score_type: ScoreType,
        label: Option<String>,
    },
    /// Remove the most recent roll of the turn in progress.
    UndoEntry,
    /// Bank the turn.
    Commit,
    /// Lose the turn's points and count a bust.
    Bust,
    /// Pass without counting a bust.
    Skip,
}

impl PlayerAction {
    /// Add a preset roll.
    #[must_use]
    pub fn preset(points: u32) -> Self {
        Self::AddScore {
            points,
            score_type: ScoreType::Preset,
            label: None,
        }
    }

    /// Add a free-form roll.
    #[must_use]
    pub fn custom(points: u32) -> Self {
        Self::AddScore {
            points,
            score_type: ScoreType::Custom,
            label: None,
        }
    }

    /// Does this action end the player's turn?
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        matches!(self, Self::Commit | Self::Bust | Self::Skip)
    }
}
