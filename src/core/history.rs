//! Turn history ledger.
//!
//! Append-only. `previous_score` on each record is what lets undo, the bust
//! penalty and collision reversion walk a player's score back.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// What a completed turn (or a side effect) did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnOutcome {
    /// Points banked. Resets the bust counter.
    Scored,
    /// No scoring dice. Counts toward the bust penalty.
    Bust,
    /// Turn passed voluntarily. Does not count toward the penalty.
    Skip,
    /// Knocked back by another player landing on the same score.
    Collision,
}

/// One entry of the game's history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRecord {
    pub round_number: u32,
    pub player_id: PlayerId,
    pub points: u32,
    pub outcome: TurnOutcome,
    /// The player's total before this record took effect.
    pub previous_score: u32,
}

impl TurnRecord {
    #[must_use]
    pub fn new(
        round_number: u32,
        player_id: PlayerId,
        points: u32,
        outcome: TurnOutcome,
        previous_score: u32,
    ) -> Self {
        Self {
            round_number,
            player_id,
            points,
            outcome,
            previous_score,
        }
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.outcome == TurnOutcome::Scored
    }
}
