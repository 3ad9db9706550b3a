//! Player identification and per-player game state.
//!
//! ## PlayerId
//!
//! Opaque string identifier handed out by the game's [`IdSource`](super::IdSource).
//!
//! ## Player
//!
//! Persistent per-player state: total score, entry flag, the turn in
//! progress, final-round flag and consecutive-bust counter. Every turn
//! operation consumes the player and returns the updated value.

use serde::{Deserialize, Serialize};

use super::turn::{ScoreEntry, Turn};
use crate::error::ValidationError;
use crate::rules::validator::validate_commit_turn;

/// Player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A participant in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,

    pub name: String,

    /// Banked points.
    #[serde(default)]
    pub total_score: u32,

    /// Set once the player has cleared the entry minimum in a single turn.
    #[serde(default)]
    pub has_entered_game: bool,

    /// The turn being accumulated, if it is this player's go.
    #[serde(default)]
    pub current_turn: Option<Turn>,

    #[serde(default)]
    pub has_played_final_round: bool,

    /// Busts since the last successful commit. Skips don't count.
    #[serde(default)]
    pub consecutive_busts: u32,
}

impl Player {
    /// Create a player with a zero score and no turn.
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_score: 0,
            has_entered_game: false,
            current_turn: None,
            has_played_final_round: false,
            consecutive_busts: 0,
        }
    }

    /// Points accumulated in the turn in progress, 0 without one.
    #[must_use]
    pub fn turn_total(&self) -> u32 {
        self.current_turn.as_ref().map_or(0, Turn::turn_total)
    }

    #[must_use]
    pub fn has_active_turn(&self) -> bool {
        self.current_turn.is_some()
    }

    /// Begin a fresh, empty turn. Replaces any turn in progress.
    #[must_use]
    pub fn start_turn(mut self, turn_id: impl Into<String>) -> Self {
        self.current_turn = Some(Turn::new(turn_id));
        self
    }

    /// Append an entry to the turn in progress.
    ///
    /// An entry that would push the turn total past `u32::MAX` is rejected
    /// as an invalid score and the turn is left as it was.
    pub fn add_score_entry(mut self, entry: ScoreEntry) -> Result<Self, ValidationError> {
        let turn = self.current_turn.as_ref().ok_or(ValidationError::NoTurnInProgress)?;
        let fits = turn
            .checked_total()
            .and_then(|total| total.checked_add(entry.points))
            .is_some();
        if !fits {
            return Err(ValidationError::InvalidScoreValue { points: entry.points });
        }

        self.current_turn = self.current_turn.take().map(|turn| turn.add_entry(entry));
        Ok(self)
    }

    /// Drop the most recent entry of the turn in progress.
    pub fn undo_last_entry(mut self) -> Result<Self, ValidationError> {
        let turn = self.current_turn.take().ok_or(ValidationError::NoTurnInProgress)?;
        if turn.entries.is_empty() {
            self.current_turn = Some(turn);
            return Err(ValidationError::NoEntriesToUndo);
        }
        self.current_turn = Some(turn.remove_last_entry());
        Ok(self)
    }

    /// Discard the turn and count a bust.
    #[must_use]
    pub fn bust_turn(mut self) -> Self {
        self.current_turn = None;
        self.consecutive_busts += 1;
        self
    }

    /// Discard the turn without counting a bust.
    #[must_use]
    pub fn skip_turn(mut self) -> Self {
        self.current_turn = None;
        self
    }

    /// Bank the turn in progress.
    ///
    /// Rejects empty, busted and zero-point turns, and turns below
    /// `entry_minimum` for a player who has not entered yet. On success the
    /// player is entered, the bust counter resets and the turn is cleared.
    /// Returns the updated player and the points banked.
    pub fn commit_turn(mut self, entry_minimum: u32) -> Result<(Self, u32), ValidationError> {
        validate_commit_turn(&self, entry_minimum)?;

        let points = self.turn_total();
        self.total_score = self
            .total_score
            .checked_add(points)
            .ok_or(ValidationError::InvalidScoreValue { points })?;
        self.has_entered_game = true;
        self.consecutive_busts = 0;
        self.current_turn = None;
        Ok((self, points))
    }

    #[must_use]
    pub fn mark_final_round_played(mut self) -> Self {
        self.has_played_final_round = true;
        self
    }

    /// Set the total score back to an earlier value.
    #[must_use]
    pub fn revert_score(mut self, score: u32) -> Self {
        self.total_score = score;
        self
    }
}
