//! Error taxonomy.
//!
//! - [`ValidationError`]: a rule rejected the action. User-correctable,
//!   never retried.
//! - [`RulesError`]: a `GameRules` value violated its construction invariants.
//! - [`StoreError`]: a snapshot store failed.
//! - [`DixMilleError`]: what session operations return. Keeps the three
//!   sources above apart, plus the "no game yet" condition.

use thiserror::Error;

use crate::core::PlayerId;

/// A game rule rejected the requested action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("score of {points} is not valid")]
    InvalidScoreValue { points: u32 },

    #[error("game has already ended")]
    GameAlreadyEnded,

    #[error("not player {player_id}'s turn")]
    NotPlayersTurn { player_id: PlayerId },

    #[error("must score at least one point to end the turn")]
    MustScoreToCommit,

    #[error("turn has already been busted")]
    TurnAlreadyBusted,

    #[error("no turn in progress")]
    NoTurnInProgress,

    #[error("player has already played the final round")]
    AlreadyPlayedFinalRound,

    #[error("need at least {minimum} points in a turn to enter the game")]
    InsufficientPointsToEnter { minimum: u32 },

    #[error("game must have {min}-{max} players, got {count}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    #[error("player names must not be blank")]
    BlankPlayerName,

    #[error("no score entries to undo")]
    NoEntriesToUndo,

    #[error("no turns to undo")]
    NoTurnsToUndo,

    #[error("player {player_id} is not part of this game")]
    UnknownPlayer { player_id: PlayerId },
}

/// `GameRules` construction invariant violations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("target score must be positive")]
    InvalidTargetScore,

    #[error("consecutive busts for penalty must be at least 2, got {0}")]
    BustThresholdTooLow(u32),

    #[error("minimum players must be at least 2, got {0}")]
    MinPlayersTooLow(usize),

    #[error("maximum players ({max}) must be >= minimum players ({min})")]
    MaxPlayersBelowMin { min: usize, max: usize },

    #[error("maximum players must be at most 10, got {0}")]
    MaxPlayersTooHigh(usize),
}

/// Snapshot store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum DixMilleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    /// No current game has been saved. Callers should offer to create one.
    #[error("no current game; create a game first")]
    GameNotFound,

    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

impl DixMilleError {
    /// The validation error, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}
