//! # dix-mille
//!
//! Rules engine and turn state machine for the Dix Mille (10,000) dice game.
//!
//! ## Design Principles
//!
//! 1. **Snapshots In, Snapshots Out**: Every transition consumes a [`Game`]
//!    and returns a new one. Nothing is half-applied: a rejected action
//!    leaves the caller holding the old snapshot.
//!
//! 2. **Rules As Data**: Target, entry minimum, bust penalty and final round
//!    are all carried by [`GameRules`] inside the game they were created with.
//!
//! 3. **History Is The Undo Log**: Each finished turn appends one
//!    [`TurnRecord`]. Undo pops it and re-derives what it affected.
//!
//! ## Modules
//!
//! - `core`: players, turns, rules, presets, history, game state, id sources
//! - `rules`: validation, bust penalty, collision cascade, transitions, undo
//! - `store`: single-slot snapshot stores (memory, JSON file)
//! - `session`: load, transition and persist orchestration
//! - `error`: error types

pub mod core;
pub mod error;
pub mod rules;
pub mod session;
pub mod store;

pub use crate::core::{
    Game, GamePhase, GameRules, GameRulesBuilder, Player, PlayerAction, PlayerId, ScoreEntry,
    ScoreType, Turn, TurnOutcome, TurnRecord, PRESET_SCORES,
};

pub use crate::core::{Clock, FixedClock, IdSource, SeededIds, SystemClock};

pub use crate::error::{DixMilleError, RulesError, StoreError, ValidationError};

pub use crate::rules::{apply_action, game_result, undo_last_turn, GameResult};

pub use crate::session::Session;

pub use crate::store::{JsonFileStore, MemoryStore, SnapshotStore};
