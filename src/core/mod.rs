//! Core data model: rules, players, turns, history, the game aggregate,
//! player actions, identifier and clock sources.
//!
//! Everything here is plain data with snapshot-returning transitions. The
//! rules that decide which transitions are legal live in `rules`.

pub mod action;
pub mod config;
pub mod history;
pub mod ids;
pub mod player;
pub mod preset;
pub mod state;
pub mod turn;

pub use action::PlayerAction;
pub use config::{GameRules, GameRulesBuilder, MAX_SUPPORTED_PLAYERS};
pub use history::{TurnOutcome, TurnRecord};
pub use ids::{Clock, FixedClock, IdSource, SeededIds, SystemClock};
pub use player::{Player, PlayerId};
pub use preset::{is_preset_value, preset_for, PresetScore, PRESET_SCORES};
pub use state::{Game, GamePhase};
pub use turn::{ScoreEntry, ScoreType, Turn};
