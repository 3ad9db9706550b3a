//! Dix Mille rules.
//!
//! - `validator`: stateless legality checks
//! - `penalty`: bust penalty and score walk-back
//! - `collision`: score collision cascade
//! - `engine`: snapshot-to-snapshot turn transitions and undo

pub mod collision;
pub mod engine;
pub mod penalty;
pub mod validator;

pub use collision::resolve_collisions;
pub use engine::{apply_action, game_result, undo_last_turn, GameResult};
pub use penalty::{apply_bust_penalty, derive_consecutive_busts, last_pre_gain_score};
