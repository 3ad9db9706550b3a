//! Stateless rule checks.
//!
//! Every operation runs these before touching the game. Each returns
//! `Ok(())` or the [`ValidationError`] naming the broken rule.

use crate::core::{is_preset_value, Game, GamePhase, GameRules, Player, PlayerId, ScoreType};
use crate::error::ValidationError;

/// A roll must be positive, and a preset roll must be a catalogue value.
pub fn validate_score_entry(points: u32, score_type: ScoreType) -> Result<(), ValidationError> {
    if points == 0 || (score_type == ScoreType::Preset && !is_preset_value(points)) {
        return Err(ValidationError::InvalidScoreValue { points });
    }
    Ok(())
}

/// Can `player` bank the turn in progress?
///
/// The turn must exist, not be busted and be worth something. A player who
/// has not entered must reach `entry_minimum` in this one turn; the commit is
/// rejected otherwise, never silently zeroed.
pub fn validate_commit_turn(player: &Player, entry_minimum: u32) -> Result<(), ValidationError> {
    let turn = player.current_turn.as_ref().ok_or(ValidationError::NoTurnInProgress)?;

    if turn.is_busted {
        return Err(ValidationError::TurnAlreadyBusted);
    }

    let total = turn.turn_total();
    if total == 0 {
        return Err(ValidationError::MustScoreToCommit);
    }
    if !player.has_entered_game && total < entry_minimum {
        return Err(ValidationError::InsufficientPointsToEnter { minimum: entry_minimum });
    }
    Ok(())
}

/// The game accepts actions until it has ended.
pub fn validate_game_active(game: &Game) -> Result<(), ValidationError> {
    if game.phase() == GamePhase::Ended {
        return Err(ValidationError::GameAlreadyEnded);
    }
    Ok(())
}

/// `player_id` must be current and, in the final round, not have played yet.
pub fn validate_player_can_act(game: &Game, player_id: &PlayerId) -> Result<(), ValidationError> {
    validate_game_active(game)?;

    let current = game.current_player();
    if &current.id != player_id {
        return Err(ValidationError::NotPlayersTurn { player_id: player_id.clone() });
    }
    if game.phase() == GamePhase::FinalRound && current.has_played_final_round {
        return Err(ValidationError::AlreadyPlayedFinalRound);
    }
    Ok(())
}

/// Player names for a new game: count within the rules' range, none blank.
pub fn validate_new_game<S: AsRef<str>>(names: &[S], rules: &GameRules) -> Result<(), ValidationError> {
    if !rules.allows_player_count(names.len()) {
        return Err(ValidationError::InvalidPlayerCount {
            count: names.len(),
            min: rules.min_players(),
            max: rules.max_players(),
        });
    }
    if names.iter().any(|n| n.as_ref().trim().is_empty()) {
        return Err(ValidationError::BlankPlayerName);
    }
    Ok(())
}

/// Has the current player just reached the target during normal play?
#[must_use]
pub fn should_trigger_final_round(game: &Game) -> bool {
    game.phase() == GamePhase::InProgress && game.current_player().total_score >= game.target_score()
}
