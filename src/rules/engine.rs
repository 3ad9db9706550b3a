//! Turn transitions.
//!
//! Pure functions from a game snapshot and an action to the next snapshot.
//! Each validates fully before changing anything, so a rejected action
//! leaves the caller's game untouched.
//!
//! Turn-ending actions append exactly one primary history record (a commit
//! may add collision records after it), then hand play to the next eligible
//! player and start their turn unless the game just ended.

use tracing::{debug, info};

use super::collision::resolve_collisions;
use super::penalty::{apply_bust_penalty, derive_consecutive_busts};
use super::validator::{should_trigger_final_round, validate_player_can_act, validate_score_entry};
use crate::core::{Game, GamePhase, IdSource, PlayerAction, PlayerId, ScoreEntry, TurnOutcome};
use crate::error::ValidationError;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several players tied on the top score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => p == player,
            GameResult::Winners(ps) => ps.contains(player),
        }
    }
}

/// Final standings, or `None` while the game continues.
#[must_use]
pub fn game_result(game: &Game) -> Option<GameResult> {
    if !game.is_ended() {
        return None;
    }

    let best = game.players().iter().map(|p| p.total_score).max()?;
    let mut top: Vec<PlayerId> = game
        .players()
        .iter()
        .filter(|p| p.total_score == best)
        .map(|p| p.id.clone())
        .collect();

    if top.len() == 1 {
        top.pop().map(GameResult::Winner)
    } else {
        Some(GameResult::Winners(top))
    }
}

/// Apply `action` on behalf of `actor`.
pub fn apply_action(
    game: Game,
    actor: &PlayerId,
    action: PlayerAction,
    ids: &mut impl IdSource,
) -> Result<Game, ValidationError> {
    validate_player_can_act(&game, actor)?;

    match action {
        PlayerAction::AddScore { points, score_type, label } => {
            validate_score_entry(points, score_type)?;
            let mut entry = ScoreEntry::new(ids.next_id(), points, score_type);
            entry.label = label;
            debug!(player = %actor, points, "score entry added");
            game.try_map_current_player(|p| p.add_score_entry(entry))
        }
        PlayerAction::UndoEntry => {
            debug!(player = %actor, "score entry removed");
            game.try_map_current_player(|p| p.undo_last_entry())
        }
        PlayerAction::Commit => commit_turn(game, ids),
        PlayerAction::Bust => Ok(bust_turn(game, ids)),
        PlayerAction::Skip => Ok(skip_turn(game, ids)),
    }
}

/// Bank the current player's turn.
///
/// Records `Scored`, resolves collisions with the committer immune, then
/// checks the final-round trigger.
fn commit_turn(game: Game, ids: &mut impl IdSource) -> Result<Game, ValidationError> {
    let entry_minimum = game.rules().entry_minimum_score();
    let player = game.current_player().clone();
    let player_id = player.id.clone();
    let previous_score = player.total_score;

    let (player, points) = player.commit_turn(entry_minimum)?;
    info!(player = %player_id, points, total = player.total_score, round = game.round_number(), "turn committed");

    let game = game
        .update_current_player(player)
        .record_turn(player_id.clone(), points, TurnOutcome::Scored, previous_score);
    let game = resolve_collisions(game, &player_id);

    let reached_target = should_trigger_final_round(&game);
    let game = game.check_and_trigger_final_round();
    if reached_target {
        info!(player = %player_id, phase = ?game.phase(), "target reached");
    }

    Ok(finish_turn(mark_final_round(game), ids))
}

/// Lose the turn and count a bust, applying the penalty if due.
fn bust_turn(game: Game, ids: &mut impl IdSource) -> Game {
    let player = game.current_player().clone();
    let player_id = player.id.clone();
    let previous_score = player.total_score;

    let player = apply_bust_penalty(player.bust_turn(), game.turn_history(), game.rules());
    info!(player = %player_id, total = player.total_score, round = game.round_number(), "turn busted");

    let game = game
        .update_current_player(player)
        .record_turn(player_id, 0, TurnOutcome::Bust, previous_score);

    finish_turn(mark_final_round(game), ids)
}

/// Pass without counting a bust.
fn skip_turn(game: Game, ids: &mut impl IdSource) -> Game {
    let player = game.current_player().clone();
    let player_id = player.id.clone();
    let previous_score = player.total_score;
    info!(player = %player_id, round = game.round_number(), "turn skipped");

    let game = game
        .update_current_player(player.skip_turn())
        .record_turn(player_id, 0, TurnOutcome::Skip, previous_score);

    finish_turn(mark_final_round(game), ids)
}

fn mark_final_round(game: Game) -> Game {
    if game.phase() != GamePhase::FinalRound {
        return game;
    }
    let player = game.current_player().clone().mark_final_round_played();
    game.update_current_player(player)
}

/// End the game if everyone has played, otherwise hand over to the next
/// eligible player with a fresh turn.
fn finish_turn(game: Game, ids: &mut impl IdSource) -> Game {
    let game = game.check_and_end_game();
    if game.is_ended() {
        info!(game = game.id(), round = game.round_number(), "game ended");
        return game;
    }

    let game = game.advance_to_next_eligible_player();
    game.start_current_turn(ids.next_id())
}

/// Undo the most recent history record.
///
/// Restores the affected player's score, entry flag (when the record was
/// their entering turn) and bust counter (re-derived from what remains),
/// rewinds the round, gives that player the turn again and recomputes the
/// phase. The player's final-round flag is cleared on every undo: no
/// per-turn flag history is kept to restore it more precisely.
pub fn undo_last_turn(game: Game, ids: &mut impl IdSource) -> Result<Game, ValidationError> {
    let record = game.last_turn().cloned().ok_or(ValidationError::NoTurnsToUndo)?;
    let index = game
        .player_index(&record.player_id)
        .ok_or_else(|| ValidationError::UnknownPlayer { player_id: record.player_id.clone() })?;

    let (game, _) = game.clear_turns().pop_last_turn();

    let mut player = game.players()[index].clone();
    let was_entry_turn = record.is_scored() && record.previous_score == 0 && player.has_entered_game;
    player.total_score = record.previous_score;
    if was_entry_turn {
        player.has_entered_game = false;
    }
    player.consecutive_busts = derive_consecutive_busts(game.turn_history(), &player.id, game.rules());
    player.has_played_final_round = false;

    info!(
        player = %player.id,
        outcome = ?record.outcome,
        restored = record.previous_score,
        round = game.round_number(),
        "turn undone"
    );

    let game = game
        .update_player(index, player)
        .set_current_player(&record.player_id)?
        .recompute_phase();

    if game.is_ended() {
        return Ok(game);
    }
    Ok(game.start_current_turn(ids.next_id()))
}
