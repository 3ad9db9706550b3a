//! Score reversion: the bust penalty and the shared walk-back lookup.

use im::Vector;
use tracing::debug;

use crate::core::{GameRules, Player, PlayerId, TurnOutcome, TurnRecord};

/// The score a player had just before their last net-positive gain.
///
/// Walks the player's `Scored` records from newest to oldest and returns the
/// `previous_score` of the first one below `current`. Defaults to 0.
#[must_use]
pub fn last_pre_gain_score(history: &Vector<TurnRecord>, player_id: &PlayerId, current: u32) -> u32 {
    history
        .iter()
        .rev()
        .filter(|r| &r.player_id == player_id && r.is_scored())
        .find(|r| r.previous_score < current)
        .map_or(0, |r| r.previous_score)
}

/// Apply the consecutive-bust penalty if it is due.
///
/// Call after the bust counter was incremented. When the penalty is enabled
/// and the counter has reached the threshold, the score walks back to
/// [`last_pre_gain_score`] and the counter resets.
#[must_use]
pub fn apply_bust_penalty(player: Player, history: &Vector<TurnRecord>, rules: &GameRules) -> Player {
    if !rules.enable_bust_penalty() || player.consecutive_busts < rules.consecutive_busts_for_penalty() {
        return player;
    }

    let revert_to = last_pre_gain_score(history, &player.id, player.total_score);
    debug!(
        player = %player.id,
        busts = player.consecutive_busts,
        from = player.total_score,
        to = revert_to,
        "bust penalty"
    );

    let mut player = player.revert_score(revert_to);
    player.consecutive_busts = 0;
    player
}

/// Re-derive a player's bust counter from history.
///
/// Counts `Bust` records back from the newest until a `Scored` one. Skips
/// and collisions don't break the run. With the penalty enabled, every full
/// run of `consecutive_busts_for_penalty` busts already fired and reset the
/// counter, so only the remainder is live.
#[must_use]
pub fn derive_consecutive_busts(history: &Vector<TurnRecord>, player_id: &PlayerId, rules: &GameRules) -> u32 {
    let mut busts = 0;
    for record in history.iter().rev().filter(|r| &r.player_id == player_id) {
        match record.outcome {
            TurnOutcome::Bust => busts += 1,
            TurnOutcome::Scored => break,
            TurnOutcome::Skip | TurnOutcome::Collision => {}
        }
    }

    if rules.enable_bust_penalty() {
        busts % rules.consecutive_busts_for_penalty()
    } else {
        busts
    }
}
