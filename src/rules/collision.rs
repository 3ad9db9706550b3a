//! Score collisions.
//!
//! A player who lands exactly on another player's nonzero total knocks
//! that player back to the score they had before their last gain. A knocked
//! back player can land on a third player's total, and so on.
//!
//! Resolution is a breadth-first walk over score values. Each player hit is
//! made immune for the rest of the cascade, so it visits every player at
//! most once and terminates.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::debug;

use super::penalty::last_pre_gain_score;
use crate::core::{Game, PlayerId, TurnOutcome};

/// Resolve every collision caused by `immune` reaching its current total.
///
/// Each hit appends a `Collision` record (0 points, `previous_score` = the
/// score the player was hit at). Only totals and history change.
#[must_use]
pub fn resolve_collisions(mut game: Game, immune: &PlayerId) -> Game {
    let Some(seed) = game.player(immune).map(|p| p.total_score) else {
        return game;
    };

    let mut immune_set: FxHashSet<PlayerId> = FxHashSet::default();
    immune_set.insert(immune.clone());

    let mut queue: VecDeque<u32> = VecDeque::new();
    if seed != 0 {
        queue.push_back(seed);
    }

    while let Some(score) = queue.pop_front() {
        let hit: Vec<usize> = game
            .players()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.total_score == score && !immune_set.contains(&p.id))
            .map(|(i, _)| i)
            .collect();

        for index in hit {
            let victim = game.players()[index].clone();
            let revert_to = last_pre_gain_score(game.turn_history(), &victim.id, score);
            debug!(player = %victim.id, at = score, to = revert_to, "score collision");

            immune_set.insert(victim.id.clone());
            game = game
                .update_player(index, victim.clone().revert_score(revert_to))
                .record_turn(victim.id, 0, TurnOutcome::Collision, score);

            if revert_to != 0 {
                queue.push_back(revert_to);
            }
        }
    }

    game
}
