//! The game aggregate.
//!
//! ## Game
//!
//! Holds the players in turn order, the phase, the round counter, the full
//! turn history and the rules frozen at creation. Transitions consume the
//! game and return the next value; the caller keeps the previous snapshot
//! if it cloned it first.
//!
//! History uses an `im::Vector` so copying a long game is cheap.
//!
//! ## GamePhase
//!
//! `InProgress` -> `FinalRound` -> `Ended`, or `InProgress` -> `Ended`
//! directly when the final round is disabled.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameRules;
use super::history::{TurnOutcome, TurnRecord};
use super::player::{Player, PlayerId};
use super::turn::Turn;
use crate::error::ValidationError;

/// Phase of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// Normal play in turn order.
    #[default]
    InProgress,
    /// Someone reached the target. Every other player gets one last turn.
    FinalRound,
    /// Terminal.
    Ended,
}

/// A complete Dix Mille game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "GameSnapshot")]
pub struct Game {
    id: String,
    players: Vec<Player>,
    target_score: u32,
    current_player_index: usize,
    game_phase: GamePhase,
    triggering_player_id: Option<PlayerId>,
    created_at: i64,
    turn_history: Vector<TurnRecord>,
    round_number: u32,
    rules: GameRules,
}

impl Game {
    /// Create a game in round 1 with the first player to act.
    ///
    /// No turn is started; see [`Game::start_current_turn`].
    pub fn new(
        id: impl Into<String>,
        players: Vec<Player>,
        rules: GameRules,
        created_at: i64,
    ) -> Result<Self, ValidationError> {
        if !rules.allows_player_count(players.len()) {
            return Err(ValidationError::InvalidPlayerCount {
                count: players.len(),
                min: rules.min_players(),
                max: rules.max_players(),
            });
        }

        Ok(Self {
            id: id.into(),
            target_score: rules.target_score(),
            players,
            current_player_index: 0,
            game_phase: GamePhase::InProgress,
            triggering_player_id: None,
            created_at,
            turn_history: Vector::new(),
            round_number: 1,
            rules,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.game_phase
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.game_phase == GamePhase::Ended
    }

    /// The player who reached the target and opened the final round.
    #[must_use]
    pub fn triggering_player_id(&self) -> Option<&PlayerId> {
        self.triggering_player_id.as_ref()
    }

    #[must_use]
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    #[must_use]
    pub fn turn_history(&self) -> &Vector<TurnRecord> {
        &self.turn_history
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[must_use]
    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn last_turn(&self) -> Option<&TurnRecord> {
        self.turn_history.last()
    }

    /// History records of one round, in order.
    pub fn records_for_round(&self, round: u32) -> impl Iterator<Item = &TurnRecord> {
        self.turn_history.iter().filter(move |r| r.round_number == round)
    }

    /// History records of one player, in order.
    pub fn records_for_player<'a>(
        &'a self,
        id: &'a PlayerId,
    ) -> impl DoubleEndedIterator<Item = &'a TurnRecord> + 'a {
        self.turn_history.iter().filter(move |r| &r.player_id == id)
    }

    /// Players sorted by total score, highest first. Ties keep turn order.
    #[must_use]
    pub fn players_by_score(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        ranked
    }

    /// Highest scorer, once the game has ended. Ties go to the earlier seat.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        if !self.is_ended() {
            return None;
        }
        self.players_by_score().into_iter().next()
    }

    // === Player updates ===

    /// Replace the player at `index`.
    #[must_use]
    pub fn update_player(mut self, index: usize, player: Player) -> Self {
        self.players[index] = player;
        self
    }

    #[must_use]
    pub fn update_current_player(self, player: Player) -> Self {
        let index = self.current_player_index;
        self.update_player(index, player)
    }

    /// Apply a fallible transformation to the current player.
    pub fn try_map_current_player<E>(
        mut self,
        f: impl FnOnce(Player) -> Result<Player, E>,
    ) -> Result<Self, E> {
        let index = self.current_player_index;
        let player = self.players[index].clone();
        self.players[index] = f(player)?;
        Ok(self)
    }

    /// Start a fresh turn for whoever is current.
    #[must_use]
    pub fn start_current_turn(mut self, turn_id: impl Into<String>) -> Self {
        let index = self.current_player_index;
        self.players[index].current_turn = Some(Turn::new(turn_id));
        self
    }

    /// Drop every in-progress turn.
    #[must_use]
    pub fn clear_turns(mut self) -> Self {
        for player in &mut self.players {
            player.current_turn = None;
        }
        self
    }

    /// Make `player_id` the current player.
    pub fn set_current_player(mut self, player_id: &PlayerId) -> Result<Self, ValidationError> {
        self.current_player_index = self
            .player_index(player_id)
            .ok_or_else(|| ValidationError::UnknownPlayer { player_id: player_id.clone() })?;
        Ok(self)
    }

    // === Turn advancement ===

    /// Move to the next seat, bumping the round when wrapping to seat 0.
    #[must_use]
    pub fn advance_to_next_player(mut self) -> Self {
        let next = (self.current_player_index + 1) % self.players.len();
        if next == 0 {
            self.round_number += 1;
        }
        self.current_player_index = next;
        self
    }

    /// Advance to the next player still allowed to act.
    ///
    /// In the final round the triggering player and anyone who has already
    /// had their final turn are passed over.
    #[must_use]
    pub fn advance_to_next_eligible_player(self) -> Self {
        let mut game = self.advance_to_next_player();
        for _ in 1..game.players.len() {
            if !game.must_pass_over_current() {
                break;
            }
            game = game.advance_to_next_player();
        }
        game
    }

    fn must_pass_over_current(&self) -> bool {
        if self.game_phase != GamePhase::FinalRound {
            return false;
        }
        let current = self.current_player();
        self.triggering_player_id.as_ref() == Some(&current.id) || current.has_played_final_round
    }

    // === History ===

    /// Append a record stamped with the current round.
    #[must_use]
    pub fn record_turn(
        mut self,
        player_id: PlayerId,
        points: u32,
        outcome: TurnOutcome,
        previous_score: u32,
    ) -> Self {
        self.turn_history.push_back(TurnRecord::new(
            self.round_number,
            player_id,
            points,
            outcome,
            previous_score,
        ));
        self
    }

    /// Remove the most recent record, rewinding the round if play had moved
    /// past it. Returns the removed record.
    #[must_use]
    pub fn pop_last_turn(mut self) -> (Self, Option<TurnRecord>) {
        let record = self.turn_history.pop_back();
        if let Some(record) = &record {
            if self.round_number > record.round_number {
                self.round_number = record.round_number;
            }
        }
        (self, record)
    }

    // === Phase transitions ===

    /// Open the final round (or end the game outright when the final round
    /// is disabled) if the current player has reached the target.
    #[must_use]
    pub fn check_and_trigger_final_round(mut self) -> Self {
        if self.game_phase != GamePhase::InProgress {
            return self;
        }
        if self.current_player().total_score < self.target_score {
            return self;
        }

        if self.rules.enable_final_round() {
            self.game_phase = GamePhase::FinalRound;
            self.triggering_player_id = Some(self.current_player().id.clone());
        } else {
            self.game_phase = GamePhase::Ended;
            self.triggering_player_id = None;
        }
        self
    }

    /// Every player other than the trigger has had their final turn.
    #[must_use]
    pub fn all_final_turns_played(&self) -> bool {
        self.game_phase == GamePhase::FinalRound
            && self
                .players
                .iter()
                .filter(|p| Some(&p.id) != self.triggering_player_id.as_ref())
                .all(|p| p.has_played_final_round)
    }

    /// End the final round once everyone has played it.
    #[must_use]
    pub fn check_and_end_game(mut self) -> Self {
        if self.all_final_turns_played() {
            self.game_phase = GamePhase::Ended;
        }
        self
    }

    /// Has any player reached the target?
    #[must_use]
    pub fn anyone_at_target(&self) -> bool {
        self.players.iter().any(|p| p.total_score >= self.target_score)
    }

    /// Recompute the phase after history was rewound.
    ///
    /// With nobody at the target the game is back in progress. Otherwise it
    /// is in the final round, or stays ended when the final round is off.
    #[must_use]
    pub fn recompute_phase(mut self) -> Self {
        if self.game_phase == GamePhase::InProgress {
            return self;
        }

        if !self.anyone_at_target() {
            self.game_phase = GamePhase::InProgress;
            self.triggering_player_id = None;
        } else if self.rules.enable_final_round() {
            self.game_phase = GamePhase::FinalRound;
        } else {
            self.game_phase = GamePhase::Ended;
        }
        self
    }
}

/// Wire form, validated into `Game` on deserialize.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameSnapshot {
    id: String,
    players: Vec<Player>,
    target_score: u32,
    current_player_index: usize,
    game_phase: GamePhase,
    triggering_player_id: Option<PlayerId>,
    created_at: i64,
    turn_history: Vector<TurnRecord>,
    round_number: u32,
    rules: GameRules,
}

impl TryFrom<GameSnapshot> for Game {
    type Error = String;

    fn try_from(raw: GameSnapshot) -> Result<Self, Self::Error> {
        if !raw.rules.allows_player_count(raw.players.len()) {
            return Err(format!("snapshot has {} players", raw.players.len()));
        }
        if raw.current_player_index >= raw.players.len() {
            return Err(format!("current player index {} out of range", raw.current_player_index));
        }
        if raw.target_score == 0 {
            return Err("target score must be positive".to_string());
        }
        if raw.round_number == 0 {
            return Err("round number must start at 1".to_string());
        }

        Ok(Self {
            id: raw.id,
            players: raw.players,
            target_score: raw.target_score,
            current_player_index: raw.current_player_index,
            game_phase: raw.game_phase,
            triggering_player_id: raw.triggering_player_id,
            created_at: raw.created_at,
            turn_history: raw.turn_history,
            round_number: raw.round_number,
            rules: raw.rules,
        })
    }
}
