//! Game rules configuration.
//!
//! `GameRules` bounds everything else: target score, entry minimum, bust
//! penalty threshold, player count and the two feature toggles. Values are
//! checked when built and again when deserialized, so a `GameRules` in hand
//! always satisfies its invariants.

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Hard upper bound on players per game.
pub const MAX_SUPPORTED_PLAYERS: usize = 10;

/// Immutable rules frozen into a game at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRules")]
pub struct GameRules {
    target_score: u32,
    entry_minimum_score: u32,
    consecutive_busts_for_penalty: u32,
    min_players: usize,
    max_players: usize,
    enable_bust_penalty: bool,
    enable_final_round: bool,
}

impl GameRules {
    pub const DEFAULT_TARGET_SCORE: u32 = 10_000;
    pub const DEFAULT_ENTRY_MINIMUM_SCORE: u32 = 500;
    pub const DEFAULT_CONSECUTIVE_BUSTS_FOR_PENALTY: u32 = 3;
    pub const DEFAULT_MIN_PLAYERS: usize = 2;
    pub const DEFAULT_MAX_PLAYERS: usize = 6;

    /// Start from the defaults.
    #[must_use]
    pub fn builder() -> GameRulesBuilder {
        GameRulesBuilder::default()
    }

    /// Copy of these rules with a different target score.
    pub fn with_target_score(&self, target_score: u32) -> Result<Self, RulesError> {
        GameRulesBuilder::from(self.clone()).target_score(target_score).build()
    }

    #[must_use]
    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    /// Points a player must bank in one turn before any points count.
    #[must_use]
    pub fn entry_minimum_score(&self) -> u32 {
        self.entry_minimum_score
    }

    #[must_use]
    pub fn consecutive_busts_for_penalty(&self) -> u32 {
        self.consecutive_busts_for_penalty
    }

    #[must_use]
    pub fn min_players(&self) -> usize {
        self.min_players
    }

    #[must_use]
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    #[must_use]
    pub fn enable_bust_penalty(&self) -> bool {
        self.enable_bust_penalty
    }

    #[must_use]
    pub fn enable_final_round(&self) -> bool {
        self.enable_final_round
    }

    /// Does `count` fall within the allowed player range?
    #[must_use]
    pub fn allows_player_count(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            target_score: Self::DEFAULT_TARGET_SCORE,
            entry_minimum_score: Self::DEFAULT_ENTRY_MINIMUM_SCORE,
            consecutive_busts_for_penalty: Self::DEFAULT_CONSECUTIVE_BUSTS_FOR_PENALTY,
            min_players: Self::DEFAULT_MIN_PLAYERS,
            max_players: Self::DEFAULT_MAX_PLAYERS,
            enable_bust_penalty: true,
            enable_final_round: true,
        }
    }
}

/// Builder for [`GameRules`].
#[derive(Clone, Debug)]
pub struct GameRulesBuilder {
    rules: GameRules,
}

impl Default for GameRulesBuilder {
    fn default() -> Self {
        Self { rules: GameRules::default() }
    }
}

impl From<GameRules> for GameRulesBuilder {
    fn from(rules: GameRules) -> Self {
        Self { rules }
    }
}

impl GameRulesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_score(mut self, score: u32) -> Self {
        self.rules.target_score = score;
        self
    }

    pub fn entry_minimum_score(mut self, score: u32) -> Self {
        self.rules.entry_minimum_score = score;
        self
    }

    pub fn consecutive_busts_for_penalty(mut self, busts: u32) -> Self {
        self.rules.consecutive_busts_for_penalty = busts;
        self
    }

    pub fn player_range(mut self, min: usize, max: usize) -> Self {
        self.rules.min_players = min;
        self.rules.max_players = max;
        self
    }

    pub fn enable_bust_penalty(mut self, enabled: bool) -> Self {
        self.rules.enable_bust_penalty = enabled;
        self
    }

    pub fn enable_final_round(mut self, enabled: bool) -> Self {
        self.rules.enable_final_round = enabled;
        self
    }

    /// Check the invariants and produce the rules.
    pub fn build(self) -> Result<GameRules, RulesError> {
        let r = self.rules;
        if r.target_score == 0 {
            return Err(RulesError::InvalidTargetScore);
        }
        if r.consecutive_busts_for_penalty < 2 {
            return Err(RulesError::BustThresholdTooLow(r.consecutive_busts_for_penalty));
        }
        if r.min_players < 2 {
            return Err(RulesError::MinPlayersTooLow(r.min_players));
        }
        if r.max_players < r.min_players {
            return Err(RulesError::MaxPlayersBelowMin { min: r.min_players, max: r.max_players });
        }
        if r.max_players > MAX_SUPPORTED_PLAYERS {
            return Err(RulesError::MaxPlayersTooHigh(r.max_players));
        }
        Ok(r)
    }
}

/// Wire form, validated into `GameRules` on deserialize.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRules {
    target_score: u32,
    entry_minimum_score: u32,
    consecutive_busts_for_penalty: u32,
    min_players: usize,
    max_players: usize,
    enable_bust_penalty: bool,
    enable_final_round: bool,
}

impl TryFrom<RawRules> for GameRules {
    type Error = RulesError;

    fn try_from(raw: RawRules) -> Result<Self, Self::Error> {
        GameRulesBuilder::new()
            .target_score(raw.target_score)
            .entry_minimum_score(raw.entry_minimum_score)
            .consecutive_busts_for_penalty(raw.consecutive_busts_for_penalty)
            .player_range(raw.min_players, raw.max_players)
            .enable_bust_penalty(raw.enable_bust_penalty)
            .enable_final_round(raw.enable_final_round)
            .build()
    }
}
