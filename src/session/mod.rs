//! Orchestration operations.
//!
//! A [`Session`] owns the game store, the rules store, the identifier
//! source and the clock. Every mutating operation loads the current game,
//! runs the pure transition from `rules::engine`, and persists the result
//! with a single save. A rejected action or a failed save leaves the stored
//! snapshot as it was.
//!
//! Operations take `&mut self`: one session is the single writer of its
//! game.
//!
//! ```
//! use dix_mille::core::{FixedClock, SeededIds};
//! use dix_mille::session::Session;
//! use dix_mille::store::MemoryStore;
//! use dix_mille::{Game, GameRules};
//!
//! let games: MemoryStore<Game> = MemoryStore::new();
//! let rules: MemoryStore<GameRules> = MemoryStore::new();
//! let mut session = Session::new(games, rules, SeededIds::new(1), FixedClock(0));
//! let game = session.create_game(&["Alice", "Bob"], None).unwrap();
//! assert_eq!(game.players().len(), 2);
//!
//! session.add_preset_score(500).unwrap();
//! let game = session.commit_turn().unwrap();
//! assert_eq!(game.players()[0].total_score, 500);
//! ```

use tracing::{debug, info, warn};

use crate::core::{Clock, Game, GameRules, IdSource, Player, PlayerAction, PlayerId, ScoreType};
use crate::error::DixMilleError;
use crate::rules::engine;
use crate::rules::validator::validate_new_game;
use crate::store::SnapshotStore;

/// The single active game session.
pub struct Session<G, R, I, C> {
    games: G,
    rules: R,
    ids: I,
    clock: C,
}

impl<G, R, I, C> Session<G, R, I, C>
where
    G: SnapshotStore<Game>,
    R: SnapshotStore<GameRules>,
    I: IdSource,
    C: Clock,
{
    pub fn new(games: G, rules: R, ids: I, clock: C) -> Self {
        Self { games, rules, ids, clock }
    }

    /// Split back into the stores and sources.
    pub fn into_parts(self) -> (G, R, I, C) {
        (self.games, self.rules, self.ids, self.clock)
    }

    // === Rules ===

    /// Saved rules, or the defaults when none are saved.
    pub fn load_rules(&self) -> Result<GameRules, DixMilleError> {
        Ok(self.rules.load()?.unwrap_or_default())
    }

    pub fn save_rules(&mut self, rules: &GameRules) -> Result<(), DixMilleError> {
        self.rules.save(rules)?;
        info!(target_score = rules.target_score(), "rules saved");
        Ok(())
    }

    /// Forget saved rules, falling back to the defaults.
    pub fn reset_rules(&mut self) -> Result<(), DixMilleError> {
        self.rules.delete()?;
        Ok(())
    }

    // === Game lifecycle ===

    /// Start a new game, replacing any current one.
    ///
    /// Uses the saved rules, with `target_score` overriding their target
    /// when given. Names are trimmed; the first player's turn is started.
    pub fn create_game<S: AsRef<str>>(
        &mut self,
        player_names: &[S],
        target_score: Option<u32>,
    ) -> Result<Game, DixMilleError> {
        let mut rules = self.load_rules()?;
        if let Some(target) = target_score {
            rules = rules.with_target_score(target)?;
        }
        validate_new_game(player_names, &rules).inspect_err(|e| warn!(error = %e, "game creation rejected"))?;

        let players = player_names
            .iter()
            .map(|name| Player::new(self.ids.next_id(), name.as_ref().trim()))
            .collect();
        let game_id = self.ids.next_id();
        let game = Game::new(game_id, players, rules, self.clock.now_millis())?
            .start_current_turn(self.ids.next_id());

        self.games.save(&game)?;
        info!(
            game = game.id(),
            players = game.players().len(),
            target_score = game.target_score(),
            "game created"
        );
        Ok(game)
    }

    /// The current game.
    pub fn current_game(&self) -> Result<Game, DixMilleError> {
        self.games.load()?.ok_or(DixMilleError::GameNotFound)
    }

    pub fn has_game(&self) -> bool {
        self.games.exists()
    }

    pub fn delete_game(&mut self) -> Result<(), DixMilleError> {
        self.games.delete()?;
        info!("game deleted");
        Ok(())
    }

    // === Player actions ===

    /// Apply `action` for `player` and persist the result.
    pub fn act(&mut self, player: &PlayerId, action: PlayerAction) -> Result<Game, DixMilleError> {
        let game = self.current_game()?;
        self.apply(game, player, action)
    }

    /// Apply `action` for whoever is current.
    fn act_as_current(&mut self, action: PlayerAction) -> Result<Game, DixMilleError> {
        let game = self.current_game()?;
        let current = game.current_player().id.clone();
        self.apply(game, &current, action)
    }

    fn apply(&mut self, game: Game, player: &PlayerId, action: PlayerAction) -> Result<Game, DixMilleError> {
        let ends_turn = action.ends_turn();
        let next = engine::apply_action(game, player, action, &mut self.ids)
            .inspect_err(|e| warn!(player = %player, error = %e, "action rejected"))?;
        self.games.save(&next)?;

        if ends_turn && !next.is_ended() {
            debug!(from = %player, to = %next.current_player().id, "turn passed");
        }
        Ok(next)
    }

    pub fn add_score_entry(
        &mut self,
        points: u32,
        score_type: ScoreType,
        label: Option<String>,
    ) -> Result<Game, DixMilleError> {
        self.act_as_current(PlayerAction::AddScore { points, score_type, label })
    }

    /// Add a preset roll, labelled from the catalogue.
    pub fn add_preset_score(&mut self, points: u32) -> Result<Game, DixMilleError> {
        let label = crate::core::preset_for(points).map(|p| p.label.to_string());
        self.add_score_entry(points, ScoreType::Preset, label)
    }

    pub fn add_custom_score(&mut self, points: u32) -> Result<Game, DixMilleError> {
        self.add_score_entry(points, ScoreType::Custom, None)
    }

    pub fn undo_last_entry(&mut self) -> Result<Game, DixMilleError> {
        self.act_as_current(PlayerAction::UndoEntry)
    }

    pub fn commit_turn(&mut self) -> Result<Game, DixMilleError> {
        self.act_as_current(PlayerAction::Commit)
    }

    pub fn bust_turn(&mut self) -> Result<Game, DixMilleError> {
        self.act_as_current(PlayerAction::Bust)
    }

    pub fn skip_turn(&mut self) -> Result<Game, DixMilleError> {
        self.act_as_current(PlayerAction::Skip)
    }

    /// Undo the most recent history record. Allowed after the game ended.
    pub fn undo_last_turn(&mut self) -> Result<Game, DixMilleError> {
        let game = self.current_game()?;
        let next = engine::undo_last_turn(game, &mut self.ids)
            .inspect_err(|e| warn!(error = %e, "undo rejected"))?;
        self.games.save(&next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedClock, SeededIds};
    use crate::error::{StoreError, ValidationError};
    use crate::store::MemoryStore;

    type TestSession = Session<MemoryStore<Game>, MemoryStore<GameRules>, SeededIds, FixedClock>;

    fn session() -> TestSession {
        Session::new(MemoryStore::new(), MemoryStore::new(), SeededIds::new(9), FixedClock(42))
    }

    /// Store that accepts reads but refuses writes once armed.
    struct FlakyStore {
        inner: MemoryStore<Game>,
        fail_saves: bool,
    }

    impl SnapshotStore<Game> for FlakyStore {
        fn save(&mut self, value: &Game) -> Result<(), StoreError> {
            if self.fail_saves {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "read-only").into());
            }
            self.inner.save(value)
        }

        fn load(&self) -> Result<Option<Game>, StoreError> {
            self.inner.load()
        }

        fn delete(&mut self) -> Result<(), StoreError> {
            self.inner.delete()
        }

        fn exists(&self) -> bool {
            self.inner.exists()
        }
    }

    #[test]
    fn test_create_game() {
        let mut session = session();
        let game = session.create_game(&[" Alice ", "Bob"], Some(5000)).unwrap();

        assert_eq!(game.players()[0].name, "Alice");
        assert_eq!(game.target_score(), 5000);
        assert_eq!(game.rules().target_score(), 5000);
        assert_eq!(game.created_at(), 42);
        assert!(game.players()[0].has_active_turn());
        assert!(session.has_game());
        assert_eq!(session.current_game().unwrap(), game);
    }

    #[test]
    fn test_create_uses_saved_rules() {
        let mut session = session();
        let rules = GameRules::builder().entry_minimum_score(0).player_range(3, 4).build().unwrap();
        session.save_rules(&rules).unwrap();

        let err = session.create_game(&["A", "B"], None).unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::InvalidPlayerCount { count: 2, min: 3, max: 4 })
        );

        let game = session.create_game(&["A", "B", "C"], None).unwrap();
        assert_eq!(game.rules().entry_minimum_score(), 0);

        session.reset_rules().unwrap();
        assert_eq!(session.load_rules().unwrap(), GameRules::default());
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let mut session = session();
        assert!(matches!(
            session.create_game(&["A", ""], None),
            Err(DixMilleError::Validation(ValidationError::BlankPlayerName))
        ));
        assert!(matches!(session.create_game(&["A", "B"], Some(0)), Err(DixMilleError::Rules(_))));
        assert!(!session.has_game());
    }

    #[test]
    fn test_no_game_is_not_found() {
        let mut session = session();
        assert!(matches!(session.current_game(), Err(DixMilleError::GameNotFound)));
        assert!(matches!(session.commit_turn(), Err(DixMilleError::GameNotFound)));
        assert!(matches!(session.undo_last_turn(), Err(DixMilleError::GameNotFound)));
    }

    #[test]
    fn test_rejected_action_keeps_snapshot() {
        let mut session = session();
        session.create_game(&["A", "B"], None).unwrap();
        session.add_preset_score(400).unwrap();
        let before = session.current_game().unwrap();

        let err = session.commit_turn().unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::InsufficientPointsToEnter { minimum: 500 }));
        assert_eq!(session.current_game().unwrap(), before);
    }

    #[test]
    fn test_act_for_wrong_player() {
        let mut session = session();
        let game = session.create_game(&["A", "B"], None).unwrap();
        let bob = game.players()[1].id.clone();

        let err = session.act(&bob, PlayerAction::Skip).unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::NotPlayersTurn { player_id: bob }));
    }

    #[test]
    fn test_persistence_failure_surfaces_and_keeps_snapshot() {
        let mut session = Session::new(
            FlakyStore { inner: MemoryStore::new(), fail_saves: false },
            MemoryStore::new(),
            SeededIds::new(1),
            FixedClock(0),
        );
        session.create_game(&["A", "B"], None).unwrap();
        let before = session.current_game().unwrap();

        session.games.fail_saves = true;
        let err = session.skip_turn().unwrap_err();
        assert!(matches!(err, DixMilleError::Persistence(StoreError::Io(_))));
        assert!(err.as_validation().is_none());
        assert_eq!(session.current_game().unwrap(), before);
    }

    /// Store that counts reads.
    struct CountingStore {
        inner: MemoryStore<Game>,
        loads: std::cell::Cell<usize>,
    }

    impl SnapshotStore<Game> for CountingStore {
        fn save(&mut self, value: &Game) -> Result<(), StoreError> {
            self.inner.save(value)
        }

        fn load(&self) -> Result<Option<Game>, StoreError> {
            self.loads.set(self.loads.get() + 1);
            self.inner.load()
        }

        fn delete(&mut self) -> Result<(), StoreError> {
            self.inner.delete()
        }

        fn exists(&self) -> bool {
            self.inner.exists()
        }
    }

    #[test]
    fn test_each_action_loads_once() {
        let mut session = Session::new(
            CountingStore { inner: MemoryStore::new(), loads: std::cell::Cell::new(0) },
            MemoryStore::new(),
            SeededIds::new(3),
            FixedClock(0),
        );
        session.create_game(&["A", "B"], None).unwrap();
        let start = session.games.loads.get();

        session.add_preset_score(500).unwrap();
        assert_eq!(session.games.loads.get(), start + 1);
        session.commit_turn().unwrap();
        assert_eq!(session.games.loads.get(), start + 2);
        session.skip_turn().unwrap();
        assert_eq!(session.games.loads.get(), start + 3);
        session.undo_last_turn().unwrap();
        assert_eq!(session.games.loads.get(), start + 4);
    }

    #[test]
    fn test_turn_ending_actions_pass_the_seat() {
        let mut session = session();
        let game = session.create_game(&["A", "B"], None).unwrap();
        let a = game.players()[0].id.clone();

        let game = session.act(&a, PlayerAction::preset(500)).unwrap();
        assert_eq!(game.current_player().id, a);
        let game = session.act(&a, PlayerAction::UndoEntry).unwrap();
        assert_eq!(game.current_player().id, a);

        for action in [PlayerAction::Skip, PlayerAction::Bust] {
            assert!(action.ends_turn());
            let before = session.current_game().unwrap().current_player().id.clone();
            let game = session.act(&before, action).unwrap();
            assert_ne!(game.current_player().id, before);
        }
        assert_eq!(session.current_game().unwrap().current_player().id, a);
    }

    #[test]
    fn test_delete_game() {
        let mut session = session();
        session.create_game(&["A", "B"], None).unwrap();
        session.delete_game().unwrap();
        assert!(!session.has_game());
    }

    #[test]
    fn test_preset_label_attached() {
        let mut session = session();
        session.create_game(&["A", "B"], None).unwrap();
        let game = session.add_preset_score(150).unwrap();
        let turn = game.current_player().current_turn.clone().unwrap();
        assert_eq!(turn.entries[0].label.as_deref(), Some("1 + 5"));
    }
}
