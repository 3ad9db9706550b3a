//! Snapshot persistence: sessions over JSON files and the wire format.

use dix_mille::core::{FixedClock, SeededIds};
use dix_mille::session::Session;
use dix_mille::store::{JsonFileStore, MemoryStore, SnapshotStore};
use dix_mille::{DixMilleError, Game, GamePhase, GameRules, StoreError, TurnOutcome};

type FileSession = Session<JsonFileStore<Game>, JsonFileStore<GameRules>, SeededIds, FixedClock>;

fn file_session(dir: &std::path::Path, seed: u64) -> FileSession {
    Session::new(
        JsonFileStore::new(dir.join("game.json")),
        JsonFileStore::new(dir.join("rules.json")),
        SeededIds::new(seed),
        FixedClock(1_700_000_000_000),
    )
}

// =============================================================================
// File-backed sessions
// =============================================================================

#[test]
fn test_game_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let saved = {
        let mut session = file_session(dir.path(), 1);
        session.create_game(&["Alice", "Bob", "Carol"], Some(2000)).unwrap();
        session.add_preset_score(500).unwrap();
        session.add_preset_score(150).unwrap();
        session.commit_turn().unwrap();
        session.bust_turn().unwrap();
        session.add_custom_score(75).unwrap()
    };

    let session = file_session(dir.path(), 2);
    let loaded = session.current_game().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.target_score(), 2000);
    assert_eq!(loaded.players()[0].total_score, 650);
    assert_eq!(loaded.players()[1].consecutive_busts, 1);
    assert_eq!(loaded.current_player().turn_total(), 75);
}

#[test]
fn test_rules_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let rules = GameRules::builder()
        .entry_minimum_score(0)
        .consecutive_busts_for_penalty(2)
        .enable_final_round(false)
        .build()
        .unwrap();

    file_session(dir.path(), 1).save_rules(&rules).unwrap();

    let mut session = file_session(dir.path(), 1);
    assert_eq!(session.load_rules().unwrap(), rules);

    session.reset_rules().unwrap();
    assert_eq!(session.load_rules().unwrap(), GameRules::default());
}

#[test]
fn test_missing_game_file() {
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(dir.path(), 1);

    assert!(!session.has_game());
    assert!(matches!(session.current_game(), Err(DixMilleError::GameNotFound)));
}

#[test]
fn test_corrupt_game_file_is_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("game.json"), b"[1, 2").unwrap();

    let session = file_session(dir.path(), 1);
    let err = session.current_game().unwrap_err();
    assert!(matches!(err, DixMilleError::Persistence(StoreError::Serialization(_))));
}

#[test]
fn test_inconsistent_snapshot_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = file_session(dir.path(), 1);
    session.create_game(&["Alice", "Bob"], None).unwrap();

    let path = dir.path().join("game.json");
    let text = std::fs::read_to_string(&path).unwrap();
    let broken = text.replace("\"currentPlayerIndex\": 0", "\"currentPlayerIndex\": 7");
    assert_ne!(text, broken);
    std::fs::write(&path, broken).unwrap();

    assert!(matches!(
        session.current_game(),
        Err(DixMilleError::Persistence(StoreError::Serialization(_)))
    ));
}

// =============================================================================
// Wire format
// =============================================================================

#[test]
fn test_snapshot_field_names() {
    let mut session = Session::new(MemoryStore::<Game>::new(), MemoryStore::<GameRules>::new(), SeededIds::new(5), FixedClock(99));
    session.create_game(&["Alice", "Bob"], Some(1000)).unwrap();
    session.add_preset_score(1000).unwrap();
    session.commit_turn().unwrap();
    let game = session.add_custom_score(50).unwrap();
    assert_eq!(game.phase(), GamePhase::FinalRound);

    let json: serde_json::Value = serde_json::to_value(&game).unwrap();

    assert_eq!(json["gamePhase"], "FINAL_ROUND");
    assert_eq!(json["targetScore"], 1000);
    assert_eq!(json["roundNumber"], 1);
    assert_eq!(json["createdAt"], 99);
    assert_eq!(json["triggeringPlayerId"], json["players"][0]["id"]);
    assert_eq!(json["rules"]["entryMinimumScore"], 500);
    assert_eq!(json["rules"]["enableFinalRound"], true);

    let alice = &json["players"][0];
    assert_eq!(alice["name"], "Alice");
    assert_eq!(alice["totalScore"], 1000);
    assert_eq!(alice["hasEnteredGame"], true);
    assert_eq!(alice["hasPlayedFinalRound"], true);
    assert!(alice["currentTurn"].is_null());

    let entry = &json["players"][1]["currentTurn"]["entries"][0];
    assert_eq!(entry["type"], "CUSTOM");
    assert_eq!(entry["points"], 50);
    assert_eq!(json["players"][1]["currentTurn"]["isBusted"], false);

    let record = &json["turnHistory"][0];
    assert_eq!(record["outcome"], "SCORED");
    assert_eq!(record["previousScore"], 0);
    assert_eq!(record["roundNumber"], 1);

    let back: Game = serde_json::from_value(json).unwrap();
    assert_eq!(back, game);
}

#[test]
fn test_player_defaults_when_fields_missing() {
    let json = serde_json::json!({
        "id": "g",
        "players": [
            { "id": "a", "name": "Alice" },
            { "id": "b", "name": "Bob", "totalScore": 500, "hasEnteredGame": true }
        ],
        "targetScore": 10000,
        "currentPlayerIndex": 1,
        "gamePhase": "IN_PROGRESS",
        "triggeringPlayerId": null,
        "createdAt": 0,
        "turnHistory": [
            { "roundNumber": 1, "playerId": "a", "points": 0, "outcome": "SKIP", "previousScore": 0 }
        ],
        "roundNumber": 1,
        "rules": {
            "targetScore": 10000,
            "entryMinimumScore": 500,
            "consecutiveBustsForPenalty": 3,
            "minPlayers": 2,
            "maxPlayers": 6,
            "enableBustPenalty": true,
            "enableFinalRound": true
        }
    });

    let game: Game = serde_json::from_value(json).unwrap();
    assert_eq!(game.players()[0].total_score, 0);
    assert!(game.players()[0].current_turn.is_none());
    assert_eq!(game.players()[1].total_score, 500);
    assert_eq!(game.current_player().name, "Bob");
    assert_eq!(game.last_turn().map(|r| r.outcome), Some(TurnOutcome::Skip));
}

#[test]
fn test_invalid_rules_rejected_on_load() {
    let json = serde_json::json!({
        "targetScore": 10000,
        "entryMinimumScore": 500,
        "consecutiveBustsForPenalty": 3,
        "minPlayers": 4,
        "maxPlayers": 2,
        "enableBustPenalty": true,
        "enableFinalRound": true
    });
    assert!(serde_json::from_value::<GameRules>(json).is_err());
}

#[test]
fn test_memory_and_file_stores_agree() {
    let mut session = Session::new(MemoryStore::<Game>::new(), MemoryStore::<GameRules>::new(), SeededIds::new(8), FixedClock(0));
    session.create_game(&["Alice", "Bob"], None).unwrap();
    session.add_preset_score(1000).unwrap();
    let game = session.commit_turn().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut file: JsonFileStore<Game> = JsonFileStore::new(dir.path().join("copy.json"));
    file.save(&game).unwrap();

    let (memory, _, _, _) = session.into_parts();
    assert_eq!(memory.load().unwrap(), file.load().unwrap());
}
