//! Trigger system integration tests.
//!
//! These drive the dispatcher through a full session: engine operations
//! emit events, the session drains them into the dispatcher, and the
//! recording runner stands in for the Action Executor.

use tallykeep::core::GameRng;
use tallykeep::{
    BindingOutcome, EventKind, FarkleGame, FarkleSettings, GameSession, GenericGame,
    GenericSettings, MemoryStore, RecordingRunner,
};

fn catalog() -> Vec<(String, String)> {
    vec![
        ("script.flash_lights".to_string(), "Flash Lights".to_string()),
        ("script.fanfare".to_string(), "Fanfare".to_string()),
        ("script.sad_trombone".to_string(), "Sad Trombone".to_string()),
    ]
}

fn generic_session() -> (
    GameSession<GenericGame, MemoryStore, RecordingRunner>,
    RecordingRunner,
) {
    let runner = RecordingRunner::new();
    let engine = GenericGame::with_rng(GenericSettings::default(), GameRng::new(42));
    let mut session = GameSession::new(engine, MemoryStore::new(), runner.clone());
    session.refresh_catalog(catalog());
    for entity_id in ["script.flash_lights", "script.fanfare", "script.sad_trombone"] {
        session.set_action_active(entity_id, true);
    }
    (session, runner)
}

#[test]
fn test_starting_player_binding_fires_exactly_once() {
    let (mut session, runner) = generic_session();
    assert!(session
        .add_binding(EventKind::FirstPlayerSelected, "Flash Lights", None)
        .is_added());

    session.apply(|game| game.add_player("Alice")).unwrap();
    let bob = session.apply(|game| game.add_player("Bob")).unwrap();
    runner.take_calls();

    session
        .apply(|game| game.set_starting_player(bob))
        .unwrap();

    assert_eq!(runner.calls(), vec!["script.flash_lights"]);
}

#[test]
fn test_duplicate_binding_rejected_without_data_loss() {
    let (mut session, _) = generic_session();
    assert!(session
        .add_binding(EventKind::FirstPlayerSelected, "Flash Lights", None)
        .is_added());

    let outcome = session.add_binding(EventKind::FirstPlayerSelected, "Fanfare", None);
    assert_eq!(outcome, BindingOutcome::Duplicate);

    let bindings = session.bindings();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].action, "Flash Lights");
}

#[test]
fn test_score_reached_bindings_with_distinct_amounts() {
    let (mut session, runner) = generic_session();
    assert!(session
        .add_binding(EventKind::TargetScoreReached, "Fanfare", Some(50))
        .is_added());
    assert!(session
        .add_binding(EventKind::TargetScoreReached, "Flash Lights", Some(100))
        .is_added());
    assert_eq!(
        session.add_binding(EventKind::TargetScoreReached, "Sad Trombone", Some(50)),
        BindingOutcome::Duplicate
    );

    let alice = session.apply(|game| game.add_player("Alice")).unwrap();
    session.apply(|game| game.select_player(alice)).unwrap();
    runner.take_calls();

    session.apply(|game| game.commit_score(75)).unwrap();
    assert_eq!(runner.take_calls(), vec!["script.fanfare"]);

    session.apply(|game| game.select_player(alice)).unwrap();
    session.apply(|game| game.commit_score(150)).unwrap();
    assert_eq!(
        runner.take_calls(),
        vec!["script.fanfare", "script.flash_lights"]
    );
}

#[test]
fn test_farkle_strike_bindings() {
    let runner = RecordingRunner::new();
    let engine = FarkleGame::with_rng(
        FarkleSettings {
            auto_advance_on_score_update: false,
            ..FarkleSettings::default()
        },
        GameRng::new(42),
    );
    let mut session = GameSession::new(engine, MemoryStore::new(), runner.clone());
    session.refresh_catalog(catalog());
    session.set_action_active("script.sad_trombone", true);
    assert!(session
        .add_binding(EventKind::ThreeFarklesRolled, "Sad Trombone", None)
        .is_added());

    let alice = session.apply(|game| game.add_player("Alice")).unwrap();
    session.apply(|game| game.select_player(alice)).unwrap();
    session
        .apply(|game| game.commit_score(1_000, false))
        .unwrap();
    runner.take_calls();

    session.apply(|game| game.bust()).unwrap();
    session.apply(|game| game.bust()).unwrap();
    assert!(runner.calls().is_empty());

    session.apply(|game| game.bust()).unwrap();
    assert_eq!(runner.calls(), vec!["script.sad_trombone"]);
}

#[test]
fn test_inactive_catalog_entry_is_not_run() {
    let (mut session, runner) = generic_session();
    session.set_action_active("script.fanfare", false);
    assert!(session
        .add_binding(EventKind::PlayerAdded, "Fanfare", None)
        .is_added());

    session.apply(|game| game.add_player("Alice")).unwrap();
    assert!(runner.calls().is_empty());
}

#[test]
fn test_removed_binding_stops_firing() {
    let (mut session, runner) = generic_session();
    let BindingOutcome::Added(id) =
        session.add_binding(EventKind::PlayerAdded, "Fanfare", None)
    else {
        panic!("binding not added");
    };

    session.apply(|game| game.add_player("Alice")).unwrap();
    assert_eq!(runner.take_calls(), vec!["script.fanfare"]);

    assert!(session.remove_binding(id));
    session.apply(|game| game.add_player("Bob")).unwrap();
    assert!(runner.calls().is_empty());
}

#[test]
fn test_available_kinds_shrink_as_bindings_are_added() {
    let (mut session, _) = generic_session();
    let before = session.available_kinds();
    assert!(before.contains(&EventKind::PlayerAdded));

    session.add_binding(EventKind::PlayerAdded, "Fanfare", None);
    let after = session.available_kinds();
    assert!(!after.contains(&EventKind::PlayerAdded));
    // The threshold kind stays on offer: distinct amounts may be added.
    session.add_binding(EventKind::TargetScoreReached, "Fanfare", Some(10));
    assert!(session
        .available_kinds()
        .contains(&EventKind::TargetScoreReached));
}

#[test]
fn test_bindings_survive_a_new_session_on_the_same_store() {
    let store = MemoryStore::new();
    let runner = RecordingRunner::new();
    {
        let engine = GenericGame::with_rng(GenericSettings::default(), GameRng::new(1));
        let mut session = GameSession::new(engine, store.clone(), runner.clone());
        session.refresh_catalog(catalog());
        session.set_action_active("script.flash_lights", true);
        session.add_binding(EventKind::PlayerAdded, "Flash Lights", None);
    }

    let engine = GenericGame::with_rng(GenericSettings::default(), GameRng::new(2));
    let mut session = GameSession::new(engine, store, runner.clone());
    assert_eq!(session.bindings().len(), 1);

    session.apply(|game| game.add_player("Alice")).unwrap();
    assert_eq!(runner.calls(), vec!["script.flash_lights"]);
}
