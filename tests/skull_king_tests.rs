//! Skull King engine integration tests.
//!
//! Rounds are lock-step: bids and results only land on the current round,
//! and the next round opens when the last active player's result is in.

use pretty_assertions::assert_eq;

use tallykeep::core::{GameRng, PlayerId};
use tallykeep::games::skull_king::ROUND_COUNT;
use tallykeep::{EngineError, SkullKingGame, SkullKingSettings};

fn table(names: &[&str]) -> (SkullKingGame, Vec<PlayerId>) {
    let mut game = SkullKingGame::with_rng(SkullKingSettings::default(), GameRng::new(42));
    let ids = names
        .iter()
        .map(|name| game.add_player(*name).unwrap())
        .collect();
    (game, ids)
}

fn score_round(game: &mut SkullKingGame, results: &[(PlayerId, i64, i64, i64)]) {
    for (id, bid, _, _) in results {
        game.set_bid(*id, *bid).unwrap();
    }
    for (id, _, made, bonus) in results {
        game.record_result(*id, *made, *bonus).unwrap();
    }
}

#[test]
fn test_round_zero_is_open_from_the_start() {
    let (game, ids) = table(&["Alice", "Bob"]);
    for id in ids {
        assert!(game.roster().get(id).unwrap().ext.rounds[0].started);
    }
    assert_eq!(game.current_round(), 0);
}

#[test]
fn test_rounds_advance_in_lock_step() {
    let (mut game, ids) = table(&["Alice", "Bob", "Carol"]);
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    score_round(&mut game, &[(a, 1, 1, 0), (b, 0, 0, 0), (c, 1, 0, 0)]);
    assert_eq!(game.current_round(), 1);

    // Round 2 sheets open for everyone, round 3 for no one.
    for id in [a, b, c] {
        let rounds = game.roster().get(id).unwrap().ext.rounds;
        assert!(rounds[1].started);
        assert!(!rounds[2].started);
    }
}

#[test]
fn test_future_rounds_are_closed_to_bids() {
    let (mut game, ids) = table(&["Alice", "Bob"]);
    game.set_bid(ids[0], 1).unwrap();
    game.record_result(ids[0], 1, 0).unwrap();

    // Alice finished round 1; round 2 is not open until Bob does too.
    assert_eq!(
        game.record_result(ids[0], 1, 0),
        Err(EngineError::RoundComplete { round: 0 })
    );
}

#[test]
fn test_scoring_table() {
    let (mut game, ids) = table(&["Alice", "Bob", "Carol", "Dave"]);
    let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

    // Round 1: exact non-zero bid, missed bid, kept zero bid, broken zero bid.
    score_round(
        &mut game,
        &[(a, 2, 2, 0), (b, 2, 0, 0), (c, 0, 0, 0), (d, 0, 1, 0)],
    );

    assert_eq!(game.roster().get(a).unwrap().score, 40);
    assert_eq!(game.roster().get(b).unwrap().score, -20);
    assert_eq!(game.roster().get(c).unwrap().score, 10);
    assert_eq!(game.roster().get(d).unwrap().score, -10);

    // Round 2: zero-bid stakes scale with the round number.
    score_round(
        &mut game,
        &[(a, 0, 0, 0), (b, 0, 2, 0), (c, 1, 1, 20), (d, 1, 0, 0)],
    );

    assert_eq!(game.roster().get(a).unwrap().score, 40 + 20);
    assert_eq!(game.roster().get(b).unwrap().score, -20 - 20);
    assert_eq!(game.roster().get(c).unwrap().score, 10 + 40);
    assert_eq!(game.roster().get(d).unwrap().score, -10 - 10);
}

#[test]
fn test_all_bids_set_probe() {
    let (mut game, ids) = table(&["Alice", "Bob"]);
    assert!(!game.all_bids_set());

    game.set_bid(ids[0], 1).unwrap();
    assert!(!game.all_bids_set());
    game.set_bid(ids[1], 0).unwrap();
    assert!(game.all_bids_set());
}

#[test]
fn test_deactivated_player_does_not_block_the_table() {
    let (mut game, ids) = table(&["Alice", "Bob", "Carol"]);
    game.toggle_active(ids[2]).unwrap();

    score_round(&mut game, &[(ids[0], 1, 1, 0), (ids[1], 1, 1, 0)]);
    assert_eq!(game.current_round(), 1);
}

#[test]
fn test_ten_rounds_then_finished() {
    let (mut game, ids) = table(&["Alice", "Bob"]);

    for round in 0..ROUND_COUNT {
        assert!(!game.finished());
        score_round(&mut game, &[(ids[0], 0, 0, 0), (ids[1], 1, 1, 0)]);
        if round < ROUND_COUNT - 1 {
            assert_eq!(game.current_round(), round + 1);
        }
    }

    assert!(game.finished());
    assert_eq!(game.current_round(), ROUND_COUNT - 1);

    // Zero bids every round: 10 + 20 + ... + 100.
    assert_eq!(game.roster().get(ids[0]).unwrap().score, 550);
    assert_eq!(game.roster().get(ids[1]).unwrap().score, 200);
}

#[test]
fn test_reset_returns_to_round_one() {
    let (mut game, ids) = table(&["Alice", "Bob"]);
    score_round(&mut game, &[(ids[0], 1, 1, 0), (ids[1], 0, 0, 0)]);
    game.reset_scores();

    assert_eq!(game.current_round(), 0);
    for id in ids {
        let player = game.roster().get(id).unwrap();
        assert_eq!(player.score, 0);
        assert!(player.ext.rounds[0].started);
        assert!(!player.ext.rounds[0].complete);
        assert!(!player.ext.rounds[1].started);
    }
}

#[test]
fn test_standings_track_scores() {
    let (mut game, ids) = table(&["Alice", "Bob"]);
    score_round(&mut game, &[(ids[0], 1, 0, 0), (ids[1], 1, 1, 0)]);

    let names: Vec<_> = game.standings().iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["Bob".to_string(), "Alice".to_string()]);
}
