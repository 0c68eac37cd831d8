//! Farkle engine.
//!
//! Scores accumulate per turn as combo points in a pending total, then get
//! banked into the player's score. A bust ("farkle") wipes the pending total
//! and adds a strike; three strikes in a row cost a penalty.

use serde::{Deserialize, Serialize};

use crate::core::{GameLog, GameRng, PlayDirection, Player, PlayerId, Roster};
use crate::error::EngineError;
use crate::session::ScoringEngine;
use crate::settings::FarkleSettings;
use crate::triggers::{EventBatch, EventKind, GameEvent, Variant};

/// Per-player Farkle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarkleHand {
    /// Consecutive busts without a positive commit. Capped at 3 by the
    /// penalty reset.
    pub strikes: u8,

    /// Whether the player has banked their first qualifying score.
    pub has_started: bool,
}

/// Persisted Farkle state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FarkleSnapshot {
    /// Roster and turn pointer.
    pub roster: Roster<FarkleHand>,
    /// Session log.
    pub log: GameLog,
    /// Current play direction.
    pub direction: PlayDirection,
    /// Player whose turn is being scored, if any.
    pub selected: Option<PlayerId>,
    /// Pending (unbanked) points for the turn in progress.
    pub pending: i64,
}

/// Scoring engine for Farkle.
pub struct FarkleGame {
    settings: FarkleSettings,
    roster: Roster<FarkleHand>,
    log: GameLog,
    direction: PlayDirection,
    selected: Option<PlayerId>,
    pending: i64,
    rng: GameRng,
    events: EventBatch,
}

impl FarkleGame {
    /// Create a fresh session with the given settings.
    #[must_use]
    pub fn new(settings: FarkleSettings) -> Self {
        Self::with_rng(settings, GameRng::from_entropy())
    }

    /// Create a session with a seeded RNG, for deterministic tests.
    #[must_use]
    pub fn with_rng(settings: FarkleSettings, rng: GameRng) -> Self {
        Self {
            settings,
            roster: Roster::new(),
            log: GameLog::new(),
            direction: PlayDirection::Clockwise,
            selected: None,
            pending: 0,
            rng,
            events: EventBatch::new(),
        }
    }

    /// Current rule parameters.
    #[must_use]
    pub fn settings(&self) -> &FarkleSettings {
        &self.settings
    }

    /// Replace the rule parameters.
    pub fn set_settings(&mut self, settings: FarkleSettings) {
        self.settings = settings;
    }

    /// The roster.
    #[must_use]
    pub fn roster(&self) -> &Roster<FarkleHand> {
        &self.roster
    }

    /// The session log.
    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// The player whose turn is being scored.
    #[must_use]
    pub fn selected(&self) -> Option<&Player<FarkleHand>> {
        self.selected.and_then(|id| self.roster.get(id))
    }

    /// Pending (unbanked) points for the turn in progress.
    #[must_use]
    pub fn pending(&self) -> i64 {
        self.pending
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Add a player. Farkle players always start on 0.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, EngineError> {
        let id = self.roster.add(name, 0, FarkleHand::default())?;
        let name = self.roster.get(id).map(|p| p.name.clone()).unwrap_or_default();
        self.log.push(format!("Added player {name}"));
        self.emit(GameEvent::new(Variant::Farkle, EventKind::PlayerAdded).with_player(id));
        Ok(id)
    }

    /// Point the turn (and the score editor) at a player.
    pub fn select_player(&mut self, id: PlayerId) -> Result<(), EngineError> {
        self.roster.select(id)?;
        self.selected = Some(id);
        let name = &self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.name;
        self.log.push(format!("It's your turn, {name}"));
        Ok(())
    }

    /// Rename a player.
    pub fn rename_player(&mut self, id: PlayerId, name: impl Into<String>) -> Result<(), EngineError> {
        let name = name.into();
        let old = self
            .roster
            .get(id)
            .ok_or(EngineError::UnknownPlayer(id))?
            .name
            .clone();
        self.roster.rename(id, name.clone())?;
        self.log.push(format!("{old} changed name to {name}"));
        Ok(())
    }

    /// Add points to the pending total.
    pub fn add_pending(&mut self, amount: i64) {
        self.pending += amount;
    }

    fn combo(&mut self, kind: EventKind, value: i64) {
        self.add_pending(value);
        let player = self.selected;
        let mut event = GameEvent::new(Variant::Farkle, kind).with_amount(value);
        if let Some(id) = player {
            event = event.with_player(id);
        }
        self.emit(event);
    }

    /// Score four of a kind: 1000 pending points.
    pub fn four_of_a_kind(&mut self) {
        self.combo(EventKind::FourOfAKind, 1_000);
    }

    /// Score five of a kind: 2000 pending points.
    pub fn five_of_a_kind(&mut self) {
        self.combo(EventKind::FiveOfAKind, 2_000);
    }

    /// Score six of a kind: 3000 pending points.
    pub fn six_of_a_kind(&mut self) {
        self.combo(EventKind::SixOfAKind, 3_000);
    }

    /// Score a straight: 1500 pending points.
    pub fn straight(&mut self) {
        self.combo(EventKind::Straight, 1_500);
    }

    /// Score three pairs: 1500 pending points.
    pub fn three_pairs(&mut self) {
        self.combo(EventKind::ThreePairs, 1_500);
    }

    /// Score two triplets: 2500 pending points.
    pub fn two_triplets(&mut self) {
        self.combo(EventKind::TwoTriplets, 2_500);
    }

    /// Whether the minimum-points-to-start rule still blocks the selected
    /// player from banking the pending total.
    #[must_use]
    pub fn starting_score_not_met(&self) -> bool {
        let Some(player) = self.selected() else {
            return false;
        };
        self.settings.minimum_points_to_start > 0
            && !player.ext.has_started
            && player.score == 0
            && self.pending < self.settings.minimum_points_to_start
    }

    /// Bank points into the selected player's score.
    ///
    /// A positive amount clears outstanding strikes and marks the player as
    /// started. Emits increase/decrease against the pre-commit score and the
    /// threshold event when the new total crosses the target. Resets the
    /// pending total unless the player rolled hot dice and keeps going.
    pub fn commit_score(&mut self, amount: i64, hot_dice: bool) -> Result<(), EngineError> {
        let id = self.selected.ok_or(EngineError::NoPlayerSelected)?;
        let allow_negative = self.settings.allow_negative_scores;
        let target = self.settings.target_score;

        let mut amount = amount;
        if amount < 0 && !allow_negative {
            amount = 0;
        }

        let (previous, cleared_strikes, name) = {
            let player = self.roster.get_mut(id).ok_or(EngineError::UnknownPlayer(id))?;
            let cleared = if amount > 0 {
                let had_strikes = player.ext.strikes > 0;
                player.ext.strikes = 0;
                player.ext.has_started = true;
                had_strikes
            } else {
                false
            };

            let previous = player.score;
            let mut new_score = previous + amount;
            if new_score < 0 && !allow_negative {
                new_score = 0;
            }
            player.score = new_score;
            (previous, cleared, player.name.clone())
        };
        let new_score = self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.score;

        if cleared_strikes {
            self.log.push(format!("{name} cleared their farkles"));
            self.emit(GameEvent::new(Variant::Farkle, EventKind::FarkleCleared).with_player(id));
        }
        self.log.push(format!("{name} scored {amount}"));

        match new_score.cmp(&previous) {
            std::cmp::Ordering::Greater => self.emit(
                GameEvent::new(Variant::Farkle, EventKind::ScoreIncreased)
                    .with_player(id)
                    .with_amount(new_score - previous),
            ),
            std::cmp::Ordering::Less => self.emit(
                GameEvent::new(Variant::Farkle, EventKind::ScoreDecreased)
                    .with_player(id)
                    .with_amount(previous - new_score),
            ),
            std::cmp::Ordering::Equal => {}
        }
        if previous < target && new_score >= target {
            self.emit(
                GameEvent::new(Variant::Farkle, EventKind::TargetScoreReached)
                    .with_player(id)
                    .with_amount(new_score),
            );
        }

        if !hot_dice {
            self.pending = 0;
        }

        if self.settings.auto_advance_on_score_update {
            self.advance_turn()?;
        }
        Ok(())
    }

    /// Record a farkle (bust) for the selected player.
    ///
    /// A player on zero points cannot bust; the call is a no-op. Otherwise
    /// the pending total is wiped and a strike added, with the third strike
    /// costing the configured penalty and resetting the count.
    pub fn bust(&mut self) -> Result<(), EngineError> {
        let id = self.selected.ok_or(EngineError::NoPlayerSelected)?;
        let allow_negative = self.settings.allow_negative_scores;
        let penalty = self.settings.three_farkle_penalty;

        // You can't farkle someone on zero points.
        if self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.score == 0 {
            return Ok(());
        }

        self.pending = 0;
        let (strikes, name) = {
            let player = self.roster.get_mut(id).ok_or(EngineError::UnknownPlayer(id))?;
            player.ext.strikes += 1;
            (player.ext.strikes, player.name.clone())
        };

        let kind = match strikes {
            1 => EventKind::FarkleRolled,
            2 => EventKind::TwoFarklesRolled,
            _ => EventKind::ThreeFarklesRolled,
        };
        self.log.push(format!("{name} farkled (strike {strikes})"));
        self.emit(GameEvent::new(Variant::Farkle, kind).with_player(id));

        if strikes >= 3 {
            let player = self.roster.get_mut(id).ok_or(EngineError::UnknownPlayer(id))?;
            player.ext.strikes = 0;
            player.score -= penalty;
            if player.score < 0 && !allow_negative {
                player.score = 0;
            }
            self.log
                .push(format!("{name} farkled out for a penalty of {penalty} points!"));
        }

        if self.settings.auto_advance_on_score_update {
            self.advance_turn()?;
        }
        Ok(())
    }

    /// Flip a player's active flag.
    pub fn toggle_active(&mut self, id: PlayerId) -> Result<(), EngineError> {
        let was_current = self.roster.current().is_some_and(|p| p.id == id);
        let active = self.roster.toggle_active(id)?;
        let name = self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.name.clone();
        if active {
            self.log.push(format!("{name} is back!"));
        } else {
            self.log.push(format!("Goodbye, {name}!"));
            self.emit(GameEvent::new(Variant::Farkle, EventKind::PlayerRemoved).with_player(id));
            if was_current && self.roster.has_active() {
                self.advance_turn()?;
            }
        }
        Ok(())
    }

    /// Mark a player as the starting player and point the turn at them.
    pub fn set_starting_player(&mut self, id: PlayerId) -> Result<(), EngineError> {
        self.roster.set_starting_player(id)?;
        let name = &self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.name;
        self.log.push(format!("{name} was set as starting player"));
        self.emit(GameEvent::new(Variant::Farkle, EventKind::FirstPlayerSelected).with_player(id));
        Ok(())
    }

    /// Pick a random starting player.
    pub fn randomise_starting_player(&mut self) -> Result<PlayerId, EngineError> {
        if self.roster.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        self.log.push("Randomising starting player...");
        let index = self.rng.gen_range_usize(0..self.roster.len());
        let id = self.roster.players()[index].id;
        self.set_starting_player(id)?;
        Ok(id)
    }

    /// Reverse the play direction.
    pub fn change_direction(&mut self) {
        self.direction = self.direction.flipped();
        self.log.push(format!("Play direction changed to {}", self.direction));
    }

    /// Move the turn to the next active player.
    pub fn advance_turn(&mut self) -> Result<PlayerId, EngineError> {
        let id = self.roster.advance(self.direction)?;
        self.selected = Some(id);
        let name = &self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.name;
        self.log.push(format!("It's your turn, {name}"));
        self.emit(GameEvent::new(Variant::Farkle, EventKind::TurnStarted).with_player(id));
        Ok(id)
    }

    /// Reset scores, strikes, and started flags.
    pub fn reset_scores(&mut self) {
        for player in self.roster.players_mut() {
            player.score = 0;
            player.ext = FarkleHand::default();
        }
        self.pending = 0;
        self.log.push("Scores were reset");
    }

    /// Players ordered by score, highest first.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player<FarkleHand>> {
        self.roster.standings()
    }

    /// Clear the session log.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Start over: empty roster, fresh state. The log records the reload.
    pub fn reload(&mut self) {
        self.roster = Roster::new();
        self.selected = None;
        self.pending = 0;
        self.direction = PlayDirection::Clockwise;
        self.log.push("Scoreboard reloaded.");
    }
}

impl ScoringEngine for FarkleGame {
    type Snapshot = FarkleSnapshot;

    fn variant(&self) -> Variant {
        Variant::Farkle
    }

    fn drain_events(&mut self) -> EventBatch {
        std::mem::take(&mut self.events)
    }

    fn snapshot(&self) -> FarkleSnapshot {
        FarkleSnapshot {
            roster: self.roster.clone(),
            log: self.log.clone(),
            direction: self.direction,
            selected: self.selected,
            pending: self.pending,
        }
    }

    fn restore(&mut self, snapshot: FarkleSnapshot) -> Result<(), EngineError> {
        if !snapshot.roster.is_empty() && snapshot.roster.current_index() >= snapshot.roster.len() {
            return Err(EngineError::Snapshot("turn pointer out of range".into()));
        }
        self.roster = snapshot.roster;
        self.log = snapshot.log;
        self.direction = snapshot.direction;
        self.selected = snapshot.selected;
        self.pending = snapshot.pending;
        self.events.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> FarkleGame {
        FarkleGame::with_rng(
            FarkleSettings {
                auto_advance_on_score_update: false,
                ..FarkleSettings::default()
            },
            GameRng::new(42),
        )
    }

    fn one_player_game() -> (FarkleGame, PlayerId) {
        let mut game = game();
        let id = game.add_player("Alice").unwrap();
        game.select_player(id).unwrap();
        game.drain_events();
        (game, id)
    }

    #[test]
    fn test_combos_accumulate_pending() {
        let (mut game, _) = one_player_game();
        game.four_of_a_kind();
        game.straight();
        assert_eq!(game.pending(), 2_500);

        let events = game.drain_events();
        assert_eq!(events[0].kind, EventKind::FourOfAKind);
        assert_eq!(events[0].amount, Some(1_000));
        assert_eq!(events[1].kind, EventKind::Straight);
    }

    #[test]
    fn test_commit_banks_and_resets_pending() {
        let (mut game, id) = one_player_game();
        game.six_of_a_kind();
        game.commit_score(game.pending(), false).unwrap();

        assert_eq!(game.roster().get(id).unwrap().score, 3_000);
        assert_eq!(game.pending(), 0);
        assert!(game.roster().get(id).unwrap().ext.has_started);
    }

    #[test]
    fn test_hot_dice_keeps_pending() {
        let (mut game, id) = one_player_game();
        game.straight();
        game.commit_score(500, true).unwrap();

        assert_eq!(game.roster().get(id).unwrap().score, 500);
        assert_eq!(game.pending(), 1_500);
    }

    #[test]
    fn test_positive_commit_clears_strikes() {
        let (mut game, id) = one_player_game();
        game.commit_score(100, false).unwrap();
        game.bust().unwrap();
        assert_eq!(game.roster().get(id).unwrap().ext.strikes, 1);
        game.drain_events();

        game.commit_score(50, false).unwrap();
        assert_eq!(game.roster().get(id).unwrap().ext.strikes, 0);
        let events = game.drain_events();
        assert_eq!(events[0].kind, EventKind::FarkleCleared);
    }

    #[test]
    fn test_bust_is_noop_on_zero_score() {
        let (mut game, id) = one_player_game();
        game.four_of_a_kind();
        game.drain_events();

        game.bust().unwrap();
        assert_eq!(game.roster().get(id).unwrap().ext.strikes, 0);
        // Pending survives too: nothing about the turn changed.
        assert_eq!(game.pending(), 1_000);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_three_busts_apply_penalty_once() {
        let (mut game, id) = one_player_game();
        game.commit_score(1_000, false).unwrap();
        game.drain_events();

        game.bust().unwrap();
        game.bust().unwrap();
        game.bust().unwrap();

        let player = game.roster().get(id).unwrap();
        assert_eq!(player.score, 0);
        assert_eq!(player.ext.strikes, 0);

        let kinds: Vec<_> = game.drain_events().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::FarkleRolled,
                EventKind::TwoFarklesRolled,
                EventKind::ThreeFarklesRolled,
            ]
        );
        assert!(game.log().contains("farkled out for a penalty of 1000 points!"));
    }

    #[test]
    fn test_three_bust_penalty_scenario() {
        // score=1000, strikes=2, penalty=1000, negatives disallowed.
        let (mut game, id) = one_player_game();
        game.commit_score(1_000, false).unwrap();
        game.bust().unwrap();
        game.bust().unwrap();
        game.drain_events();

        game.bust().unwrap();

        let player = game.roster().get(id).unwrap();
        assert_eq!(player.ext.strikes, 0);
        assert_eq!(player.score, 0);
        let events = game.drain_events();
        assert_eq!(events[0].kind, EventKind::ThreeFarklesRolled);
        assert!(game.log().contains("penalty of 1000 points"));
    }

    #[test]
    fn test_penalty_goes_negative_when_allowed() {
        let mut game = FarkleGame::with_rng(
            FarkleSettings {
                allow_negative_scores: true,
                auto_advance_on_score_update: false,
                three_farkle_penalty: 1_000,
                ..FarkleSettings::default()
            },
            GameRng::new(42),
        );
        let id = game.add_player("Alice").unwrap();
        game.select_player(id).unwrap();
        game.commit_score(400, false).unwrap();

        for _ in 0..3 {
            game.bust().unwrap();
        }
        assert_eq!(game.roster().get(id).unwrap().score, -600);
    }

    #[test]
    fn test_negative_commit_clamped() {
        let (mut game, id) = one_player_game();
        game.commit_score(-500, false).unwrap();
        assert_eq!(game.roster().get(id).unwrap().score, 0);
    }

    #[test]
    fn test_target_crossing_emits_threshold_event() {
        let (mut game, _) = one_player_game();
        game.commit_score(9_500, false).unwrap();
        assert!(game
            .drain_events()
            .iter()
            .all(|e| e.kind != EventKind::TargetScoreReached));

        game.commit_score(600, false).unwrap();
        let events = game.drain_events();
        let reached = events
            .iter()
            .find(|e| e.kind == EventKind::TargetScoreReached)
            .unwrap();
        assert_eq!(reached.amount, Some(10_100));

        // Already past the target: no second crossing.
        game.commit_score(100, false).unwrap();
        assert!(game
            .drain_events()
            .iter()
            .all(|e| e.kind != EventKind::TargetScoreReached));
    }

    #[test]
    fn test_starting_score_not_met() {
        let (mut game, _) = one_player_game();
        assert!(game.starting_score_not_met());

        game.add_pending(400);
        assert!(game.starting_score_not_met());
        game.add_pending(100);
        assert!(!game.starting_score_not_met());
    }

    #[test]
    fn test_auto_advance_after_bust() {
        let mut game = FarkleGame::with_rng(FarkleSettings::default(), GameRng::new(42));
        let alice = game.add_player("Alice").unwrap();
        game.add_player("Bob").unwrap();
        game.select_player(alice).unwrap();
        game.commit_score(100, false).unwrap();
        // Auto-advance moved the turn to Bob; bring it back to Alice.
        game.select_player(alice).unwrap();

        game.bust().unwrap();
        assert_eq!(game.roster().current().unwrap().name, "Bob");
    }

    #[test]
    fn test_reset_scores_clears_hands() {
        let (mut game, id) = one_player_game();
        game.commit_score(600, false).unwrap();
        game.bust().unwrap();
        game.reset_scores();

        let player = game.roster().get(id).unwrap();
        assert_eq!(player.score, 0);
        assert_eq!(player.ext, FarkleHand::default());
        assert_eq!(game.pending(), 0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let (mut game, _) = one_player_game();
        game.add_player("Bob").unwrap();
        game.four_of_a_kind();
        game.commit_score(200, true).unwrap();

        let snapshot = game.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: FarkleSnapshot = serde_json::from_str(&json).unwrap();

        let mut restored = FarkleGame::new(FarkleSettings::default());
        restored.restore(decoded).unwrap();
        assert_eq!(restored.snapshot(), snapshot);
    }
}
