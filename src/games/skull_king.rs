//! Skull King engine.
//!
//! Ten rounds of bid-then-score, tracked per player in lock-step: every
//! player is on the same round index, and the next round only opens once
//! every active player's current round is complete.

use serde::{Deserialize, Serialize};

use crate::core::{GameLog, GameRng, PlayDirection, Player, PlayerId, Roster};
use crate::error::EngineError;
use crate::session::ScoringEngine;
use crate::settings::SkullKingSettings;
use crate::triggers::{EventBatch, EventKind, GameEvent, Variant};

/// Number of rounds in a game.
pub const ROUND_COUNT: usize = 10;

/// One bid/score unit for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Tricks bid.
    pub bid: i64,
    /// Whether a bid has been placed this round.
    pub bid_set: bool,
    /// Tricks actually made.
    pub made: i64,
    /// Points awarded for making or missing the bid.
    pub bid_points: i64,
    /// Supplementary points (captured pirates, the Skull King, and so on).
    pub bonus_points: i64,
    /// Whether the round is open for this player.
    pub started: bool,
    /// Whether the round has been scored for this player.
    pub complete: bool,
}

/// A player's ten rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSheet {
    /// Rounds in play order.
    pub rounds: [Round; ROUND_COUNT],
}

impl Default for RoundSheet {
    fn default() -> Self {
        Self {
            rounds: [Round::default(); ROUND_COUNT],
        }
    }
}

impl RoundSheet {
    /// Sheet with the given round already open.
    #[must_use]
    fn starting_at(index: usize) -> Self {
        let mut sheet = Self::default();
        sheet.rounds[index].started = true;
        sheet
    }
}

/// Persisted Skull King state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkullKingSnapshot {
    /// Roster and turn pointer.
    pub roster: Roster<RoundSheet>,
    /// Session log.
    pub log: GameLog,
    /// Index of the round currently in play.
    pub current_round: usize,
}

/// Scoring engine for Skull King.
pub struct SkullKingGame {
    settings: SkullKingSettings,
    roster: Roster<RoundSheet>,
    log: GameLog,
    current_round: usize,
    rng: GameRng,
    events: EventBatch,
}

impl SkullKingGame {
    /// Create a fresh session with the given settings.
    #[must_use]
    pub fn new(settings: SkullKingSettings) -> Self {
        Self::with_rng(settings, GameRng::from_entropy())
    }

    /// Create a session with a seeded RNG, for deterministic tests.
    #[must_use]
    pub fn with_rng(settings: SkullKingSettings, rng: GameRng) -> Self {
        Self {
            settings,
            roster: Roster::new(),
            log: GameLog::new(),
            current_round: 0,
            rng,
            events: EventBatch::new(),
        }
    }

    /// Current rule parameters.
    #[must_use]
    pub fn settings(&self) -> &SkullKingSettings {
        &self.settings
    }

    /// Replace the rule parameters.
    pub fn set_settings(&mut self, settings: SkullKingSettings) {
        self.settings = settings;
    }

    /// The roster.
    #[must_use]
    pub fn roster(&self) -> &Roster<RoundSheet> {
        &self.roster
    }

    /// The session log.
    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// Index of the round currently in play (0-based).
    #[must_use]
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Add a player with the current round already open on their sheet.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, EngineError> {
        let sheet = RoundSheet::starting_at(self.current_round);
        let id = self.roster.add(name, 0, sheet)?;
        let name = self.roster.get(id).map(|p| p.name.clone()).unwrap_or_default();
        self.log.push(format!("Added player {name}"));
        self.emit(GameEvent::new(Variant::SkullKing, EventKind::PlayerAdded).with_player(id));
        Ok(id)
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

    /// Place a player's bid for the current round.
    pub fn set_bid(&mut self, id: PlayerId, amount: i64) -> Result<(), EngineError> {
        let round_index = self.current_round;
        let player = self.roster.get_mut(id).ok_or(EngineError::UnknownPlayer(id))?;
        let round = &mut player.ext.rounds[round_index];
        if !round.started {
            return Err(EngineError::RoundNotStarted { round: round_index });
        }
        if round.complete {
            return Err(EngineError::RoundComplete { round: round_index });
        }
        round.bid = amount;
        round.bid_set = true;
        let name = player.name.clone();
        self.log.push(format!("{name} bids {amount}"));
        Ok(())
    }

    /// Whether every active player has bid the current round.
    #[must_use]
    pub fn all_bids_set(&self) -> bool {
        let index = self.current_round;
        !self.roster.is_empty()
            && self
                .roster
                .players()
                .iter()
                .filter(|p| p.active)
                .all(|p| p.ext.rounds[index].bid_set)
    }

    /// Whether every active player's current round is complete.
    #[must_use]
    pub fn round_complete(&self) -> bool {
        let index = self.current_round;
        !self.roster.is_empty()
            && self
                .roster
                .players()
                .iter()
                .filter(|p| p.active)
                .all(|p| p.ext.rounds[index].complete)
    }

    /// Whether the final round has been scored for everyone.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.current_round == ROUND_COUNT - 1 && self.round_complete()
    }

    /// Points for making or missing a bid.
    ///
    /// Zero bids score ten points per round number, won or lost; non-zero
    /// bids score twenty per trick bid when exact, minus ten per trick of
    /// error otherwise.
    #[must_use]
    fn bid_points(round_number: i64, bid: i64, made: i64) -> i64 {
        if bid == 0 {
            if made == 0 {
                10 * round_number
            } else {
                -10 * round_number
            }
        } else if made == bid {
            20 * bid
        } else {
            -10 * (made - bid).abs()
        }
    }

    /// Record a player's tricks for the current round and score it.
    ///
    /// Requires a placed bid. Adds bid points plus the caller-supplied bonus
    /// to the score and marks the round complete; scoring the last open
    /// round hands the table on to the next round.
    pub fn record_result(
        &mut self,
        id: PlayerId,
        made: i64,
        bonus: i64,
    ) -> Result<(), EngineError> {
        let round_index = self.current_round;
        let allow_negative = self.settings.allow_negative_scores;

        let (previous, new_score, name, bid_points) = {
            let player = self.roster.get_mut(id).ok_or(EngineError::UnknownPlayer(id))?;
            let round = &mut player.ext.rounds[round_index];
            if !round.started {
                return Err(EngineError::RoundNotStarted { round: round_index });
            }
            if round.complete {
                return Err(EngineError::RoundComplete { round: round_index });
            }
            if !round.bid_set {
                return Err(EngineError::BidNotSet { round: round_index });
            }

            let bid_points = Self::bid_points(round_index as i64 + 1, round.bid, made);
            round.made = made;
            round.bid_points = bid_points;
            round.bonus_points = bonus;
            round.complete = true;

            let previous = player.score;
            let mut new_score = previous + bid_points + bonus;
            if new_score < 0 && !allow_negative {
                new_score = 0;
            }
            player.score = new_score;
            (previous, new_score, player.name.clone(), bid_points)
        };

        let bid = self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.ext.rounds
            [round_index]
            .bid;
        self.log.push(format!(
            "{name} made {made} of {bid} tricks ({bid_points:+} and {bonus:+} bonus)"
        ));

        match new_score.cmp(&previous) {
            std::cmp::Ordering::Greater => self.emit(
                GameEvent::new(Variant::SkullKing, EventKind::ScoreIncreased)
                    .with_player(id)
                    .with_amount(new_score - previous),
            ),
            std::cmp::Ordering::Less => self.emit(
                GameEvent::new(Variant::SkullKing, EventKind::ScoreDecreased)
                    .with_player(id)
                    .with_amount(previous - new_score),
            ),
            std::cmp::Ordering::Equal => self.emit(
                GameEvent::new(Variant::SkullKing, EventKind::ZeroScored).with_player(id),
            ),
        }

        if self.round_complete() && self.current_round < ROUND_COUNT - 1 {
            self.open_next_round();
        }

        if self.settings.auto_advance_on_score_update {
            self.advance_turn()?;
        }
        Ok(())
    }

    /// Open the next round for every player and make it current.
    fn open_next_round(&mut self) {
        self.current_round += 1;
        let index = self.current_round;
        for player in self.roster.players_mut() {
            player.ext.rounds[index].started = true;
        }
        self.log.push(format!("Round {} begins", index + 1));
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
            self.emit(GameEvent::new(Variant::SkullKing, EventKind::PlayerRemoved).with_player(id));
            if was_current && self.roster.has_active() {
                self.advance_turn()?;
            }
        }
        Ok(())
    }

    /// Mark a player as the starting player (the dealer) and point the turn
    /// at them.
    pub fn set_starting_player(&mut self, id: PlayerId) -> Result<(), EngineError> {
        self.roster.set_starting_player(id)?;
        let name = &self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.name;
        self.log.push(format!("{name} was set as starting player"));
        self.emit(GameEvent::new(Variant::SkullKing, EventKind::FirstPlayerSelected).with_player(id));
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

    /// Move the turn to the next active player.
    pub fn advance_turn(&mut self) -> Result<PlayerId, EngineError> {
        let id = self.roster.advance(PlayDirection::Clockwise)?;
        let name = &self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.name;
        self.log.push(format!("It's your turn, {name}"));
        self.emit(GameEvent::new(Variant::SkullKing, EventKind::TurnStarted).with_player(id));
        Ok(id)
    }

    /// Reset every score and sheet and return to round one.
    pub fn reset_scores(&mut self) {
        self.current_round = 0;
        for player in self.roster.players_mut() {
            player.score = 0;
            player.ext = RoundSheet::starting_at(0);
        }
        self.log.push("Scores were reset");
    }

    /// Players ordered by score, highest first.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player<RoundSheet>> {
        self.roster.standings()
    }

    /// Clear the session log.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Start over: empty roster, fresh state. The log records the reload.
    pub fn reload(&mut self) {
        self.roster = Roster::new();
        self.current_round = 0;
        self.log.push("Scoreboard reloaded.");
    }
}

impl ScoringEngine for SkullKingGame {
    type Snapshot = SkullKingSnapshot;

    fn variant(&self) -> Variant {
        Variant::SkullKing
    }

    fn drain_events(&mut self) -> EventBatch {
        std::mem::take(&mut self.events)
    }

    fn snapshot(&self) -> SkullKingSnapshot {
        SkullKingSnapshot {
            roster: self.roster.clone(),
            log: self.log.clone(),
            current_round: self.current_round,
        }
    }

    fn restore(&mut self, snapshot: SkullKingSnapshot) -> Result<(), EngineError> {
        if snapshot.current_round >= ROUND_COUNT {
            return Err(EngineError::Snapshot("round index out of range".into()));
        }
        if !snapshot.roster.is_empty() && snapshot.roster.current_index() >= snapshot.roster.len() {
            return Err(EngineError::Snapshot("turn pointer out of range".into()));
        }
        self.roster = snapshot.roster;
        self.log = snapshot.log;
        self.current_round = snapshot.current_round;
        self.events.clear();
        Ok(())
    }
}
