//! Generic counter engine.
//!
//! The free-form variant: scores are edited directly, the roster rotates in
//! either direction, and the only rules are the clamping and auto-advance
//! settings.

use serde::{Deserialize, Serialize};

use crate::core::{GameLog, GameRng, PlayDirection, Player, PlayerId, Roster};
use crate::error::EngineError;
use crate::session::ScoringEngine;
use crate::settings::GenericSettings;
use crate::triggers::{EventBatch, EventKind, GameEvent, Variant};

/// Persisted generic-counter state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenericSnapshot {
    /// Roster and turn pointer.
    pub roster: Roster<()>,
    /// Session log.
    pub log: GameLog,
    /// Current play direction.
    pub direction: PlayDirection,
    /// Player whose score is being edited, if any.
    pub selected: Option<PlayerId>,
    /// Score value under edit, if an edit is in progress.
    pub pending: Option<i64>,
}

/// Scoring engine for the generic counter.
pub struct GenericGame {
    settings: GenericSettings,
    roster: Roster<()>,
    log: GameLog,
    direction: PlayDirection,
    selected: Option<PlayerId>,
    pending: Option<i64>,
    rng: GameRng,
    events: EventBatch,
}

impl GenericGame {
    /// Create a fresh session with the given settings.
    #[must_use]
    pub fn new(settings: GenericSettings) -> Self {
        Self::with_rng(settings, GameRng::from_entropy())
    }

    /// Create a session with a seeded RNG, for deterministic tests.
    #[must_use]
    pub fn with_rng(settings: GenericSettings, rng: GameRng) -> Self {
        Self {
            settings,
            roster: Roster::new(),
            log: GameLog::new(),
            direction: PlayDirection::Clockwise,
            selected: None,
            pending: None,
            rng,
            events: EventBatch::new(),
        }
    }

    /// Current rule parameters.
    #[must_use]
    pub fn settings(&self) -> &GenericSettings {
        &self.settings
    }

    /// Replace the rule parameters.
    pub fn set_settings(&mut self, settings: GenericSettings) {
        self.settings = settings;
    }

    /// The roster.
    #[must_use]
    pub fn roster(&self) -> &Roster<()> {
        &self.roster
    }

    /// The session log.
    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    /// Current play direction.
    #[must_use]
    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    /// The player whose score is being edited.
    #[must_use]
    pub fn selected(&self) -> Option<&Player<()>> {
        self.selected.and_then(|id| self.roster.get(id))
    }

    /// The score value under edit.
    #[must_use]
    pub fn pending(&self) -> Option<i64> {
        self.pending
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Add a player with the configured starting score.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, EngineError> {
        let starting_score = self.settings.starting_score.unwrap_or(0);
        let id = self.roster.add(name, starting_score, ())?;
        let name = self.roster.get(id).map(|p| p.name.clone()).unwrap_or_default();
        self.log.push(format!("Added player {name}"));
        self.emit(GameEvent::new(Variant::Generic, EventKind::PlayerAdded).with_player(id));
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

    /// Begin editing the selected player's score.
    pub fn begin_edit(&mut self) -> Result<i64, EngineError> {
        let player = self.selected().ok_or(EngineError::NoPlayerSelected)?;
        let score = player.score;
        self.pending = Some(score);
        Ok(score)
    }

    /// Raise the score under edit.
    pub fn increment_pending(&mut self, amount: i64) -> i64 {
        let value = self.pending.unwrap_or(0) + amount;
        self.pending = Some(value);
        value
    }

    /// Lower the score under edit, clamping at 0 unless negative scores are
    /// allowed.
    pub fn decrement_pending(&mut self, amount: i64) -> i64 {
        let mut value = self.pending.unwrap_or(0) - amount;
        if value < 0 && !self.settings.allow_negative_scores {
            value = 0;
        }
        self.pending = Some(value);
        value
    }

    /// Commit the score under edit to the selected player.
    pub fn commit_pending(&mut self) -> Result<(), EngineError> {
        let value = self.pending.ok_or(EngineError::NoPlayerSelected)?;
        self.commit_score(value)
    }

    /// Set the selected player's score.
    ///
    /// Negative values clamp to 0 unless negative scores are allowed. Emits
    /// zero/increase/decrease against the previous score, and the threshold
    /// event with the new total on every commit. Advances the turn if
    /// auto-advance is configured.
    pub fn commit_score(&mut self, new_score: i64) -> Result<(), EngineError> {
        let id = self.selected.ok_or(EngineError::NoPlayerSelected)?;
        let allow_negative = self.settings.allow_negative_scores;

        let player = self.roster.get_mut(id).ok_or(EngineError::UnknownPlayer(id))?;
        let mut new_score = new_score;
        if new_score < 0 && !allow_negative {
            new_score = 0;
        }

        let previous = player.score;
        player.score = new_score;
        let name = player.name.clone();
        self.log.push(format!("{name} score changed to {new_score}"));

        let kind = match new_score.cmp(&previous) {
            std::cmp::Ordering::Equal => EventKind::ZeroScored,
            std::cmp::Ordering::Greater => EventKind::ScoreIncreased,
            std::cmp::Ordering::Less => EventKind::ScoreDecreased,
        };
        self.emit(
            GameEvent::new(Variant::Generic, kind)
                .with_player(id)
                .with_amount((new_score - previous).abs()),
        );
        self.emit(
            GameEvent::new(Variant::Generic, EventKind::TargetScoreReached)
                .with_player(id)
                .with_amount(new_score),
        );

        self.pending = None;

        if self.settings.auto_advance_on_score_update {
            self.advance_turn()?;
        }
        Ok(())
    }

    /// Add to the selected player's score.
    pub fn increment_score(&mut self, amount: i64) -> Result<(), EngineError> {
        let score = self.selected().ok_or(EngineError::NoPlayerSelected)?.score;
        self.commit_score(score + amount)
    }

    /// Subtract from the selected player's score, clamping per settings.
    pub fn decrement_score(&mut self, amount: i64) -> Result<(), EngineError> {
        let score = self.selected().ok_or(EngineError::NoPlayerSelected)?.score;
        self.commit_score(score - amount)
    }

    /// Flip a player's active flag.
    ///
    /// Deactivation emits the player-removed event and hands the turn on if
    /// the departing player held it.
    pub fn toggle_active(&mut self, id: PlayerId) -> Result<(), EngineError> {
        let was_current = self.roster.current().is_some_and(|p| p.id == id);
        let active = self.roster.toggle_active(id)?;
        let name = self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.name.clone();
        if active {
            self.log.push(format!("{name} is back!"));
        } else {
            self.log.push(format!("Goodbye, {name}!"));
            self.emit(GameEvent::new(Variant::Generic, EventKind::PlayerRemoved).with_player(id));
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
        self.emit(GameEvent::new(Variant::Generic, EventKind::FirstPlayerSelected).with_player(id));
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

    /// Move the turn to the next active player in the current direction.
    pub fn advance_turn(&mut self) -> Result<PlayerId, EngineError> {
        let id = self.roster.advance(self.direction)?;
        self.selected = Some(id);
        let name = &self.roster.get(id).ok_or(EngineError::UnknownPlayer(id))?.name;
        self.log.push(format!("It's your turn, {name}"));
        self.emit(GameEvent::new(Variant::Generic, EventKind::TurnStarted).with_player(id));
        Ok(id)
    }

    /// Set every player back to the starting score.
    pub fn reset_scores(&mut self) {
        self.roster.reset_scores(self.settings.starting_score.unwrap_or(0));
        self.log.push("Scores were reset");
    }

    /// Players ordered by score, highest first.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player<()>> {
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
        self.pending = None;
        self.direction = PlayDirection::Clockwise;
        self.log.push("Scoreboard reloaded.");
    }
}

impl ScoringEngine for GenericGame {
    type Snapshot = GenericSnapshot;

    fn variant(&self) -> Variant {
        Variant::Generic
    }

    fn drain_events(&mut self) -> EventBatch {
        std::mem::take(&mut self.events)
    }

    fn snapshot(&self) -> GenericSnapshot {
        GenericSnapshot {
            roster: self.roster.clone(),
            log: self.log.clone(),
            direction: self.direction,
            selected: self.selected,
            pending: self.pending,
        }
    }

    fn restore(&mut self, snapshot: GenericSnapshot) -> Result<(), EngineError> {
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
