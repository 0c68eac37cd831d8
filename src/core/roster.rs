//! Player roster and turn rotation.
//!
//! The roster is the ordered seating of a session. All three variants share
//! it; they differ only in the extension payload `X` carried per player.
//!
//! ## Turn Rotation
//!
//! `current_index` points at the player whose turn it is. [`Roster::advance`]
//! steps it one seat at a time in the play direction, skipping inactive
//! players, and refuses to run on a roster with no active players instead of
//! looping forever.

use serde::{Deserialize, Serialize};

use crate::core::player::{Player, PlayerId};
use crate::error::EngineError;

/// Direction the turn pointer moves around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayDirection {
    /// Seat order: index 0, 1, 2, ...
    #[default]
    Clockwise,
    /// Reverse seat order.
    Anticlockwise,
}

impl PlayDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Clockwise => Self::Anticlockwise,
            Self::Anticlockwise => Self::Clockwise,
        }
    }

    /// Index step for one seat in this direction.
    #[must_use]
    const fn step(self) -> i64 {
        match self {
            Self::Clockwise => 1,
            Self::Anticlockwise => -1,
        }
    }
}

impl std::fmt::Display for PlayDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clockwise => write!(f, "clockwise"),
            Self::Anticlockwise => write!(f, "anti-clockwise"),
        }
    }
}

/// Ordered collection of players plus the turn pointer.
///
/// Players are appended by [`add`](Self::add) and never removed; ids are
/// assigned `max(existing) + 1`, so an id is never reused even after its
/// player is deactivated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster<X> {
    players: Vec<Player<X>>,
    current_index: usize,
}

impl<X> Roster<X> {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            current_index: 0,
        }
    }

    /// Append a new active player.
    ///
    /// Rejects empty (or all-whitespace) names without mutating anything.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        score: i64,
        ext: X,
    ) -> Result<PlayerId, EngineError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EngineError::EmptyPlayerName);
        }

        let id = PlayerId::new(self.players.iter().map(|p| p.id.raw()).max().unwrap_or(0) + 1);
        self.players.push(Player::new(id, name, score, ext));
        Ok(id)
    }

    /// All players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player<X>] {
        &self.players
    }

    /// Mutable access to all players in seat order.
    pub fn players_mut(&mut self) -> &mut [Player<X>] {
        &mut self.players
    }

    /// Look up a player by id.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player<X>> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player by id, mutably.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player<X>> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Seat index of a player.
    #[must_use]
    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> Option<&Player<X>> {
        self.players.get(self.current_index)
    }

    /// The player whose turn it is, mutably.
    pub fn current_mut(&mut self) -> Option<&mut Player<X>> {
        self.players.get_mut(self.current_index)
    }

    /// Seat index of the turn pointer.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Point the turn at a specific player.
    pub fn select(&mut self, id: PlayerId) -> Result<(), EngineError> {
        let index = self.index_of(id).ok_or(EngineError::UnknownPlayer(id))?;
        self.current_index = index;
        Ok(())
    }

    /// Mark a player as the starting player.
    ///
    /// Clears the flag on everyone else and points the turn at the target,
    /// so at most one starting player exists at any time.
    pub fn set_starting_player(&mut self, id: PlayerId) -> Result<(), EngineError> {
        let index = self.index_of(id).ok_or(EngineError::UnknownPlayer(id))?;
        for player in &mut self.players {
            player.starting_player = false;
        }
        self.players[index].starting_player = true;
        self.current_index = index;
        Ok(())
    }

    /// Pick a uniformly random player as the starting player.
    pub fn randomise_starting_player(
        &mut self,
        rng: &mut crate::core::GameRng,
    ) -> Result<PlayerId, EngineError> {
        if self.players.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        let index = rng.gen_range_usize(0..self.players.len());
        let id = self.players[index].id;
        self.set_starting_player(id)?;
        Ok(id)
    }

    /// Step the turn pointer one or more seats until it lands on an active
    /// player, wrapping at either end of the roster.
    ///
    /// Errors instead of spinning when no player is active.
    pub fn advance(&mut self, direction: PlayDirection) -> Result<PlayerId, EngineError> {
        if self.players.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        if !self.has_active() {
            return Err(EngineError::NoActivePlayers);
        }

        let len = self.players.len() as i64;
        let mut index = self.current_index as i64;
        loop {
            index = (index + direction.step()).rem_euclid(len);
            if self.players[index as usize].active {
                self.current_index = index as usize;
                return Ok(self.players[self.current_index].id);
            }
        }
    }

    /// Flip a player's active flag, returning the new value.
    ///
    /// The turn pointer is left alone; callers re-advance if the toggled
    /// player held the turn.
    pub fn toggle_active(&mut self, id: PlayerId) -> Result<bool, EngineError> {
        let player = self.get_mut(id).ok_or(EngineError::UnknownPlayer(id))?;
        player.active = !player.active;
        Ok(player.active)
    }

    /// Rename a player. Empty names are rejected.
    pub fn rename(&mut self, id: PlayerId, name: impl Into<String>) -> Result<(), EngineError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EngineError::EmptyPlayerName);
        }
        let player = self.get_mut(id).ok_or(EngineError::UnknownPlayer(id))?;
        player.name = name;
        Ok(())
    }

    /// Players ordered by score, highest first. Ties keep seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player<X>> {
        let mut players: Vec<_> = self.players.iter().collect();
        players.sort_by(|a, b| b.score.cmp(&a.score));
        players
    }

    /// Set every player's score back to the given value.
    pub fn reset_scores(&mut self, score: i64) {
        for player in &mut self.players {
            player.score = score;
        }
    }

    /// Whether any player is active.
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.players.iter().any(|p| p.active)
    }

    /// Number of active players.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.active).count()
    }

    /// Total number of players, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster has no players.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
