//! Player identity and per-player data.
//!
//! ## PlayerId
//!
//! Unique within a session, assigned monotonically by the roster
//! (`max(existing) + 1`, first player gets id 1) and never reused, even
//! after a player is deactivated.
//!
//! ## Player
//!
//! The fields every variant shares (name, score, active flag, starting
//! marker) plus a variant extension payload `X`: the generic counter uses
//! `()`, Farkle tracks strikes, Skull King tracks a round sheet.

use serde::{Deserialize, Serialize};

/// Unique player identifier within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// A roster member.
///
/// `X` is the variant extension payload. Players are never physically
/// removed from a roster; "removing" a player flips [`active`](Self::active)
/// so their id and score history survive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player<X> {
    /// Unique identifier, assigned by the roster.
    pub id: PlayerId,

    /// Display name. Never empty.
    pub name: String,

    /// Current total score.
    pub score: i64,

    /// Whether the player takes turns. Inactive players are skipped by
    /// rotation but keep their seat.
    pub active: bool,

    /// Starting-player marker. The roster keeps at most one of these set.
    pub starting_player: bool,

    /// Variant-specific state.
    pub ext: X,
}

impl<X> Player<X> {
    /// Create a new active player.
    pub fn new(id: PlayerId, name: impl Into<String>, score: i64, ext: X) -> Self {
        Self {
            id,
            name: name.into(),
            score,
            active: true,
            starting_player: false,
            ext,
        }
    }
}
