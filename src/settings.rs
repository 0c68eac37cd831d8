//! Variant rule parameters.
//!
//! Settings are persisted wholesale under their variant's storage key and
//! fall back to defaults when nothing is stored yet. Missing fields in a
//! stored blob also fall back to their defaults, so old saves survive new
//! fields.

use serde::{Deserialize, Serialize};

/// Rule parameters for the generic counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericSettings {
    /// Whether scores may drop below zero. When false, commits clamp at 0.
    pub allow_negative_scores: bool,

    /// Advance the turn automatically after every score commit.
    pub auto_advance_on_score_update: bool,

    /// Open the edit-score dialog for the new player after a turn advance.
    pub auto_open_edit_score_on_advance: bool,

    /// Score new players start on. `None` means 0.
    pub starting_score: Option<i64>,

    /// Score that ends the game, if the table plays to a target.
    pub target_score: Option<i64>,
}

impl Default for GenericSettings {
    fn default() -> Self {
        Self {
            allow_negative_scores: false,
            auto_advance_on_score_update: true,
            auto_open_edit_score_on_advance: false,
            starting_score: None,
            target_score: None,
        }
    }
}

/// Rule parameters for Farkle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarkleSettings {
    /// Whether scores may drop below zero. When false, commits and the
    /// three-farkle penalty clamp at 0.
    pub allow_negative_scores: bool,

    /// Advance the turn automatically after every commit or bust.
    pub auto_advance_on_score_update: bool,

    /// Open the edit-score dialog for the new player after a turn advance.
    pub auto_open_edit_score_on_advance: bool,

    /// Points a player must bank in one turn before getting on the board.
    pub minimum_points_to_start: i64,

    /// Score that wins the game.
    pub target_score: i64,

    /// Points lost on the third consecutive farkle.
    pub three_farkle_penalty: i64,
}

impl Default for FarkleSettings {
    fn default() -> Self {
        Self {
            allow_negative_scores: false,
            auto_advance_on_score_update: true,
            auto_open_edit_score_on_advance: false,
            minimum_points_to_start: 500,
            target_score: 10_000,
            three_farkle_penalty: 1_000,
        }
    }
}

/// Rule parameters for Skull King.
///
/// Mirrors the generic parameters; negative scores are part of the game, so
/// they default to allowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkullKingSettings {
    /// Whether scores may drop below zero. Missed bids routinely push
    /// players negative, so this defaults to true.
    pub allow_negative_scores: bool,

    /// Advance the turn automatically after every recorded result.
    pub auto_advance_on_score_update: bool,

    /// Open the edit-score dialog for the new player after a turn advance.
    pub auto_open_edit_score_on_advance: bool,
}

impl Default for SkullKingSettings {
    fn default() -> Self {
        Self {
            allow_negative_scores: true,
            auto_advance_on_score_update: false,
            auto_open_edit_score_on_advance: false,
        }
    }
}
