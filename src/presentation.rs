//! Dialog state machine.
//!
//! Presentation state lives outside the scoring engines: engines emit
//! domain events, and this machine decides which modal (if any) is open. At
//! most one dialog is open at a time; opening another replaces it.

use crate::core::PlayerId;
use crate::triggers::{EventKind, GameEvent};

/// The modals the scoreboard can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialog {
    /// Score editor for a player.
    EditScore(PlayerId),
    /// Name editor for a player.
    EditName(PlayerId),
    /// The add-player prompt.
    AddPlayer,
    /// Variant rule parameters.
    Settings,
    /// Trigger-binding configuration.
    TriggerConfig,
    /// The session log.
    Log,
    /// Standings.
    Leaderboard,
}

/// Open/closed dialog state, fed by engine events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PresentationState {
    dialog: Option<Dialog>,
    auto_open_edit_score: bool,
}

impl PresentationState {
    /// Create with no dialog open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether a turn advance opens the score editor for the new
    /// player. Mirrors the variant's `auto_open_edit_score_on_advance`
    /// setting.
    pub fn set_auto_open_edit_score(&mut self, auto_open: bool) {
        self.auto_open_edit_score = auto_open;
    }

    /// The currently open dialog, if any.
    #[must_use]
    pub fn dialog(&self) -> Option<Dialog> {
        self.dialog
    }

    /// Open a dialog, replacing any open one.
    pub fn open(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
    }

    /// Close the open dialog.
    pub fn close(&mut self) {
        self.dialog = None;
    }

    /// React to a domain event.
    pub fn observe(&mut self, event: &GameEvent) {
        if event.kind == EventKind::TurnStarted && self.auto_open_edit_score {
            if let Some(player) = event.player {
                self.open(Dialog::EditScore(player));
            }
        }
    }
}
