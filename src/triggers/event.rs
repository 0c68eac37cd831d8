//! Domain events emitted by the scoring engines.
//!
//! Events are a tagged union of `(variant, kind, player?, amount?)`. The
//! dispatcher matches them against configured bindings; the presentation
//! layer watches them to drive dialogs. Engines emit events and never look
//! at who is listening.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

/// The rule set a session is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Free-form counter: scores are set directly.
    Generic,
    /// Farkle: pending combos, busts, strikes.
    Farkle,
    /// Skull King: ten rounds of bids and tricks.
    SkullKing,
}

impl Variant {
    /// All variants.
    pub const ALL: [Variant; 3] = [Variant::Generic, Variant::Farkle, Variant::SkullKing];

    /// Stable identifier used in storage keys.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Farkle => "farkle",
            Self::SkullKing => "skull-king",
        }
    }

    /// The event kinds a trigger binding may be configured for under this
    /// variant.
    #[must_use]
    pub const fn bindable_kinds(self) -> &'static [EventKind] {
        const GENERIC: &[EventKind] = &[
            EventKind::PlayerAdded,
            EventKind::PlayerRemoved,
            EventKind::FirstPlayerSelected,
            EventKind::ZeroScored,
            EventKind::ScoreIncreased,
            EventKind::ScoreDecreased,
            EventKind::TargetScoreReached,
        ];
        const FARKLE: &[EventKind] = &[
            EventKind::PlayerAdded,
            EventKind::PlayerRemoved,
            EventKind::FirstPlayerSelected,
            EventKind::ScoreIncreased,
            EventKind::ScoreDecreased,
            EventKind::TargetScoreReached,
            EventKind::FarkleRolled,
            EventKind::TwoFarklesRolled,
            EventKind::ThreeFarklesRolled,
            EventKind::FarkleCleared,
            EventKind::FourOfAKind,
            EventKind::FiveOfAKind,
            EventKind::SixOfAKind,
            EventKind::Straight,
            EventKind::ThreePairs,
            EventKind::TwoTriplets,
        ];
        match self {
            Self::Generic | Self::SkullKing => GENERIC,
            Self::Farkle => FARKLE,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// What happened.
///
/// One flat enum shared by all variants; [`Variant::bindable_kinds`] scopes
/// which kinds each variant actually emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A player joined the roster.
    PlayerAdded,
    /// A player was deactivated.
    PlayerRemoved,
    /// A starting player was chosen.
    FirstPlayerSelected,
    /// The turn moved to a new player. Consumed by the presentation layer;
    /// not offered as a trigger target.
    TurnStarted,
    /// A score commit left the score unchanged.
    ZeroScored,
    /// A score commit raised the score.
    ScoreIncreased,
    /// A score commit lowered the score.
    ScoreDecreased,
    /// A score commit reached a configured threshold. The only kind keyed by
    /// an amount; several bindings with distinct amounts may coexist.
    TargetScoreReached,

    // Farkle
    /// First strike.
    FarkleRolled,
    /// Second strike.
    TwoFarklesRolled,
    /// Third strike: penalty applied, strikes reset.
    ThreeFarklesRolled,
    /// A positive commit wiped outstanding strikes.
    FarkleCleared,
    /// Four of a kind scored (1000 points).
    FourOfAKind,
    /// Five of a kind scored (2000 points).
    FiveOfAKind,
    /// Six of a kind scored (3000 points).
    SixOfAKind,
    /// Straight scored (1500 points).
    Straight,
    /// Three pairs scored (1500 points).
    ThreePairs,
    /// Two triplets scored (2500 points).
    TwoTriplets,
}

impl EventKind {
    /// Whether bindings for this kind are additionally keyed by an amount.
    #[must_use]
    pub const fn is_threshold(self) -> bool {
        matches!(self, Self::TargetScoreReached)
    }

    /// Whether a trigger binding may target this kind.
    #[must_use]
    pub const fn is_bindable(self) -> bool {
        !matches!(self, Self::TurnStarted)
    }

    /// Human-readable label, as shown in binding configuration.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlayerAdded => "Player added",
            Self::PlayerRemoved => "Player removed",
            Self::FirstPlayerSelected => "First player selected",
            Self::TurnStarted => "Turn started",
            Self::ZeroScored => "Zero scored",
            Self::ScoreIncreased => "Score increases",
            Self::ScoreDecreased => "Score decreases",
            Self::TargetScoreReached => "Target score reached",
            Self::FarkleRolled => "Farkle rolled",
            Self::TwoFarklesRolled => "Two farkles rolled",
            Self::ThreeFarklesRolled => "Three farkles rolled",
            Self::FarkleCleared => "Farkle cleared",
            Self::FourOfAKind => "Four of a kind scored",
            Self::FiveOfAKind => "Five of a kind scored",
            Self::SixOfAKind => "Six of a kind scored",
            Self::Straight => "Straight scored",
            Self::ThreePairs => "Three pairs scored",
            Self::TwoTriplets => "Two triplets scored",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A domain event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// The variant that emitted the event.
    pub variant: Variant,

    /// What happened.
    pub kind: EventKind,

    /// The player the event concerns, when there is one.
    pub player: Option<PlayerId>,

    /// Amount context: the new total for threshold events, the delta or
    /// combo value for scoring events.
    pub amount: Option<i64>,
}

impl GameEvent {
    /// Create an event with no player or amount context.
    #[must_use]
    pub const fn new(variant: Variant, kind: EventKind) -> Self {
        Self {
            variant,
            kind,
            player: None,
            amount: None,
        }
    }

    /// Attach a player (builder pattern).
    #[must_use]
    pub const fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Attach an amount (builder pattern).
    #[must_use]
    pub const fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// Events emitted by a single engine operation.
///
/// Operations emit at most a handful of events, so the batch stays on the
/// stack.
pub type EventBatch = SmallVec<[GameEvent; 4]>;
