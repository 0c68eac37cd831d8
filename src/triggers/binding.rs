//! Trigger bindings: event kind → action name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::EventKind;

/// Unique identifier for a trigger binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingId(Uuid);

impl BindingId {
    /// Generate a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BindingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configured mapping from a domain event to an external action name.
///
/// At most one binding exists per event kind, except the threshold kind,
/// where bindings are additionally keyed by `amount` and several may coexist
/// with distinct amounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerBinding {
    /// Unique identifier.
    pub id: BindingId,

    /// The event kind this binding fires on.
    pub kind: EventKind,

    /// Threshold amount. Only meaningful for threshold kinds.
    pub amount: Option<i64>,

    /// Name of the action to run, resolved against the catalog at dispatch
    /// time.
    pub action: String,
}

impl TriggerBinding {
    /// Create a binding with a fresh id.
    pub fn new(kind: EventKind, action: impl Into<String>, amount: Option<i64>) -> Self {
        Self {
            id: BindingId::new(),
            kind,
            amount,
            action: action.into(),
        }
    }
}

/// Result of an attempt to add a binding.
///
/// Duplicates are an expected user mistake, not an error: the attempt is
/// rejected, the existing list stands, and the caller shows a warning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingOutcome {
    /// The binding was added and persisted.
    Added(BindingId),
    /// A binding for this kind (and amount, for threshold kinds) already
    /// exists.
    Duplicate,
    /// A threshold kind was configured without an amount.
    MissingAmount,
}

impl BindingOutcome {
    /// Whether the binding was added.
    #[must_use]
    pub const fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}
