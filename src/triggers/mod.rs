//! Event-driven trigger system.
//!
//! Scoring engines emit [`GameEvent`]s; the [`TriggerDispatcher`] maps them
//! through user-configured [`TriggerBinding`]s to named external actions and
//! fires them through the Action Executor port. Binding configuration is
//! persisted per variant through the State Store.

pub mod binding;
pub mod dispatcher;
pub mod event;

pub use binding::{BindingId, BindingOutcome, TriggerBinding};
pub use dispatcher::TriggerDispatcher;
pub use event::{EventBatch, EventKind, GameEvent, Variant};
