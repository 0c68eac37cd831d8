//! # tallykeep
//!
//! A scorekeeping engine for turn-based tabletop games, with an automation
//! layer that fires named external actions when game events occur.
//!
//! ## Design Principles
//!
//! 1. **Engines own the rules**: each variant (generic counter, Farkle,
//!    Skull King) is a state machine over the shared roster. Engines emit
//!    domain events and never touch storage or presentation directly.
//!
//! 2. **Ports at the edges**: persistence ([`store::StateStore`]) and
//!    action execution ([`actions::ActionRunner`]) are injected traits.
//!    Both are best-effort: a broken store degrades to in-memory play, a
//!    failed action is logged and forgotten.
//!
//! 3. **Single-threaded mutations**: one user, one device. Every operation
//!    runs to completion before the next; the only asynchronous edge is the
//!    fire-and-forget action call.
//!
//! ## Modules
//!
//! - `core`: players, roster, turn rotation, session log, RNG
//! - `games`: the three variant scoring engines
//! - `triggers`: domain events, bindings, and the dispatcher
//! - `actions`: Action Executor port and the script catalog
//! - `store`: State Store port, storage keys, in-memory implementation
//! - `session`: coordinator tying an engine to store, triggers, and dialogs
//! - `presentation`: dialog open/close state machine
//! - `settings`: per-variant rule parameters

pub mod actions;
pub mod core;
pub mod error;
pub mod games;
pub mod presentation;
pub mod session;
pub mod settings;
pub mod store;
pub mod triggers;

// Re-export commonly used types
pub use crate::actions::{ActionCatalog, ActionRunner, NoopRunner, RecordingRunner, ScriptAction};
pub use crate::core::{GameLog, GameRng, LogEntry, PlayDirection, Player, PlayerId, Roster};
pub use crate::error::EngineError;
pub use crate::games::{FarkleGame, GenericGame, SkullKingGame};
pub use crate::presentation::{Dialog, PresentationState};
pub use crate::session::{GameSession, ScoringEngine};
pub use crate::settings::{FarkleSettings, GenericSettings, SkullKingSettings};
pub use crate::store::{MemoryStore, StateStore, StorageKey, StoreError, StoreKind};
pub use crate::triggers::{
    BindingId, BindingOutcome, EventBatch, EventKind, GameEvent, TriggerBinding, TriggerDispatcher,
    Variant,
};
