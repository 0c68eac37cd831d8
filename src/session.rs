//! Session coordinator.
//!
//! [`GameSession`] wires a scoring engine to the State Store, the trigger
//! dispatcher, and the dialog machine. Every mutation follows the same
//! sequence: run the engine operation to completion, hand the emitted
//! events to the dispatcher and the presentation machine, then persist a
//! snapshot best-effort. Persistence is never transactional with the
//! in-memory mutation; a failed write leaves the session running in memory.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::actions::{ActionRunner, ScriptAction};
use crate::error::EngineError;
use crate::presentation::PresentationState;
use crate::store::{self, StateStore, StorageKey};
use crate::triggers::{
    BindingId, BindingOutcome, EventBatch, EventKind, TriggerBinding, TriggerDispatcher, Variant,
};

/// The seam between a variant engine and the session plumbing.
pub trait ScoringEngine {
    /// Persisted form of the engine's game state. Settings are stored
    /// separately under the variant's settings key.
    type Snapshot: Serialize + DeserializeOwned;

    /// Which variant this engine runs.
    fn variant(&self) -> Variant;

    /// Take the events emitted since the last drain.
    fn drain_events(&mut self) -> EventBatch;

    /// Capture the current game state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Replace the game state from a snapshot.
    fn restore(&mut self, snapshot: Self::Snapshot) -> Result<(), EngineError>;
}

/// A running scorekeeping session for one variant.
pub struct GameSession<G, S, R> {
    engine: G,
    store: S,
    dispatcher: TriggerDispatcher<R>,
    presentation: PresentationState,
}

impl<G, S, R> GameSession<G, S, R>
where
    G: ScoringEngine,
    S: StateStore,
    R: ActionRunner,
{
    /// Create a session, hydrating the dispatcher's catalog and bindings
    /// from the store.
    pub fn new(engine: G, store: S, runner: R) -> Self {
        let dispatcher = TriggerDispatcher::load(&store, runner);
        Self {
            engine,
            store,
            dispatcher,
            presentation: PresentationState::new(),
        }
    }

    /// Restore the engine from a persisted snapshot, if one exists.
    ///
    /// Returns whether a snapshot was found and applied. An undecodable or
    /// invalid snapshot is logged and skipped; the session starts fresh.
    pub fn hydrate(&mut self) -> bool {
        let key = StorageKey::game_state(self.engine.variant());
        let Some(snapshot) = store::load::<G::Snapshot, _>(&self.store, &key) else {
            return false;
        };
        match self.engine.restore(snapshot) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%key, %error, "persisted game state rejected; starting fresh");
                false
            }
        }
    }

    /// Run one engine operation.
    ///
    /// Drains the events it emitted into the dispatcher and the dialog
    /// machine, persists a fresh snapshot, and returns the operation's
    /// result.
    pub fn apply<T>(&mut self, op: impl FnOnce(&mut G) -> T) -> T {
        let result = op(&mut self.engine);
        for event in self.engine.drain_events() {
            self.dispatcher.dispatch(&event);
            self.presentation.observe(&event);
        }
        store::save(
            &self.store,
            &StorageKey::game_state(self.engine.variant()),
            &self.engine.snapshot(),
        );
        result
    }

    /// The engine, read-only. Mutations go through [`apply`](Self::apply).
    #[must_use]
    pub fn engine(&self) -> &G {
        &self.engine
    }

    /// The backing store handle.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The dialog machine.
    #[must_use]
    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    /// The dialog machine, mutable (open/close, auto-open configuration).
    pub fn presentation_mut(&mut self) -> &mut PresentationState {
        &mut self.presentation
    }

    /// The trigger dispatcher, read-only.
    #[must_use]
    pub fn dispatcher(&self) -> &TriggerDispatcher<R> {
        &self.dispatcher
    }

    /// Actions currently selectable as trigger targets.
    #[must_use]
    pub fn available_actions(&self) -> Vec<&ScriptAction> {
        self.dispatcher.available_actions()
    }

    /// The bindings configured for this session's variant.
    #[must_use]
    pub fn bindings(&self) -> &[TriggerBinding] {
        self.dispatcher.bindings(self.engine.variant())
    }

    /// The event kinds still available for a new binding.
    #[must_use]
    pub fn available_kinds(&self) -> Vec<EventKind> {
        self.dispatcher.available_kinds(self.engine.variant())
    }

    /// Add a trigger binding for this session's variant.
    pub fn add_binding(
        &mut self,
        kind: EventKind,
        action: impl Into<String>,
        amount: Option<i64>,
    ) -> BindingOutcome {
        self.dispatcher
            .add_binding(&self.store, self.engine.variant(), kind, action, amount)
    }

    /// Remove a trigger binding by id.
    pub fn remove_binding(&mut self, id: BindingId) -> bool {
        self.dispatcher
            .remove_binding(&self.store, self.engine.variant(), id)
    }

    /// Replace the action catalog from a remote entity listing.
    pub fn refresh_catalog(&mut self, listing: impl IntoIterator<Item = (String, String)>) {
        self.dispatcher.refresh_catalog(&self.store, listing);
    }

    /// Flip one catalog entry's active flag.
    pub fn set_action_active(&mut self, entity_id: &str, active: bool) {
        self.dispatcher
            .set_action_active(&self.store, entity_id, active);
    }
}
