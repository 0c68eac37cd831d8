//! Trigger dispatcher.
//!
//! Holds the per-variant binding sets and the cached action catalog. On a
//! domain event it resolves matching bindings and forwards fire-and-forget
//! calls to the Action Executor. Binding mutations persist wholesale through
//! the State Store.

use rustc_hash::FxHashMap;

use crate::actions::{ActionCatalog, ActionRunner, ScriptAction};
use crate::store::{self, StateStore, StorageKey};

use super::binding::{BindingId, BindingOutcome, TriggerBinding};
use super::event::{EventKind, GameEvent, Variant};

/// Maps game events to external actions.
pub struct TriggerDispatcher<R> {
    runner: R,
    catalog: ActionCatalog,
    bindings: FxHashMap<Variant, Vec<TriggerBinding>>,
}

impl<R: ActionRunner> TriggerDispatcher<R> {
    /// Create a dispatcher with no bindings and an empty catalog.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            catalog: ActionCatalog::new(),
            bindings: FxHashMap::default(),
        }
    }

    /// Create a dispatcher hydrated from the store: the shared catalog plus
    /// every variant's binding list. Absent keys mean empty defaults.
    pub fn load<S: StateStore + ?Sized>(store: &S, runner: R) -> Self {
        let mut dispatcher = Self::new(runner);
        if let Some(catalog) = store::load(store, &StorageKey::action_catalog()) {
            dispatcher.catalog = catalog;
        }
        for variant in Variant::ALL {
            if let Some(bindings) = store::load(store, &StorageKey::bindings(variant)) {
                dispatcher.bindings.insert(variant, bindings);
            }
        }
        dispatcher
    }

    /// The cached action catalog.
    #[must_use]
    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    /// Actions currently selectable as trigger targets.
    #[must_use]
    pub fn available_actions(&self) -> Vec<&ScriptAction> {
        self.catalog.active().collect()
    }

    /// Replace the catalog from a remote entity listing and persist it.
    pub fn refresh_catalog<S: StateStore + ?Sized>(
        &mut self,
        store: &S,
        listing: impl IntoIterator<Item = (String, String)>,
    ) {
        self.catalog.refresh(listing);
        store::save(store, &StorageKey::action_catalog(), &self.catalog);
    }

    /// Flip one catalog entry's active flag and persist.
    pub fn set_action_active<S: StateStore + ?Sized>(
        &mut self,
        store: &S,
        entity_id: &str,
        active: bool,
    ) {
        self.catalog.set_active(entity_id, active);
        store::save(store, &StorageKey::action_catalog(), &self.catalog);
    }

    /// The bindings configured for a variant.
    #[must_use]
    pub fn bindings(&self, variant: Variant) -> &[TriggerBinding] {
        self.bindings.get(&variant).map_or(&[], Vec::as_slice)
    }

    /// The event kinds still available for a new binding under a variant.
    ///
    /// Already-bound kinds are excluded, except the threshold kind, which
    /// stays offered because several amounts may coexist.
    #[must_use]
    pub fn available_kinds(&self, variant: Variant) -> Vec<EventKind> {
        let bound = self.bindings(variant);
        variant
            .bindable_kinds()
            .iter()
            .copied()
            .filter(|kind| kind.is_threshold() || !bound.iter().any(|b| b.kind == *kind))
            .collect()
    }

    /// Add a binding, rejecting duplicates.
    ///
    /// Non-threshold kinds allow a single binding. The threshold kind
    /// requires an amount and allows one binding per distinct amount. On
    /// success the variant's binding list is persisted wholesale.
    pub fn add_binding<S: StateStore + ?Sized>(
        &mut self,
        store: &S,
        variant: Variant,
        kind: EventKind,
        action: impl Into<String>,
        amount: Option<i64>,
    ) -> BindingOutcome {
        let amount = if kind.is_threshold() {
            match amount {
                Some(amount) => Some(amount),
                None => return BindingOutcome::MissingAmount,
            }
        } else {
            None
        };

        let bindings = self.bindings.entry(variant).or_default();
        let duplicate = bindings
            .iter()
            .any(|b| b.kind == kind && (!kind.is_threshold() || b.amount == amount));
        if duplicate {
            return BindingOutcome::Duplicate;
        }

        let binding = TriggerBinding::new(kind, action, amount);
        let id = binding.id;
        bindings.push(binding);
        store::save(store, &StorageKey::bindings(variant), bindings);
        BindingOutcome::Added(id)
    }

    /// Remove a binding by id and persist. Returns whether anything was
    /// removed.
    pub fn remove_binding<S: StateStore + ?Sized>(
        &mut self,
        store: &S,
        variant: Variant,
        id: BindingId,
    ) -> bool {
        let Some(bindings) = self.bindings.get_mut(&variant) else {
            return false;
        };
        let before = bindings.len();
        bindings.retain(|b| b.id != id);
        let removed = bindings.len() != before;
        if removed {
            store::save(store, &StorageKey::bindings(variant), bindings);
        }
        removed
    }

    /// Resolve and fire the bindings matching an event.
    ///
    /// Threshold bindings match when the event's amount reaches their own;
    /// every matching binding fires once. Other kinds have at most one
    /// binding. Bound names missing from the active catalog are logged and
    /// skipped; nothing is surfaced to the caller.
    pub fn dispatch(&self, event: &GameEvent) {
        for binding in self.bindings(event.variant) {
            if binding.kind != event.kind {
                continue;
            }
            if binding.kind.is_threshold() {
                let reached = matches!(
                    (event.amount, binding.amount),
                    (Some(actual), Some(threshold)) if actual >= threshold
                );
                if !reached {
                    continue;
                }
            }
            self.run_action(&binding.action, event);
        }
    }

    fn run_action(&self, action: &str, event: &GameEvent) {
        match self.catalog.entity_id_for(action) {
            Some(entity_id) => {
                tracing::debug!(%action, %entity_id, kind = %event.kind, "dispatching trigger action");
                self.runner.run(entity_id);
            }
            None => {
                tracing::warn!(%action, kind = %event.kind, "bound action not in active catalog; skipping");
            }
        }
    }
}
