//! Available-actions catalog.
//!
//! The catalog caches the external system's script listing. Only entries the
//! user has marked active are offered as trigger targets; the rest stay in
//! the catalog so their flags survive a refresh.

use serde::{Deserialize, Serialize};

/// One runnable action from the external system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptAction {
    /// Opaque identifier the Action Executor runs by.
    pub entity_id: String,

    /// Display name, as configured in the external system.
    pub name: String,

    /// Whether the user allows this action as a trigger target.
    pub active: bool,
}

/// Prefix identifying runnable script entities in a remote state listing.
const SCRIPT_PREFIX: &str = "script.";

/// Cached catalog of script actions, sorted by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCatalog {
    entries: Vec<ScriptAction>,
}

impl ActionCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog from a remote entity listing of
    /// `(entity_id, name)` pairs.
    ///
    /// Keeps only script entities, carries previously stored `active` flags
    /// across (unknown entities start hidden), and sorts by name.
    pub fn refresh(&mut self, listing: impl IntoIterator<Item = (String, String)>) {
        let previous = std::mem::take(&mut self.entries);
        let stored_active = |entity_id: &str| {
            previous
                .iter()
                .find(|e| e.entity_id == entity_id)
                .is_some_and(|e| e.active)
        };

        let mut entries: Vec<ScriptAction> = listing
            .into_iter()
            .filter(|(entity_id, _)| entity_id.starts_with(SCRIPT_PREFIX))
            .map(|(entity_id, name)| ScriptAction {
                active: stored_active(&entity_id),
                entity_id,
                name,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        self.entries = entries;
    }

    /// All entries, active or not.
    #[must_use]
    pub fn entries(&self) -> &[ScriptAction] {
        &self.entries
    }

    /// The entries selectable as trigger targets.
    pub fn active(&self) -> impl Iterator<Item = &ScriptAction> {
        self.entries.iter().filter(|e| e.active)
    }

    /// Resolve an active action's name to its entity id.
    #[must_use]
    pub fn entity_id_for(&self, name: &str) -> Option<&str> {
        self.active()
            .find(|e| e.name == name)
            .map(|e| e.entity_id.as_str())
    }

    /// Flip one entry's active flag. Unknown ids are ignored.
    pub fn set_active(&mut self, entity_id: &str, active: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.entity_id == entity_id) {
            entry.active = active;
        }
    }

    /// Mark every entry active.
    pub fn allow_all(&mut self) {
        for entry in &mut self.entries {
            entry.active = true;
        }
    }

    /// Mark every entry inactive.
    pub fn hide_all(&mut self) {
        for entry in &mut self.entries {
            entry.active = false;
        }
    }

    /// Entries whose name contains the given text.
    pub fn filter<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a ScriptAction> {
        self.entries.iter().filter(move |e| e.name.contains(text))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
