//! Timestamped session log.
//!
//! Every scoring and turn action appends a human-readable line. The log is
//! part of the persisted game state, so a hydrated session keeps its
//! history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line in the session log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the entry was written.
    pub at: DateTime<Utc>,

    /// Human-readable description of what happened.
    pub text: String,
}

/// Ordered session log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, stamped with the current time.
    pub fn push(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry {
            at: Utc::now(),
            text: text.into(),
        });
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry contains the given text.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e.text.contains(text))
    }
}
