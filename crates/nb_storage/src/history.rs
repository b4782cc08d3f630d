use serde::{Deserialize, Serialize};

use nb_core::HistoryEntry;

pub const HISTORY_CAPACITY: usize = 5;

/// Key the history list is persisted under.
pub const STORAGE_KEY: &str = "newsbite-history";

/// Most-recent-first list holding at most [`HISTORY_CAPACITY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    /// Insert at the front and drop whatever falls past capacity.
    pub fn push(&mut self, entry: HistoryEntry) -> Vec<HistoryEntry> {
        self.entries.insert(0, entry);
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.split_off(HISTORY_CAPACITY)
        } else {
            Vec::new()
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
