//! In-memory prompt history.

use std::sync::{Arc, Mutex, PoisonError};

use clause_core::PromptHistoryEntry;

use crate::surface::Surface;
use crate::view::{HistoryItemView, JUST_NOW_LABEL};

/// Newest-first list of submitted prompts. Lost when the process exits.
pub struct HistorySidebar {
    surface: Arc<dyn Surface>,
    entries: Mutex<Vec<PromptHistoryEntry>>,
}

impl HistorySidebar {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self {
            surface,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Record a prompt and show it at the top of the sidebar.
    ///
    /// No deduplication: the same prompt twice gives two entries.
    pub fn record_prompt(&self, text: &str) -> HistoryItemView {
        let entry = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            let entry = PromptHistoryEntry {
                text: text.to_string(),
                sequence: entries.len() as u64 + 1,
            };
            entries.insert(0, entry.clone());
            entry
        };

        let item = HistoryItemView {
            text: entry.preview(),
            label: JUST_NOW_LABEL,
        };
        self.surface.prepend_history(&item);
        item
    }

    /// All entries, newest first.
    pub fn entries(&self) -> Vec<PromptHistoryEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
