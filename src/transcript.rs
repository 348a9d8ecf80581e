//! Append-only transcript log
//!
//! Utterances are stored for the lifetime of the process. There is no
//! deletion or compaction; unbounded growth is an accepted limitation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A single transcribed utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Who spoke ("Unknown" when the origin carried no participant id)
    pub speaker: String,

    /// Transcribed text, never empty
    pub text: String,

    /// When this utterance was transcribed, if the origin provided it
    pub timestamp: Option<DateTime<Utc>>,
}

impl TranscriptEntry {
    pub fn new(
        speaker: impl Into<String>,
        text: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            timestamp,
        }
    }
}

/// Ordered, append-only log of transcript entries.
///
/// Cheap to clone; all clones share the same underlying log. Entries are
/// never mutated or reordered after insertion.
#[derive(Clone, Default)]
pub struct TranscriptStore {
    entries: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the log.
    ///
    /// Entries whose trimmed text is empty are discarded. Returns whether
    /// the entry was stored.
    pub async fn append(&self, entry: TranscriptEntry) -> bool {
        if entry.text.trim().is_empty() {
            return false;
        }

        let mut entries = self.entries.lock().await;
        entries.push(entry);
        true
    }

    /// Full ordered copy of the log. Mutating the returned vector has no
    /// effect on the store.
    pub async fn snapshot(&self) -> Vec<TranscriptEntry> {
        let entries = self.entries.lock().await;
        entries.clone()
    }

    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
