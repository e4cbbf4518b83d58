//! Conversation log - append-only history of one session

use crate::record::AnswerRecord;
use serde::{Deserialize, Serialize};

/// Ordered history of answer records for a single session
///
/// Insertion order is chronological order. Records are never removed,
/// replaced or reordered. Each session owns its own log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationLog {
    entries: Vec<AnswerRecord>,
}

impl ConversationLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to the end of the log
    pub fn append(&mut self, record: AnswerRecord) {
        self.entries.push(record);
    }

    /// The last `n` records, most recent first
    ///
    /// Returns the whole log (reversed) when `n` exceeds its length.
    pub fn recent(&self, n: usize) -> Vec<&AnswerRecord> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Full history, oldest first
    pub fn all(&self) -> &[AnswerRecord] {
        &self.entries
    }

    /// Most recent record
    pub fn last(&self) -> Option<&AnswerRecord> {
        self.entries.last()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been asked yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
