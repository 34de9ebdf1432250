use serde::{Deserialize, Serialize};

/// A single remembered search term.
///
/// Identity is the trimmed `term` (case-sensitive); `last_used_at` is unix millis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub term: String,
    pub last_used_at: i64,
}

impl HistoryEntry {
    pub fn new(term: impl Into<String>, last_used_at: i64) -> Self {
        Self {
            term: term.into(),
            last_used_at,
        }
    }
}
