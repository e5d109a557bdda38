//! Activity Log
//!
//! Audit trail attached to every order. Entries are appended, never edited or removed, and
//! each message is stored verbatim. Consumers display the message as-is rather than
//! rebuilding text from the [`ActivityKind`].

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Category of an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Order created.
    Created,

    /// Fulfilment status changed.
    Status,

    /// Payment amounts changed.
    Payment,

    /// Delivery details changed.
    Delivery,

    /// Any other edit.
    Edit,
}

/// A single audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    at: Timestamp,
    kind: ActivityKind,
    message: String,
}

impl ActivityEntry {
    /// Build an entry.
    pub fn new(at: Timestamp, kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            at,
            kind,
            message: message.into(),
        }
    }

    /// When it happened.
    pub const fn at(&self) -> Timestamp {
        self.at
    }

    /// What kind of change it records.
    pub const fn kind(&self) -> ActivityKind {
        self.kind
    }

    /// The message as written.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Append-only list of [`ActivityEntry`] in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog(Vec<ActivityEntry>);

impl ActivityLog {
    /// An empty log.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an entry.
    pub fn record(&mut self, at: Timestamp, kind: ActivityKind, message: impl Into<String>) {
        self.0.push(ActivityEntry::new(at, kind, message));
    }

    /// Append entries produced elsewhere.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = ActivityEntry>) {
        self.0.extend(entries);
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.0
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.0.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries of one kind, oldest first.
    pub fn of_kind(&self, kind: ActivityKind) -> impl Iterator<Item = &ActivityEntry> {
        self.0.iter().filter(move |entry| entry.kind == kind)
    }
}

impl<'a> IntoIterator for &'a ActivityLog {
    type Item = &'a ActivityEntry;
    type IntoIter = std::slice::Iter<'a, ActivityEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
