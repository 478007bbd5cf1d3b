//! Ordered, de-duplicated message log for one chat.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::message::{DeliveryStatus, Message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: Message,
    pub status: DeliveryStatus,
    seq: u64,
}

impl LogEntry {
    /// Arrival order within the owning log.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Append-only view of a chat, sorted by timestamp with arrival order breaking
/// ties. A message id is only ever present once.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
    ids: HashSet<String>,
    next_seq: u64,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `message` at its ordered position.
    ///
    /// Returns `false` and leaves the log untouched if the id is already present.
    pub fn insert(&mut self, message: Message, status: DeliveryStatus) -> bool {
        if !self.ids.insert(message.id.clone()) {
            return false;
        }
        let at = self
            .entries
            .partition_point(|e| e.message.timestamp <= message.timestamp);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(
            at,
            LogEntry {
                message,
                status,
                seq,
            },
        );
        true
    }

    pub fn contains(&self, message_id: &str) -> bool {
        self.ids.contains(message_id)
    }

    pub fn get(&self, message_id: &str) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.message.id == message_id)
    }

    pub fn status(&self, message_id: &str) -> Option<DeliveryStatus> {
        self.get(message_id).map(|e| e.status)
    }

    /// Updates the delivery tag; returns `false` for unknown ids.
    pub fn set_status(&mut self, message_id: &str, status: DeliveryStatus) -> bool {
        match self.entries.iter_mut().find(|e| e.message.id == message_id) {
            Some(entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().map(|e| &e.message)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.entries.last().map(|e| e.message.timestamp)
    }

    /// Timestamp for a new local message: never earlier than the log's tail.
    pub fn next_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.last_timestamp() {
            Some(last) if last > now => last,
            _ => now,
        }
    }

    pub fn count_with_status(&self, status: DeliveryStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}
