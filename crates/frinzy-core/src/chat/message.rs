//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FrinzyError, Result};

/// An immutable chat message. Ordered by `timestamp`, then arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub match_id: String,
    pub sender_id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(match_id: &str, sender_id: &str, text: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: format!("msg_{}", uuid::Uuid::new_v4().simple()),
            match_id: match_id.to_string(),
            sender_id: sender_id.to_string(),
            text: text.to_string(),
            timestamp,
        }
    }
}

/// Local delivery tag of a message in an open chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// Inserted locally, not yet confirmed by the store.
    Pending,
    /// Stored by the backend (or received from it).
    Confirmed,
    /// Confirmation failed after retrying; may be resent.
    Failed,
}

/// Checks message text: non-empty after trimming and at most `max_len` chars.
pub fn validate_text(text: &str, max_len: usize) -> Result<()> {
    if text.trim().is_empty() {
        return Err(FrinzyError::validation("text", "message cannot be empty"));
    }
    if text.chars().count() > max_len {
        return Err(FrinzyError::validation(
            "text",
            format!("message longer than {} characters", max_len),
        ));
    }
    Ok(())
}
