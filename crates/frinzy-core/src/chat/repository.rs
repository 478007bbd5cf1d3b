//! Message store and live-update channel traits.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use super::message::Message;
use crate::error::Result;

/// Item of a live subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    Message(Message),
    /// The subscriber fell behind and this many messages were dropped from
    /// its feed. Reload the match log to catch up.
    Lagged(u64),
}

/// Stream of events delivered by a live subscription.
///
/// Delivery is at-least-once: consumers de-duplicate by message id.
pub type MessageStream = Pin<Box<dyn Stream<Item = LiveEvent> + Send>>;

/// Append-only message store.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Appends `message` and returns the stored copy.
    ///
    /// The store owns ordering: a timestamp earlier than the match's last
    /// stored message is raised to it. Appending an id that is already stored
    /// is a no-op that returns the stored copy.
    async fn append(&self, message: &Message) -> Result<Message>;

    /// Full log of a match, ascending by timestamp then insertion.
    async fn list_by_match(&self, match_id: &str) -> Result<Vec<Message>>;
}

/// Per-match feed of newly inserted messages from every sender.
#[async_trait]
pub trait LiveChannel: Send + Sync {
    /// Opens a subscription. Dropping the stream releases it.
    async fn subscribe(&self, match_id: &str) -> Result<MessageStream>;
}
