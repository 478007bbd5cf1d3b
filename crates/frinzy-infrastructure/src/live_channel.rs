//! In-process live channel built on `tokio::sync::broadcast`.
//!
//! One sender per match id, created on first use. A subscriber that falls
//! more than `capacity` messages behind receives `LiveEvent::Lagged` in place
//! of the dropped messages.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use frinzy_core::chat::{LiveChannel, LiveEvent, Message, MessageStream};
use frinzy_core::{FrinzyError, Result};
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::{debug, warn};

pub struct BroadcastLiveChannel {
    capacity: usize,
    senders: RwLock<HashMap<String, broadcast::Sender<Message>>>,
}

impl BroadcastLiveChannel {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            senders: RwLock::new(HashMap::new()),
        }
    }

    /// Fans `message` out to current subscribers of its match.
    ///
    /// Returns the number of receivers reached; zero when nobody listens.
    pub fn publish(&self, message: &Message) -> usize {
        let Ok(senders) = self.senders.read() else {
            warn!("[LiveChannel] Sender table poisoned, dropping {}", message.id);
            return 0;
        };
        match senders.get(&message.match_id) {
            Some(tx) => tx.send(message.clone()).unwrap_or(0),
            None => 0,
        }
    }

    pub fn subscriber_count(&self, match_id: &str) -> usize {
        self.senders
            .read()
            .ok()
            .and_then(|s| s.get(match_id).map(|tx| tx.receiver_count()))
            .unwrap_or(0)
    }

    fn sender(&self, match_id: &str) -> Result<broadcast::Sender<Message>> {
        let mut senders = self
            .senders
            .write()
            .map_err(|_| FrinzyError::internal("live channel table poisoned"))?;
        let tx = senders
            .entry(match_id.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        Ok(tx.clone())
    }
}

#[async_trait]
impl LiveChannel for BroadcastLiveChannel {
    async fn subscribe(&self, match_id: &str) -> Result<MessageStream> {
        let rx = self.sender(match_id)?.subscribe();
        debug!("[LiveChannel] New subscriber for {}", match_id);

        let match_id = match_id.to_string();
        let stream = BroadcastStream::new(rx).map(move |item| match item {
            Ok(message) => LiveEvent::Message(message),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(
                    "[LiveChannel] Subscriber of {} lagged, {} messages skipped",
                    match_id, skipped
                );
                LiveEvent::Lagged(skipped)
            }
        });
        Ok(Box::pin(stream))
    }
}
