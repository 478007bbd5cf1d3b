//! Cancellable live subscription.

use frinzy_core::chat::{LiveEvent, MessageStream};
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

pub struct LiveSubscription {
    stream: MessageStream,
    cancel: CancellationToken,
}

impl LiveSubscription {
    pub fn new(stream: MessageStream) -> Self {
        Self {
            stream,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that ends this subscription from another task.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Next live event; `None` once cancelled or the feed ends.
    pub async fn next(&mut self) -> Option<LiveEvent> {
        if self.cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            _ = self.cancel.cancelled() => None,
            item = self.stream.next() => item,
        }
    }

    /// Cancels and drops the underlying stream.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.stream = Box::pin(futures::stream::empty());
    }
}

impl Drop for LiveSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
