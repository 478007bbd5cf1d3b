//! One open chat: ordered local log, optimistic sends, live merge.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use frinzy_core::chat::{
    ChatState, DeliveryStatus, LiveEvent, LogEntry, Message, MessageLog, MessageRepository,
    validate_text,
};
use frinzy_core::config::ChatSettings;
use frinzy_core::matching::Match;
use frinzy_core::{FrinzyError, Result};
use tracing::{debug, info, warn};

use super::subscription::LiveSubscription;

pub struct ChatSession {
    match_id: String,
    viewer_id: String,
    partner_id: Option<String>,
    state: ChatState,
    log: MessageLog,
    subscription: Option<LiveSubscription>,
    /// Messages recovered by a resync, not yet handed out by `next_live`
    backlog: VecDeque<Message>,
    needs_resync: bool,
    messages: Arc<dyn MessageRepository>,
    settings: ChatSettings,
}

impl ChatSession {
    pub(crate) fn loading(
        match_id: &str,
        viewer_id: &str,
        messages: Arc<dyn MessageRepository>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            match_id: match_id.to_string(),
            viewer_id: viewer_id.to_string(),
            partner_id: None,
            state: ChatState::Loading,
            log: MessageLog::new(),
            subscription: None,
            backlog: VecDeque::new(),
            needs_resync: false,
            messages,
            settings,
        }
    }

    pub(crate) fn mark_unavailable(&mut self) -> Result<()> {
        self.state = self.state.transition(ChatState::Unavailable)?;
        Ok(())
    }

    /// Loading → Ready with the prior log and a live feed.
    pub(crate) fn become_ready(
        &mut self,
        chat: &Match,
        history: Vec<Message>,
        subscription: LiveSubscription,
    ) -> Result<()> {
        self.state = self.state.transition(ChatState::Ready)?;
        self.partner_id = chat.other_member(&self.viewer_id).map(str::to_string);
        for message in history {
            self.log.insert(message, DeliveryStatus::Confirmed);
        }
        self.subscription = Some(subscription);
        debug!(
            "[ChatSession] {} ready with {} messages",
            self.match_id,
            self.log.len()
        );
        Ok(())
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    pub fn partner_id(&self) -> Option<&str> {
        self.partner_id.as_deref()
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn entries(&self) -> &[LogEntry] {
        self.log.entries()
    }

    pub fn status_of(&self, message_id: &str) -> Option<DeliveryStatus> {
        self.log.status(message_id)
    }

    /// Messages whose confirmation failed, oldest first.
    pub fn failed(&self) -> impl Iterator<Item = &Message> {
        self.log
            .entries()
            .iter()
            .filter(|e| e.status == DeliveryStatus::Failed)
            .map(|e| &e.message)
    }

    /// Sends `text` as the viewer: optimistic insert, then confirmation.
    ///
    /// On a confirmation failure the message stays in the log as `Failed`
    /// and the store error is returned. The message is then listed by
    /// `failed` and can be passed to `resend`. Callers that need the id up
    /// front use `stage` followed by `confirm`.
    pub async fn send(&mut self, text: &str) -> Result<Message> {
        let message = self.stage(text)?;
        self.confirm(&message.id).await?;
        Ok(message)
    }

    /// Inserts `text` locally as `Pending` without contacting the store.
    pub fn stage(&mut self, text: &str) -> Result<Message> {
        self.ensure_ready()?;
        validate_text(text, self.settings.max_message_len)?;

        let timestamp = self.log.next_timestamp(Utc::now());
        let message = Message::new(&self.match_id, &self.viewer_id, text, timestamp);
        self.log.insert(message.clone(), DeliveryStatus::Pending);
        debug!("[ChatSession] Staged {} in {}", message.id, self.match_id);
        Ok(message)
    }

    /// Confirms a staged message with the store.
    ///
    /// Transient failures are retried `confirm_retries` times before the
    /// message is marked `Failed`.
    pub async fn confirm(&mut self, message_id: &str) -> Result<()> {
        self.ensure_ready()?;
        let message = self
            .log
            .get(message_id)
            .map(|e| e.message.clone())
            .ok_or_else(|| FrinzyError::not_found("Message", message_id))?;

        self.state = self.state.transition(ChatState::Sending)?;
        let attempts = 1 + self.settings.confirm_retries;
        let mut attempt = 1;
        let result = loop {
            match self.messages.append(&message).await {
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(
                        "[ChatSession] Confirm of {} failed (attempt {}/{}): {}, retrying",
                        message.id, attempt, attempts, e
                    );
                    attempt += 1;
                }
                other => break other,
            }
        };
        self.state = self.state.transition(ChatState::Ready)?;

        match result {
            Ok(_) => {
                self.log.set_status(&message.id, DeliveryStatus::Confirmed);
                Ok(())
            }
            Err(e) => {
                warn!("[ChatSession] Send of {} failed: {}", message.id, e);
                self.log.set_status(&message.id, DeliveryStatus::Failed);
                Err(e)
            }
        }
    }

    /// Retries a `Failed` message with its original id and text.
    pub async fn resend(&mut self, message_id: &str) -> Result<Message> {
        let entry = self
            .log
            .get(message_id)
            .ok_or_else(|| FrinzyError::not_found("Message", message_id))?;
        if entry.status != DeliveryStatus::Failed {
            return Err(FrinzyError::validation(
                "message_id",
                "only failed messages can be resent",
            ));
        }
        let message = entry.message.clone();
        self.log.set_status(message_id, DeliveryStatus::Pending);
        if let Err(e) = self.confirm(message_id).await {
            self.log.set_status(message_id, DeliveryStatus::Failed);
            return Err(e);
        }
        Ok(message)
    }

    /// Waits for the next message from the live feed that is new to this log.
    ///
    /// Re-deliveries are dropped; a live echo of the viewer's own pending
    /// message confirms it. When the feed reports a lag the match history is
    /// reloaded and the missed messages are returned first, in log order.
    /// `None` once the chat is closed or the feed ends.
    pub async fn next_live(&mut self) -> Option<Message> {
        loop {
            if let Some(message) = self.backlog.pop_front() {
                return Some(message);
            }
            if self.needs_resync && self.resync().await {
                continue;
            }
            let event = self.subscription.as_mut()?.next().await?;
            match event {
                LiveEvent::Message(message) => {
                    if let Some(fresh) = self.merge_delivered(message) {
                        return Some(fresh);
                    }
                }
                LiveEvent::Lagged(skipped) => {
                    warn!(
                        "[ChatSession] Live feed of {} skipped {} messages, reloading",
                        self.match_id, skipped
                    );
                    self.needs_resync = true;
                }
            }
        }
    }

    /// Inserts a delivered message; returns it only if it was new.
    fn merge_delivered(&mut self, message: Message) -> Option<Message> {
        if self.log.contains(&message.id) {
            if self.log.status(&message.id) != Some(DeliveryStatus::Confirmed) {
                self.log.set_status(&message.id, DeliveryStatus::Confirmed);
            }
            return None;
        }
        self.log.insert(message.clone(), DeliveryStatus::Confirmed);
        Some(message)
    }

    /// Merges the stored history into the log, queueing unseen messages.
    ///
    /// Returns `false` and keeps the resync pending if the store fails.
    async fn resync(&mut self) -> bool {
        let history = match self.messages.list_by_match(&self.match_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!("[ChatSession] Reload of {} failed: {}", self.match_id, e);
                return false;
            }
        };
        let mut recovered = 0;
        for message in history {
            if let Some(fresh) = self.merge_delivered(message) {
                self.backlog.push_back(fresh);
                recovered += 1;
            }
        }
        self.needs_resync = false;
        debug!(
            "[ChatSession] Reloaded {}, {} messages recovered",
            self.match_id, recovered
        );
        true
    }

    /// Leaves the chat and releases the live subscription.
    pub fn close(&mut self) {
        if self.state == ChatState::Closed {
            return;
        }
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.backlog.clear();
        self.needs_resync = false;
        self.state = ChatState::Closed;
        info!("[ChatSession] {} closed by {}", self.match_id, self.viewer_id);
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.state {
            ChatState::Ready => Ok(()),
            ChatState::Unavailable => Err(FrinzyError::not_found("Match", self.match_id.clone())),
            other => Err(FrinzyError::validation(
                "chat",
                format!("chat is {}, cannot send", other),
            )),
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}
