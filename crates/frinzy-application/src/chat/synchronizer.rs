//! Entry point for chats: history, live feed and opening sessions.

use std::sync::Arc;

use chrono::Utc;
use frinzy_core::chat::{LiveChannel, Message, MessageRepository, validate_text};
use frinzy_core::config::ChatSettings;
use frinzy_core::matching::{Match, MatchRepository};
use frinzy_core::{FrinzyError, Result};
use tracing::{debug, warn};

use super::session::ChatSession;
use super::subscription::LiveSubscription;

pub struct ChatSynchronizer {
    matches: Arc<dyn MatchRepository>,
    messages: Arc<dyn MessageRepository>,
    live: Arc<dyn LiveChannel>,
    settings: ChatSettings,
}

impl ChatSynchronizer {
    pub fn new(
        matches: Arc<dyn MatchRepository>,
        messages: Arc<dyn MessageRepository>,
        live: Arc<dyn LiveChannel>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            matches,
            messages,
            live,
            settings,
        }
    }

    /// Full prior log of a match, ascending by timestamp.
    pub async fn load_history(&self, match_id: &str) -> Result<Vec<Message>> {
        self.require_match(match_id).await?;
        self.messages.list_by_match(match_id).await
    }

    /// Live feed of every message inserted into the match.
    ///
    /// Messages arrive in the store's order. A `LiveEvent::Lagged` means some
    /// were dropped and the history should be reloaded.
    pub async fn subscribe(&self, match_id: &str) -> Result<LiveSubscription> {
        self.require_match(match_id).await?;
        Ok(LiveSubscription::new(self.live.subscribe(match_id).await?))
    }

    /// Opens the chat for `viewer_id`.
    ///
    /// A missing match, or a viewer who is not a member, yields a session in
    /// the `Unavailable` state. Store failures are returned as errors.
    pub async fn open(&self, match_id: &str, viewer_id: &str) -> Result<ChatSession> {
        let mut session =
            ChatSession::loading(match_id, viewer_id, self.messages.clone(), self.settings.clone());

        let chat = match self.matches.find_by_id(match_id).await? {
            Some(chat) if chat.has_member(viewer_id) => chat,
            Some(_) => {
                warn!("[ChatSynchronizer] {} is not a member of {}", viewer_id, match_id);
                session.mark_unavailable()?;
                return Ok(session);
            }
            None => {
                debug!("[ChatSynchronizer] Match {} not found", match_id);
                session.mark_unavailable()?;
                return Ok(session);
            }
        };

        // Subscribe before reading history; overlap is removed by id.
        let subscription = LiveSubscription::new(self.live.subscribe(match_id).await?);
        let history = self.messages.list_by_match(match_id).await?;
        session.become_ready(&chat, history, subscription)?;
        Ok(session)
    }

    /// Appends a message for `sender_id` without an open session.
    ///
    /// The sender must be a member of the match. A transient failure is
    /// retried `confirm_retries` times.
    pub async fn send(&self, match_id: &str, sender_id: &str, text: &str) -> Result<Message> {
        let chat = self.require_match(match_id).await?;
        if !chat.has_member(sender_id) {
            return Err(FrinzyError::forbidden(format!(
                "{} is not a member of {}",
                sender_id, match_id
            )));
        }
        validate_text(text, self.settings.max_message_len)?;

        let message = Message::new(match_id, sender_id, text, Utc::now());
        let attempts = 1 + self.settings.confirm_retries;
        let mut attempt = 1;
        loop {
            match self.messages.append(&message).await {
                Ok(stored) => return Ok(stored),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(
                        "[ChatSynchronizer] Append of {} failed (attempt {}/{}): {}, retrying",
                        message.id, attempt, attempts, e
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn require_match(&self, match_id: &str) -> Result<Match> {
        self.matches
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| FrinzyError::not_found("Match", match_id))
    }
}
