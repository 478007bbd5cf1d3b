//! In-memory record store.
//!
//! Implements every repository trait over one table set guarded by a single
//! mutex, so each call is atomic on its own. `record` performs the decision
//! upsert, the reverse read and the match insert under one lock acquisition.
//!
//! Failure injection (`set_unavailable`, `fail_next_writes`) lets callers
//! exercise their `TransientStore` handling.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use frinzy_core::chat::{Message, MessageRepository};
use frinzy_core::events::{Event, EventRepository};
use frinzy_core::matching::{
    Decision, DecisionOutcome, DecisionRepository, Match, MatchRepository, PairKey, Resolution,
    resolve,
};
use frinzy_core::profile::{City, Profile, ProfileRepository};
use frinzy_core::{FrinzyError, Result};
use tracing::{debug, info};

use crate::live_channel::BroadcastLiveChannel;

#[derive(Default)]
struct Tables {
    profiles: HashMap<String, Profile>,
    profile_order: Vec<String>,
    decisions: HashMap<(String, String), Decision>,
    matches: HashMap<String, Match>,
    match_by_pair: HashMap<PairKey, String>,
    messages: HashMap<String, Vec<Message>>,
    message_ids: HashSet<String>,
    events: HashMap<String, Event>,
}

impl Tables {
    fn match_for_pair(&self, pair: &PairKey) -> Option<&Match> {
        self.match_by_pair
            .get(pair)
            .and_then(|id| self.matches.get(id))
    }

    /// Inserts unless the pair already has a match; returns the stored one.
    fn insert_match(&mut self, candidate: Match) -> Result<Match> {
        let pair = candidate.pair()?;
        if let Some(existing) = self.match_for_pair(&pair) {
            return Ok(existing.clone());
        }
        self.match_by_pair.insert(pair, candidate.id.clone());
        self.matches.insert(candidate.id.clone(), candidate.clone());
        Ok(candidate)
    }
}

#[derive(Default)]
pub struct InMemoryRecordStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
    failing_writes: AtomicUsize,
    live: Option<Arc<BroadcastLiveChannel>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes every newly appended message on `live`.
    pub fn with_live_channel(live: Arc<BroadcastLiveChannel>) -> Self {
        Self {
            live: Some(live),
            ..Self::default()
        }
    }

    /// While set, every call fails with `TransientStore`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes the next `count` write calls fail with `TransientStore`.
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(FrinzyError::transient("record store unavailable"));
        }
        self.tables
            .lock()
            .map_err(|_| FrinzyError::internal("record store lock poisoned"))
    }

    fn lock_for_write(&self) -> Result<MutexGuard<'_, Tables>> {
        let tables = self.lock()?;
        let injected = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(FrinzyError::transient("injected write failure"));
        }
        Ok(tables)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRecordStore {
    async fn find_by_id(&self, profile_id: &str) -> Result<Option<Profile>> {
        Ok(self.lock()?.profiles.get(profile_id).cloned())
    }

    async fn insert_if_absent(&self, profile: &Profile) -> Result<Profile> {
        let mut tables = self.lock_for_write()?;
        if let Some(existing) = tables.profiles.get(&profile.id) {
            debug!("[RecordStore] Profile {} already exists", profile.id);
            return Ok(existing.clone());
        }
        tables.profile_order.push(profile.id.clone());
        tables.profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile.clone())
    }

    async fn save(&self, profile: &Profile) -> Result<()> {
        let mut tables = self.lock_for_write()?;
        if !tables.profiles.contains_key(&profile.id) {
            tables.profile_order.push(profile.id.clone());
        }
        tables.profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Profile>> {
        let tables = self.lock()?;
        Ok(tables
            .profile_order
            .iter()
            .filter_map(|id| tables.profiles.get(id).cloned())
            .collect())
    }

    async fn list_by_city(&self, city: City) -> Result<Vec<Profile>> {
        let tables = self.lock()?;
        Ok(tables
            .profile_order
            .iter()
            .filter_map(|id| tables.profiles.get(id))
            .filter(|p| p.city == city)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DecisionRepository for InMemoryRecordStore {
    async fn find(&self, actor_id: &str, target_id: &str) -> Result<Option<Decision>> {
        Ok(self
            .lock()?
            .decisions
            .get(&(actor_id.to_string(), target_id.to_string()))
            .cloned())
    }

    async fn record(&self, decision: Decision) -> Result<DecisionOutcome> {
        let mut tables = self.lock_for_write()?;

        let resolution = {
            let reverse = tables.decisions.get(&decision.reverse_key());
            let pair = PairKey::new(&decision.actor_id, &decision.target_id)?;
            let existing = tables.match_for_pair(&pair);
            resolve(&decision, reverse, existing)?
        };

        tables.decisions.insert(decision.key(), decision);

        match resolution {
            Resolution::Create(candidate) => {
                let stored = tables.insert_match(candidate)?;
                info!(
                    "[RecordStore] Match {} formed between {} and {}",
                    stored.id, stored.member_a, stored.member_b
                );
                Ok(DecisionOutcome {
                    match_created: true,
                    match_id: Some(stored.id),
                })
            }
            other => Ok(other.outcome()),
        }
    }

    async fn list_by_target(&self, target_id: &str) -> Result<Vec<Decision>> {
        let tables = self.lock()?;
        let mut found: Vec<Decision> = tables
            .decisions
            .values()
            .filter(|d| d.target_id == target_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.actor_id.cmp(&b.actor_id)));
        Ok(found)
    }

    async fn list_by_actor(&self, actor_id: &str) -> Result<Vec<Decision>> {
        let tables = self.lock()?;
        let mut found: Vec<Decision> = tables
            .decisions
            .values()
            .filter(|d| d.actor_id == actor_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.target_id.cmp(&b.target_id)));
        Ok(found)
    }
}

#[async_trait]
impl MatchRepository for InMemoryRecordStore {
    async fn find_by_id(&self, match_id: &str) -> Result<Option<Match>> {
        Ok(self.lock()?.matches.get(match_id).cloned())
    }

    async fn find_by_pair(&self, pair: &PairKey) -> Result<Option<Match>> {
        Ok(self.lock()?.match_for_pair(pair).cloned())
    }

    async fn insert_if_absent(&self, candidate: Match) -> Result<Match> {
        self.lock_for_write()?.insert_match(candidate)
    }

    async fn list_for_member(&self, member_id: &str) -> Result<Vec<Match>> {
        let tables = self.lock()?;
        let mut found: Vec<Match> = tables
            .matches
            .values()
            .filter(|m| m.has_member(member_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }
}

#[async_trait]
impl MessageRepository for InMemoryRecordStore {
    async fn append(&self, message: &Message) -> Result<Message> {
        let mut tables = self.lock_for_write()?;
        if !tables.message_ids.insert(message.id.clone()) {
            debug!("[RecordStore] Message {} already stored", message.id);
            let stored = tables
                .messages
                .get(&message.match_id)
                .and_then(|log| log.iter().find(|m| m.id == message.id))
                .cloned();
            return Ok(stored.unwrap_or_else(|| message.clone()));
        }

        let log = tables.messages.entry(message.match_id.clone()).or_default();
        let mut stored = message.clone();
        if let Some(last) = log.last() {
            stored.timestamp = stored.timestamp.max(last.timestamp);
        }
        log.push(stored.clone());

        // Published under the lock so live order equals history order.
        if let Some(live) = &self.live {
            live.publish(&stored);
        }
        Ok(stored)
    }

    async fn list_by_match(&self, match_id: &str) -> Result<Vec<Message>> {
        Ok(self
            .lock()?
            .messages
            .get(match_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl EventRepository for InMemoryRecordStore {
    async fn find_event(&self, event_id: &str) -> Result<Option<Event>> {
        Ok(self.lock()?.events.get(event_id).cloned())
    }

    async fn save_event(&self, event: &Event) -> Result<()> {
        self.lock_for_write()?
            .events
            .insert(event.id.clone(), event.clone());
        Ok(())
    }

    async fn list_events_by_city(&self, city: City) -> Result<Vec<Event>> {
        let tables = self.lock()?;
        let mut found: Vec<Event> = tables
            .events
            .values()
            .filter(|e| e.city == city)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn set_attendance(
        &self,
        event_id: &str,
        member_id: &str,
        attending: bool,
    ) -> Result<Event> {
        let mut tables = self.lock_for_write()?;
        let event = tables
            .events
            .get_mut(event_id)
            .ok_or_else(|| FrinzyError::not_found("Event", event_id))?;
        let changed = if attending {
            event.attend(member_id)
        } else {
            event.unattend(member_id)
        };
        if changed {
            debug!(
                "[RecordStore] {} attending {}: {}",
                member_id, event_id, attending
            );
        }
        Ok(event.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn like(actor: &str, target: &str) -> Decision {
        Decision::new(actor, target, true, Utc::now()).unwrap()
    }

    fn pass(actor: &str, target: &str) -> Decision {
        Decision::new(actor, target, false, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_reciprocal_likes_create_one_match() {
        let store = InMemoryRecordStore::new();

        let first = store.record(like("a", "b")).await.unwrap();
        assert_eq!(first, DecisionOutcome::no_match());

        let second = store.record(like("b", "a")).await.unwrap();
        assert!(second.match_created);

        let third = store.record(like("a", "b")).await.unwrap();
        assert!(!third.match_created);
        assert_eq!(third.match_id, second.match_id);

        assert_eq!(store.list_for_member("a").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_decision_overwrite_keeps_one_row() {
        let store = InMemoryRecordStore::new();
        store.record(like("a", "b")).await.unwrap();
        store.record(pass("a", "b")).await.unwrap();

        let found = DecisionRepository::find(&store, "a", "b").await.unwrap().unwrap();
        assert!(!found.liked);
        assert_eq!(store.list_by_actor("a").await.unwrap().len(), 1);

        let outcome = store.record(like("b", "a")).await.unwrap();
        assert!(!outcome.match_created);
    }

    #[tokio::test]
    async fn test_pass_after_match_keeps_match() {
        let store = InMemoryRecordStore::new();
        store.record(like("a", "b")).await.unwrap();
        let formed = store.record(like("b", "a")).await.unwrap();

        store.record(pass("a", "b")).await.unwrap();

        let pair = PairKey::new("a", "b").unwrap();
        let kept = store.find_by_pair(&pair).await.unwrap().unwrap();
        assert_eq!(Some(kept.id), formed.match_id);
    }

    #[tokio::test]
    async fn test_unavailable_store_changes_nothing() {
        let store = InMemoryRecordStore::new();
        store.set_unavailable(true);
        let err = store.record(like("a", "b")).await.unwrap_err();
        assert!(err.is_transient());

        store.set_unavailable(false);
        assert!(DecisionRepository::find(&store, "a", "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fail_next_writes_counts_down() {
        let store = InMemoryRecordStore::new();
        store.fail_next_writes(1);
        assert!(store.record(like("a", "b")).await.unwrap_err().is_transient());
        assert!(store.record(like("a", "b")).await.is_ok());
    }

    #[tokio::test]
    async fn test_late_message_is_raised_to_log_tail() {
        let store = InMemoryRecordStore::new();
        let base = Utc::now();
        let late = Message::new("m", "a", "late", base + Duration::seconds(2));
        let early = Message::new("m", "b", "early", base);

        store.append(&late).await.unwrap();
        let stored = store.append(&early).await.unwrap();
        let again = store.append(&late).await.unwrap();

        assert_eq!(stored.id, early.id);
        assert_eq!(stored.timestamp, late.timestamp);
        assert_eq!(again, late);

        let log = store.list_by_match("m").await.unwrap();
        let texts: Vec<&str> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["late", "early"]);
        assert!(log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_publish_in_history_order() {
        use frinzy_core::chat::{LiveChannel, LiveEvent};
        use futures::StreamExt;

        let live = Arc::new(BroadcastLiveChannel::new(256));
        let store = Arc::new(InMemoryRecordStore::with_live_channel(live.clone()));
        let mut feed = live.subscribe("m").await.unwrap();

        let writers: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let message = Message::new("m", "a", &format!("{}", i), Utc::now());
                    store.append(&message).await.unwrap();
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap();
        }

        let history = store.list_by_match("m").await.unwrap();
        let mut delivered = Vec::new();
        while delivered.len() < history.len() {
            match feed.next().await {
                Some(LiveEvent::Message(message)) => delivered.push(message),
                other => panic!("unexpected live event {:?}", other),
            }
        }
        assert_eq!(delivered, history);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_rsvps_all_land() {
        let store = Arc::new(InMemoryRecordStore::new());
        let event = Event::new("Food Walk", "", City::Gurugram, Utc::now()).unwrap();
        store.save_event(&event).await.unwrap();

        let rsvps: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                let event_id = event.id.clone();
                tokio::spawn(async move {
                    store
                        .set_attendance(&event_id, &format!("member_{}", i % 8), true)
                        .await
                        .unwrap();
                })
            })
            .collect();
        for rsvp in rsvps {
            rsvp.await.unwrap();
        }

        let stored = store.find_event(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.attendee_count(), 8);
        assert!(store.set_attendance("event_nope", "a", true).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_match_insert_if_absent_returns_existing() {
        let store = InMemoryRecordStore::new();
        let pair = PairKey::new("x", "y").unwrap();
        let first = MatchRepository::insert_if_absent(&store, Match::new(&pair, Utc::now()))
            .await
            .unwrap();
        let second = MatchRepository::insert_if_absent(&store, Match::new(&pair, Utc::now()))
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
    }
}
