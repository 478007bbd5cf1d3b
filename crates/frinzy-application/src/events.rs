//! City events: listing, creation and RSVPs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use frinzy_core::events::{Event, EventRepository};
use frinzy_core::profile::{City, Profile, ProfileRepository};
use frinzy_core::{FrinzyError, Result};
use tracing::info;

pub struct EventService {
    events: Arc<dyn EventRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl EventService {
    pub fn new(events: Arc<dyn EventRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { events, profiles }
    }

    /// Events in `city` that have not started by `now`, soonest first.
    pub async fn upcoming(&self, city: City, now: DateTime<Utc>) -> Result<Vec<Event>> {
        Ok(self
            .events
            .list_events_by_city(city)
            .await?
            .into_iter()
            .filter(|e| !e.has_started(now))
            .collect())
    }

    /// Upcoming events in the member's own city.
    pub async fn upcoming_for(&self, member_id: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let member = self.member(member_id).await?;
        self.upcoming(member.city, now).await
    }

    /// Creates an event in the organizer's city. The organizer attends it.
    pub async fn create(
        &self,
        organizer_id: &str,
        title: &str,
        description: &str,
        starts_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Event> {
        let organizer = self.member(organizer_id).await?;
        if starts_at <= now {
            return Err(FrinzyError::validation(
                "starts_at",
                "event must start in the future",
            ));
        }
        let mut event = Event::new(title, description, organizer.city, starts_at)?;
        event.attend(organizer_id);
        self.events.save_event(&event).await?;
        info!(
            "[EventService] {} created {} in {}",
            organizer_id, event.id, event.city
        );
        Ok(event)
    }

    /// RSVPs `member_id`. Attending twice is a no-op.
    pub async fn attend(&self, event_id: &str, member_id: &str) -> Result<Event> {
        self.member(member_id).await?;
        self.events.set_attendance(event_id, member_id, true).await
    }

    /// Withdraws the RSVP. Withdrawing when not attending is a no-op.
    pub async fn unattend(&self, event_id: &str, member_id: &str) -> Result<Event> {
        self.member(member_id).await?;
        self.events.set_attendance(event_id, member_id, false).await
    }

    async fn member(&self, member_id: &str) -> Result<Profile> {
        self.profiles
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| FrinzyError::not_found("Profile", member_id))
    }
}
