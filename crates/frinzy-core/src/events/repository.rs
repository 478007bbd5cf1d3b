//! Event repository trait.

use super::model::Event;
use crate::error::Result;
use crate::profile::City;
use async_trait::async_trait;

/// Store for events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_event(&self, event_id: &str) -> Result<Option<Event>>;

    /// Inserts or overwrites `event`.
    async fn save_event(&self, event: &Event) -> Result<()>;

    /// Events in `city`, ascending by start time.
    async fn list_events_by_city(&self, city: City) -> Result<Vec<Event>>;

    /// Adds or removes `member_id` as one read-modify-write step.
    ///
    /// Returns the stored event afterwards, or `NotFound` for an unknown id.
    async fn set_attendance(
        &self,
        event_id: &str,
        member_id: &str,
        attending: bool,
    ) -> Result<Event>;
}
