//! Event domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FrinzyError, Result};
use crate::profile::City;

const TITLE_MAX_LEN: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub city: City,
    pub starts_at: DateTime<Utc>,
    /// Member ids in RSVP order, each at most once
    #[serde(default)]
    attendees: Vec<String>,
}

impl Event {
    /// Builds an event with a fresh id and nobody attending.
    pub fn new(
        title: &str,
        description: &str,
        city: City,
        starts_at: DateTime<Utc>,
    ) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(FrinzyError::missing_field("title"));
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(FrinzyError::validation(
                "title",
                format!("must be at most {} characters", TITLE_MAX_LEN),
            ));
        }
        Ok(Self {
            id: format!("event_{}", uuid::Uuid::new_v4().simple()),
            title: title.to_string(),
            description: description.trim().to_string(),
            city,
            starts_at,
            attendees: Vec::new(),
        })
    }

    pub fn attendees(&self) -> &[String] {
        &self.attendees
    }

    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_attending(&self, member_id: &str) -> bool {
        self.attendees.iter().any(|a| a == member_id)
    }

    /// Adds `member_id`; returns `false` if already attending.
    pub fn attend(&mut self, member_id: &str) -> bool {
        if self.is_attending(member_id) {
            return false;
        }
        self.attendees.push(member_id.to_string());
        true
    }

    /// Removes `member_id`; returns `false` if not attending.
    pub fn unattend(&mut self, member_id: &str) -> bool {
        let before = self.attendees.len();
        self.attendees.retain(|a| a != member_id);
        self.attendees.len() != before
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }
}
