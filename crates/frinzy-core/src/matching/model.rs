//! Decision and match domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FrinzyError, Result};

/// The current like/pass of `actor_id` toward `target_id`.
///
/// At most one decision exists per ordered pair; a newer one overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub actor_id: String,
    pub target_id: String,
    pub liked: bool,
    pub created_at: DateTime<Utc>,
}

impl Decision {
    /// Builds a decision, rejecting self-decisions and blank ids.
    pub fn new(actor_id: &str, target_id: &str, liked: bool, created_at: DateTime<Utc>) -> Result<Self> {
        if actor_id.trim().is_empty() {
            return Err(FrinzyError::missing_field("actor_id"));
        }
        if target_id.trim().is_empty() {
            return Err(FrinzyError::missing_field("target_id"));
        }
        if actor_id == target_id {
            return Err(FrinzyError::validation(
                "target_id",
                "cannot record a decision about yourself",
            ));
        }
        Ok(Self {
            actor_id: actor_id.to_string(),
            target_id: target_id.to_string(),
            liked,
            created_at,
        })
    }

    /// Key of the ordered pair this decision occupies.
    pub fn key(&self) -> (String, String) {
        (self.actor_id.clone(), self.target_id.clone())
    }

    /// Key of the decision that would reciprocate this one.
    pub fn reverse_key(&self) -> (String, String) {
        (self.target_id.clone(), self.actor_id.clone())
    }
}

/// Order-independent identity of a pair of members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    low: String,
    high: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Result<Self> {
        if a == b {
            return Err(FrinzyError::validation("pair", "a pair needs two distinct members"));
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        Ok(Self {
            low: low.to_string(),
            high: high.to_string(),
        })
    }

    pub fn members(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.low == id || self.high == id
    }
}

/// A reciprocal connection and the chat thread it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub member_a: String,
    pub member_b: String,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Creates a match with a fresh id for the unordered pair.
    pub fn new(pair: &PairKey, created_at: DateTime<Utc>) -> Self {
        let (a, b) = pair.members();
        Self {
            id: format!("match_{}", uuid::Uuid::new_v4().simple()),
            member_a: a.to_string(),
            member_b: b.to_string(),
            created_at,
        }
    }

    pub fn pair(&self) -> Result<PairKey> {
        PairKey::new(&self.member_a, &self.member_b)
    }

    pub fn has_member(&self, id: &str) -> bool {
        self.member_a == id || self.member_b == id
    }

    /// The member that is not `id`.
    pub fn other_member(&self, id: &str) -> Option<&str> {
        if self.member_a == id {
            Some(&self.member_b)
        } else if self.member_b == id {
            Some(&self.member_a)
        } else {
            None
        }
    }
}

/// Result of recording a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    /// True only for the call that created the match
    pub match_created: bool,
    /// The pair's match, whether created now or earlier
    pub match_id: Option<String>,
}

impl DecisionOutcome {
    pub fn no_match() -> Self {
        Self {
            match_created: false,
            match_id: None,
        }
    }
}
