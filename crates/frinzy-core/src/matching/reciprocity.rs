//! Reciprocity resolution.
//!
//! Pure decision logic run by a record store inside the same critical section
//! that writes the decision, so that the write, the reciprocity check and the
//! match insert are observed as one step.

use super::model::{Decision, DecisionOutcome, Match, PairKey};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Not reciprocal (or not a like); nothing to create.
    NoMatch,
    /// Reciprocal, and the pair already has this match.
    Existing(Match),
    /// Reciprocal and new: the store must insert this match.
    Create(Match),
}

impl Resolution {
    pub fn outcome(&self) -> DecisionOutcome {
        match self {
            Resolution::NoMatch => DecisionOutcome::no_match(),
            Resolution::Existing(m) => DecisionOutcome {
                match_created: false,
                match_id: Some(m.id.clone()),
            },
            Resolution::Create(m) => DecisionOutcome {
                match_created: true,
                match_id: Some(m.id.clone()),
            },
        }
    }
}

/// Decides what a freshly stored `decision` implies for its pair.
///
/// `reverse` is the current decision in the opposite direction, `existing` the
/// pair's match if one was already created.
pub fn resolve(
    decision: &Decision,
    reverse: Option<&Decision>,
    existing: Option<&Match>,
) -> Result<Resolution> {
    let reciprocal = decision.liked && reverse.is_some_and(|r| r.liked);
    if !reciprocal {
        return Ok(Resolution::NoMatch);
    }
    if let Some(existing) = existing {
        return Ok(Resolution::Existing(existing.clone()));
    }
    let pair = PairKey::new(&decision.actor_id, &decision.target_id)?;
    Ok(Resolution::Create(Match::new(&pair, decision.created_at)))
}
