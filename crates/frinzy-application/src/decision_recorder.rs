//! Decision recording and match formation.
//!
//! The store's `record` performs the decision upsert, the reciprocity check and
//! the match insert as one atomic step, so a store failure leaves neither a
//! decision nor a match behind and concurrent reciprocal likes still produce a
//! single match.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use frinzy_core::matching::{
    Decision, DecisionOutcome, DecisionRepository, Match, MatchRepository, PairKey,
};
use frinzy_core::profile::{Profile, ProfileRepository};
use frinzy_core::{FrinzyError, Result};
use tracing::{debug, error, info};

pub struct DecisionRecorder {
    profiles: Arc<dyn ProfileRepository>,
    decisions: Arc<dyn DecisionRepository>,
    matches: Arc<dyn MatchRepository>,
}

impl DecisionRecorder {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        decisions: Arc<dyn DecisionRepository>,
        matches: Arc<dyn MatchRepository>,
    ) -> Self {
        Self {
            profiles,
            decisions,
            matches,
        }
    }

    /// Records `actor_id`'s like or pass on `target_id`.
    ///
    /// Overwrites any earlier decision for the same ordered pair. When the
    /// target already liked the actor and this is a like, the pair's match is
    /// returned, created by this call only if it did not exist.
    pub async fn record_decision(
        &self,
        actor_id: &str,
        target_id: &str,
        liked: bool,
    ) -> Result<DecisionOutcome> {
        let decision = Decision::new(actor_id, target_id, liked, Utc::now())?;

        if self.profiles.find_by_id(target_id).await?.is_none() {
            return Err(FrinzyError::not_found("Profile", target_id));
        }

        let outcome = self.decisions.record(decision).await.inspect_err(|e| {
            error!(
                "[DecisionRecorder] Failed to record {} -> {}: {}",
                actor_id, target_id, e
            )
        })?;

        match (&outcome.match_id, outcome.match_created) {
            (Some(id), true) => info!(
                "[DecisionRecorder] {} and {} matched ({})",
                actor_id, target_id, id
            ),
            (Some(id), false) => debug!(
                "[DecisionRecorder] {} -> {} reaffirmed existing match {}",
                actor_id, target_id, id
            ),
            (None, _) => debug!(
                "[DecisionRecorder] {} -> {} recorded (liked={})",
                actor_id, target_id, liked
            ),
        }
        Ok(outcome)
    }

    /// Creates the pair's match if both members like each other.
    ///
    /// Idempotent: repeated calls return the same match. `None` when the pair
    /// is not reciprocal.
    pub async fn ensure_match(&self, a: &str, b: &str) -> Result<Option<Match>> {
        let pair = PairKey::new(a, b)?;
        let forward = self.decisions.find(a, b).await?;
        let reverse = self.decisions.find(b, a).await?;

        let reciprocal = forward.is_some_and(|d| d.liked) && reverse.is_some_and(|d| d.liked);
        if !reciprocal {
            return Ok(None);
        }
        if let Some(existing) = self.matches.find_by_pair(&pair).await? {
            return Ok(Some(existing));
        }
        let stored = self.matches.insert_if_absent(Match::new(&pair, Utc::now())).await?;
        Ok(Some(stored))
    }

    /// Profiles that liked `viewer_id` and are still awaiting the viewer's decision.
    pub async fn incoming_likes(&self, viewer_id: &str) -> Result<Vec<Profile>> {
        let decided: HashSet<String> = self
            .decisions
            .list_by_actor(viewer_id)
            .await?
            .into_iter()
            .map(|d| d.target_id)
            .collect();

        let mut likers = Vec::new();
        for decision in self.decisions.list_by_target(viewer_id).await? {
            if !decision.liked || decided.contains(&decision.actor_id) {
                continue;
            }
            if let Some(profile) = self.profiles.find_by_id(&decision.actor_id).await? {
                likers.push(profile);
            }
        }
        Ok(likers)
    }

    /// Every match `member_id` belongs to, newest first.
    pub async fn matches_for(&self, member_id: &str) -> Result<Vec<Match>> {
        let mut found = self.matches.list_for_member(member_id).await?;
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}
