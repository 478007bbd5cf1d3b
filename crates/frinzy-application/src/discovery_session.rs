//! Discovery: one viewer walking their ranked queue.

use std::sync::Arc;

use frinzy_core::discovery::{DiscoveryQueue, QueueState, RankedCandidate};
use frinzy_core::matching::DecisionOutcome;
use frinzy_core::profile::{Profile, ProfileRepository};
use frinzy_core::{FrinzyError, Result};
use tracing::debug;

use crate::decision_recorder::DecisionRecorder;

pub struct DiscoveryUseCase {
    profiles: Arc<dyn ProfileRepository>,
    recorder: Arc<DecisionRecorder>,
}

impl DiscoveryUseCase {
    pub fn new(profiles: Arc<dyn ProfileRepository>, recorder: Arc<DecisionRecorder>) -> Self {
        Self { profiles, recorder }
    }

    /// Builds a fresh queue for `viewer_id` from the profiles in their city.
    pub async fn open(&self, viewer_id: &str) -> Result<DiscoverySession> {
        let viewer = self
            .profiles
            .find_by_id(viewer_id)
            .await?
            .ok_or_else(|| FrinzyError::not_found("Profile", viewer_id))?;
        let pool = self.profiles.list_by_city(viewer.city).await?;
        let queue = DiscoveryQueue::build(&viewer, pool);
        debug!(
            "[Discovery] Queue for {} has {} candidates",
            viewer.id,
            queue.len()
        );
        Ok(DiscoverySession {
            viewer,
            queue,
            recorder: self.recorder.clone(),
        })
    }
}

/// Sequential decisions over one queue.
///
/// Decisions take `&mut self`, so a queue position can never have two
/// decisions in flight.
pub struct DiscoverySession {
    viewer: Profile,
    queue: DiscoveryQueue,
    recorder: Arc<DecisionRecorder>,
}

impl DiscoverySession {
    pub fn viewer(&self) -> &Profile {
        &self.viewer
    }

    pub fn current(&self) -> Option<&RankedCandidate> {
        self.queue.current()
    }

    pub fn state(&self) -> QueueState {
        self.queue.state()
    }

    pub fn queue(&self) -> &DiscoveryQueue {
        &self.queue
    }

    pub async fn like(&mut self) -> Result<DecisionOutcome> {
        self.decide(true).await
    }

    pub async fn pass(&mut self) -> Result<DecisionOutcome> {
        self.decide(false).await
    }

    /// Records a decision on the current candidate, then advances.
    ///
    /// The cursor only moves after the decision is stored; on error the same
    /// candidate stays current.
    pub async fn decide(&mut self, liked: bool) -> Result<DecisionOutcome> {
        let target_id = self
            .queue
            .current()
            .map(|c| c.profile.id.clone())
            .ok_or_else(|| FrinzyError::validation("queue", "no candidate left to decide on"))?;

        let outcome = self
            .recorder
            .record_decision(&self.viewer.id, &target_id, liked)
            .await?;
        self.queue.advance();
        Ok(outcome)
    }
}
