//! Discovery queue.
//!
//! Builds the ordered candidate list for one viewer and walks it with a cursor
//! that only ever moves forward.

use std::collections::HashSet;

use crate::profile::Profile;
use crate::scoring::score;

/// Observable state of a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// Nobody qualified when the queue was built.
    InitialEmpty,
    /// A candidate is waiting for a decision.
    Active,
    /// Every candidate has been advanced past.
    Exhausted,
}

/// A candidate together with the score it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub profile: Profile,
    pub score: u32,
}

#[derive(Debug, Clone)]
pub struct DiscoveryQueue {
    candidates: Vec<RankedCandidate>,
    position: usize,
}

impl DiscoveryQueue {
    /// Filters and ranks `pool` for `viewer`.
    ///
    /// Dropped: the viewer, repeated ids (first occurrence wins), profiles in
    /// another city, profiles sharing no hobby with the viewer. The rest is
    /// sorted by descending score; equal scores keep pool order.
    pub fn build(viewer: &Profile, pool: impl IntoIterator<Item = Profile>) -> Self {
        let viewer_hobbies = viewer.hobbies.ids();
        let mut seen: HashSet<String> = HashSet::new();

        let mut candidates: Vec<RankedCandidate> = pool
            .into_iter()
            .filter(|c| c.id != viewer.id)
            .filter(|c| seen.insert(c.id.clone()))
            .filter(|c| c.city == viewer.city)
            .filter(|c| c.hobbies.iter().any(|h| viewer_hobbies.contains(h.id.as_str())))
            .map(|c| RankedCandidate {
                score: score(viewer, &c),
                profile: c,
            })
            .collect();

        // `sort_by` is stable, which keeps ties in input order.
        candidates.sort_by(|a, b| b.score.cmp(&a.score));

        Self {
            candidates,
            position: 0,
        }
    }

    /// The candidate awaiting a decision.
    pub fn current(&self) -> Option<&RankedCandidate> {
        self.candidates.get(self.position)
    }

    /// Moves past the current candidate and returns it.
    ///
    /// Returns `None` (and does not move) once exhausted.
    pub fn advance(&mut self) -> Option<&RankedCandidate> {
        if self.position >= self.candidates.len() {
            return None;
        }
        self.position += 1;
        self.candidates.get(self.position - 1)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.candidates.len() - self.position
    }

    /// True only when the build produced no candidates at all.
    pub fn is_initial_empty(&self) -> bool {
        self.position == 0 && self.candidates.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.position == self.candidates.len()
    }

    pub fn state(&self) -> QueueState {
        if self.is_initial_empty() {
            QueueState::InitialEmpty
        } else if self.is_exhausted() {
            QueueState::Exhausted
        } else {
            QueueState::Active
        }
    }

    /// Ranked profiles in queue order.
    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.candidates.iter().map(|c| &c.profile)
    }
}
