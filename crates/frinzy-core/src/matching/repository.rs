//! Decision and match repository traits.

use super::model::{Decision, DecisionOutcome, Match, PairKey};
use crate::error::Result;
use async_trait::async_trait;

/// Store for like/pass decisions.
///
/// # Implementation Notes
///
/// `record` is the atomic unit of match formation. Implementations must, as a
/// single indivisible step:
/// 1. overwrite the decision for `(actor_id, target_id)`
/// 2. read the reverse decision and the pair's existing match
/// 3. apply [`super::resolve`] and insert the match it asks for
///
/// If any part fails, none of it may be observable afterwards.
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Current decision of `actor_id` about `target_id`.
    async fn find(&self, actor_id: &str, target_id: &str) -> Result<Option<Decision>>;

    /// Stores `decision` and forms the pair's match when reciprocal.
    async fn record(&self, decision: Decision) -> Result<DecisionOutcome>;

    /// Decisions made about `target_id` by anyone.
    async fn list_by_target(&self, target_id: &str) -> Result<Vec<Decision>>;

    /// Decisions made by `actor_id`.
    async fn list_by_actor(&self, actor_id: &str) -> Result<Vec<Decision>>;
}

/// Store for matches.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn find_by_id(&self, match_id: &str) -> Result<Option<Match>>;

    async fn find_by_pair(&self, pair: &PairKey) -> Result<Option<Match>>;

    /// Inserts `candidate` unless its pair already has a match.
    ///
    /// Returns whichever match is stored for the pair afterwards.
    async fn insert_if_absent(&self, candidate: Match) -> Result<Match>;

    /// Matches where either endpoint equals `member_id`.
    async fn list_for_member(&self, member_id: &str) -> Result<Vec<Match>>;
}
