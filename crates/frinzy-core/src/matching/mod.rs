//! Decision recording and match formation domain.
//!
//! - `model`: `Decision`, `Match`, `PairKey`, `DecisionOutcome`
//! - `reciprocity`: pure resolution of a decision against its reverse
//! - `repository`: store traits

mod model;
mod reciprocity;
mod repository;

pub use model::{Decision, DecisionOutcome, Match, PairKey};
pub use reciprocity::{Resolution, resolve};
pub use repository::{DecisionRepository, MatchRepository};
