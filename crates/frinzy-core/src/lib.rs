//! Domain core of Frinzy.
//!
//! Pure models, rules and repository traits for onboarding, compatibility
//! scoring, discovery, reciprocal matching, chat and city events. Storage,
//! the suggestion generator and orchestration live in the sibling crates.

pub mod chat;
pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod matching;
pub mod oracle;
pub mod profile;
pub mod scoring;

// Re-export common error type
pub use error::{FrinzyError, Result};
