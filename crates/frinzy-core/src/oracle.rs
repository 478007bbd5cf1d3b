//! Suggestion oracle seam.
//!
//! Icebreaker text and avatar images come from an external generator. Every
//! caller must degrade to the fixed fallbacks here when it is unavailable.

use async_trait::async_trait;

use crate::error::Result;
use crate::profile::{Hobby, Profile};

/// Returned when no generated icebreakers are available.
pub const FALLBACK_ICEBREAKERS: [&str; 3] = [
    "Hey! What's up?",
    "Love your vibe! What are you up to this weekend?",
    "We matched! What's your go-to comfort food?",
];

/// External generator of conversation openers and avatars.
#[async_trait]
pub trait SuggestionOracle: Send + Sync {
    /// Up to three openers tailored to the pair.
    async fn icebreakers(&self, viewer: &Profile, other: &Profile) -> Result<Vec<String>>;

    /// An avatar image URL (may be a `data:` URL) reflecting `hobbies`.
    async fn avatar(&self, hobbies: &[Hobby]) -> Result<String>;
}

pub fn fallback_icebreakers() -> Vec<String> {
    FALLBACK_ICEBREAKERS.iter().map(|s| s.to_string()).collect()
}

/// Seeded placeholder image derived from the hobby names.
pub fn fallback_avatar_url(hobbies: &[Hobby]) -> String {
    let seed: String = hobbies
        .iter()
        .flat_map(|h| h.name.chars())
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let seed = if seed.is_empty() { "frinzy".to_string() } else { seed };
    format!("https://picsum.photos/seed/{}/512", seed)
}
