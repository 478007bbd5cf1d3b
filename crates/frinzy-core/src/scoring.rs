//! Compatibility scoring.
//!
//! `score` is a pure function of two profiles' trait sets. The value is only
//! meaningful for relative ordering.

use std::collections::HashSet;

use crate::profile::{Hobby, Profile};

pub const HOBBY_WEIGHT: u32 = 10;
pub const BINARY_CHOICE_WEIGHT: u32 = 5;
pub const VIBE_TAG_WEIGHT: u32 = 3;

/// Shared-trait counts behind a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub shared_hobbies: u32,
    pub shared_binary_choices: u32,
    pub shared_vibe_tags: u32,
}

impl ScoreBreakdown {
    pub fn between(viewer: &Profile, candidate: &Profile) -> Self {
        let viewer_hobbies = viewer.hobbies.ids();
        let candidate_hobbies = candidate.hobbies.ids();

        Self {
            shared_hobbies: viewer_hobbies.intersection(&candidate_hobbies).count() as u32,
            shared_binary_choices: shared_count(
                &viewer.binary_choice_selections,
                &candidate.binary_choice_selections,
            ),
            shared_vibe_tags: shared_count(&viewer.vibe_tags, &candidate.vibe_tags),
        }
    }

    pub fn total(&self) -> u32 {
        HOBBY_WEIGHT * self.shared_hobbies
            + BINARY_CHOICE_WEIGHT * self.shared_binary_choices
            + VIBE_TAG_WEIGHT * self.shared_vibe_tags
    }
}

fn shared_count(a: &[String], b: &[String]) -> u32 {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.intersection(&b).count() as u32
}

/// Affinity between `viewer` and `candidate`. Symmetric, never fails.
pub fn score(viewer: &Profile, candidate: &Profile) -> u32 {
    ScoreBreakdown::between(viewer, candidate).total()
}

/// Hobbies both profiles declare, in `a`'s order.
pub fn shared_hobbies<'a>(a: &'a Profile, b: &Profile) -> Vec<&'a Hobby> {
    let ids = b.hobbies.ids();
    a.hobbies
        .iter()
        .filter(|h| ids.contains(h.id.as_str()))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::profile::{City, Gender, HobbySet, NEWCOMER_LABEL, TraitHints};
    use chrono::Utc;

    pub(crate) fn profile(id: &str, city: City, hobbies: &[(&str, &str)]) -> Profile {
        let now = Utc::now();
        Profile {
            id: id.to_string(),
            display_name: id.to_string(),
            age: 22,
            city,
            gender: Gender::PreferNotToSay,
            hobbies: hobbies.iter().map(|(i, n)| Hobby::new(*i, *n)).collect::<HobbySet>(),
            bio: "bio".to_string(),
            personality_label: NEWCOMER_LABEL.to_string(),
            binary_choice_selections: Vec::new(),
            vibe_tags: Vec::new(),
            fun_line: None,
            avatar_url: Profile::default_avatar_url(id),
            trait_hints: TraitHints::default(),
            verified: false,
            points: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn with_traits(mut p: Profile, choices: &[&str], tags: &[&str]) -> Profile {
        p.binary_choice_selections = choices.iter().map(|s| s.to_string()).collect();
        p.vibe_tags = tags.iter().map(|s| s.to_string()).collect();
        p
    }

    #[test]
    fn test_score_formula() {
        let a = with_traits(
            profile("a", City::Delhi, &[("1", "Gaming"), ("2", "Reading"), ("3", "Hiking")]),
            &["Night owl", "Plan ahead"],
            &["Low-key", "Competitive"],
        );
        let b = with_traits(
            profile("b", City::Delhi, &[("1", "Gaming"), ("3", "Hiking"), ("9", "Yoga")]),
            &["Night owl"],
            &["Competitive", "Host-vibes"],
        );

        let breakdown = ScoreBreakdown::between(&a, &b);
        assert_eq!(breakdown.shared_hobbies, 2);
        assert_eq!(breakdown.shared_binary_choices, 1);
        assert_eq!(breakdown.shared_vibe_tags, 1);
        assert_eq!(score(&a, &b), 20 + 5 + 3);
    }

    #[test]
    fn test_score_symmetric() {
        let a = with_traits(
            profile("a", City::Delhi, &[("1", "Gaming"), ("2", "Reading")]),
            &["Early bird"],
            &["Low-key"],
        );
        let b = with_traits(
            profile("b", City::Mumbai, &[("2", "Reading"), ("5", "Cooking")]),
            &["Early bird", "Deep chats"],
            &[],
        );
        assert_eq!(score(&a, &b), score(&b, &a));
    }

    #[test]
    fn test_self_score() {
        let a = with_traits(
            profile("a", City::Delhi, &[("1", "Gaming"), ("2", "Reading"), ("3", "Hiking")]),
            &["Night owl", "Plan ahead", "Deep chats"],
            &["Low-key", "Competitive"],
        );
        assert_eq!(score(&a, &a), 10 * 3 + 5 * 3 + 3 * 2);
    }

    #[test]
    fn test_missing_categories_contribute_zero() {
        let a = profile("a", City::Delhi, &[("1", "Gaming")]);
        let b = profile("b", City::Delhi, &[]);
        assert_eq!(score(&a, &b), 0);
    }

    #[test]
    fn test_shared_hobbies_by_id() {
        let a = profile("a", City::Delhi, &[("1", "Gaming"), ("2", "Reading")]);
        let b = profile("b", City::Delhi, &[("2", "Reading"), ("3", "Hiking")]);
        let shared: Vec<_> = shared_hobbies(&a, &b).iter().map(|h| h.name.as_str()).collect();
        assert_eq!(shared, vec!["Reading"]);
    }
}
