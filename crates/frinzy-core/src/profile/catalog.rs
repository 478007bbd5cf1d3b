//! Canonical onboarding catalogs.

use super::model::Hobby;
use rand::seq::SliceRandom;

const HOBBY_CATALOG: &[(&str, &str)] = &[
    ("1", "Gaming"),
    ("2", "Reading"),
    ("3", "Hiking"),
    ("4", "Coding"),
    ("5", "Cooking"),
    ("6", "Painting"),
    ("7", "Photography"),
    ("8", "Music Production"),
    ("9", "Yoga"),
    ("10", "Board Games"),
    ("11", "Traveling"),
    ("12", "Blogging"),
    ("13", "Stand-up Comedy"),
    ("14", "Film Making"),
    ("15", "Podcasting"),
    ("16", "Volunteering"),
    ("17", "Gardening"),
    ("18", "Martial Arts"),
    ("19", "Dancing"),
    ("20", "Creative Writing"),
    ("21", "Anime/Manga"),
    ("22", "Thrifting"),
    ("23", "DIY Projects"),
    ("24", "Stargazing"),
    ("25", "Skateboarding"),
    ("26", "Rock Climbing"),
    ("27", "Meditation"),
    ("28", "Archery"),
    ("29", "Kayaking"),
    ("30", "Language Learning"),
    ("33", "Cosplay"),
    ("34", "Astrology"),
    ("35", "Memes"),
    ("36", "Binge-watching series"),
    ("37", "Singing"),
    ("38", "Playing an instrument"),
    ("39", "Going to concerts"),
    ("40", "Trying new food"),
];

/// A "this or that" pair shown during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryChoice {
    pub id: &'static str,
    pub choice_a: &'static str,
    pub choice_b: &'static str,
}

pub const BINARY_CHOICES: &[BinaryChoice] = &[
    BinaryChoice { id: "t1", choice_a: "Calm night in", choice_b: "City night out" },
    BinaryChoice { id: "t2", choice_a: "Plan ahead", choice_b: "Go with the flow" },
    BinaryChoice { id: "t3", choice_a: "Deep chats", choice_b: "Chill banter" },
    BinaryChoice { id: "t4", choice_a: "Small group", choice_b: "Big crowd" },
    BinaryChoice { id: "t5", choice_a: "Try new spots", choice_b: "Comfort go-tos" },
    BinaryChoice { id: "t6", choice_a: "Early bird", choice_b: "Night owl" },
];

pub const VIBE_STICKERS: &[&str] = &[
    "Low-key",
    "High-energy",
    "Competitive",
    "Cooperative",
    "Teacher-type",
    "Learner-mode",
    "Host-vibes",
    "First-timer-friendly",
];

pub const FUN_LINE_PROMPTS: &[&str] = &[
    "I'll bring the ____, you bring the ____.",
    "My perfect Saturday is ____.",
    "Teach me how to ____.",
    "You can't be friends with me if you don't like ____.",
    "The quickest way to my heart is ____.",
];

/// Returns the full canonical hobby catalog.
pub fn hobby_catalog() -> Vec<Hobby> {
    HOBBY_CATALOG
        .iter()
        .map(|(id, name)| Hobby::new(*id, *name))
        .collect()
}

/// Looks up a catalog hobby by name, ignoring case.
pub fn find_hobby(name: &str) -> Option<Hobby> {
    let wanted = name.trim().to_lowercase();
    HOBBY_CATALOG
        .iter()
        .find(|(_, n)| n.to_lowercase() == wanted)
        .map(|(id, n)| Hobby::new(*id, *n))
}

/// Resolves a name to the catalog entry, or a fresh custom hobby.
pub fn hobby_by_name(name: &str) -> Hobby {
    find_hobby(name).unwrap_or_else(|| Hobby::custom(name))
}

/// Whether `text` is one of the two options of some binary choice.
pub fn is_binary_option(text: &str) -> bool {
    BINARY_CHOICES
        .iter()
        .any(|c| c.choice_a == text || c.choice_b == text)
}

pub fn is_vibe_sticker(text: &str) -> bool {
    VIBE_STICKERS.contains(&text)
}

/// Picks the fun-line prompt shown on the last onboarding step.
pub fn random_fun_line_prompt() -> &'static str {
    FUN_LINE_PROMPTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FUN_LINE_PROMPTS[0])
}
