//! Profile domain model.
//!
//! A `Profile` is the durable, finalized record for one identity. It is created
//! once when onboarding finalizes and afterwards mutated only by its owner or by
//! the system appending derived fields (avatar, personality label).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display, EnumIter, EnumString};

/// Prefix that marks a user-supplied hobby id.
pub const CUSTOM_HOBBY_PREFIX: &str = "custom_";

/// Personality label used until a quiz result is available.
pub const NEWCOMER_LABEL: &str = "Newcomer";

/// A declared interest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hobby {
    pub id: String,
    pub name: String,
}

impl Hobby {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Creates a user-supplied hobby with a locally generated id.
    ///
    /// Custom ids are prefixed so they never collide with catalog ids.
    pub fn custom(name: &str) -> Self {
        Self {
            id: format!("{}{}", CUSTOM_HOBBY_PREFIX, uuid::Uuid::new_v4().simple()),
            name: name.trim().to_string(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_HOBBY_PREFIX)
    }

    /// Case-insensitive name comparison.
    pub fn same_name(&self, other: &Hobby) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

/// Ordered set of hobbies, unique by id and by case-insensitive name.
///
/// Serialized as a plain list. Deserialized lists go through `insert`, so
/// duplicates in stored documents are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Hobby>", into = "Vec<Hobby>")]
pub struct HobbySet(Vec<Hobby>);

impl HobbySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a hobby unless one with the same id or name is already present.
    ///
    /// Returns `true` when the hobby was added.
    pub fn insert(&mut self, hobby: Hobby) -> bool {
        if self.0.iter().any(|h| h.id == hobby.id || h.same_name(&hobby)) {
            return false;
        }
        self.0.push(hobby);
        true
    }

    /// Adds the hobby if absent, removes it if present (matched by id).
    pub fn toggle(&mut self, hobby: Hobby) {
        if let Some(pos) = self.0.iter().position(|h| h.id == hobby.id) {
            self.0.remove(pos);
        } else {
            self.insert(hobby);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hobby> {
        self.0.iter()
    }

    pub fn ids(&self) -> HashSet<&str> {
        self.0.iter().map(|h| h.id.as_str()).collect()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.0.iter().any(|h| h.id == id)
    }

    pub fn as_slice(&self) -> &[Hobby] {
        &self.0
    }
}

impl FromIterator<Hobby> for HobbySet {
    fn from_iter<I: IntoIterator<Item = Hobby>>(iter: I) -> Self {
        let mut set = HobbySet::new();
        for hobby in iter {
            set.insert(hobby);
        }
        set
    }
}

impl From<Vec<Hobby>> for HobbySet {
    fn from(hobbies: Vec<Hobby>) -> Self {
        hobbies.into_iter().collect()
    }
}

impl From<HobbySet> for Vec<Hobby> {
    fn from(set: HobbySet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a HobbySet {
    type Item = &'a Hobby;
    type IntoIter = std::slice::Iter<'a, Hobby>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Cities the product operates in. Discovery matches on exact equality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum City {
    Gurugram,
    Delhi,
    Mumbai,
    Bangalore,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Non-binary")]
    #[strum(serialize = "Non-binary")]
    NonBinary,
    #[serde(rename = "Prefer not to say")]
    #[strum(serialize = "Prefer not to say")]
    PreferNotToSay,
}

/// Coarse hints derived from binary-choice selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introvert: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openness: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conscientious: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_owl: Option<bool>,
}

impl TraitHints {
    /// Derives hints from "this or that" selections.
    ///
    /// Extrovert selections are applied after introvert ones, so picking both
    /// "Small group" and "Big crowd" yields `introvert = false`.
    pub fn from_selections<S: AsRef<str>>(selections: &[S]) -> Self {
        let has = |text: &str| selections.iter().any(|s| s.as_ref() == text);
        let mut hints = TraitHints::default();

        if has("Small group") || has("Calm night in") {
            hints.introvert = Some(true);
        }
        if has("Big crowd") || has("City night out") {
            hints.introvert = Some(false);
        }
        if has("Try new spots") {
            hints.openness = Some(true);
        }
        if has("Plan ahead") {
            hints.conscientious = Some(true);
        }
        if has("Night owl") {
            hints.night_owl = Some(true);
        }
        hints
    }
}

/// Finalized profile for one identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Identity id (shared with the identity provider)
    pub id: String,
    pub display_name: String,
    pub age: u8,
    pub city: City,
    pub gender: Gender,
    pub hobbies: HobbySet,
    pub bio: String,
    /// Quiz result, or `NEWCOMER_LABEL` until one exists
    pub personality_label: String,
    #[serde(default)]
    pub binary_choice_selections: Vec<String>,
    #[serde(default)]
    pub vibe_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fun_line: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub trait_hints: TraitHints,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub points: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Deterministic avatar reference for an identity without a generated image.
    pub fn default_avatar_url(id: &str) -> String {
        format!("https://i.pravatar.cc/300?u={}", id)
    }
}

/// Fields an owner may change on their own profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileEdit {
    pub display_name: Option<String>,
    pub age: Option<u8>,
    pub bio: Option<String>,
    pub hobbies: Option<HobbySet>,
    pub city: Option<City>,
    pub gender: Option<Gender>,
}

impl ProfileEdit {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.age.is_none()
            && self.bio.is_none()
            && self.hobbies.is_none()
            && self.city.is_none()
            && self.gender.is_none()
    }
}
