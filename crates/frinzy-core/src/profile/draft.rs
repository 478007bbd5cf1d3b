//! Onboarding draft.
//!
//! A `ProfileDraft` accumulates answers across the onboarding steps. Patches are
//! shallow-merged: a key present in the patch overwrites the draft's value, keys
//! absent from the patch are left alone, and nothing is ever removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use super::model::{City, Gender, HobbySet, NEWCOMER_LABEL, Profile, TraitHints};
use super::quiz::PersonalityType;
use crate::config::OnboardingSettings;
use crate::error::{FrinzyError, Result};

/// Sign-up credentials handed to the identity provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Local part of the email, used when no display name was given.
    pub fn handle(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The canonical onboarding sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum OnboardingStep {
    Signup,
    CoreProfile,
    BinaryChoices,
    VibeTags,
    FunLine,
}

impl OnboardingStep {
    pub fn index(self) -> usize {
        OnboardingStep::iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    pub fn total() -> usize {
        OnboardingStep::iter().count()
    }

    pub fn next(self) -> Option<OnboardingStep> {
        OnboardingStep::iter().nth(self.index() + 1)
    }

    pub fn progress_percent(self) -> u8 {
        progress_percent(self.index(), Self::total())
    }
}

/// Linear progress for `step_index` (zero based) out of `total_steps`.
///
/// Strictly increasing in `step_index` while `step_index < total_steps`,
/// clamped to `[0, 100]`.
pub fn progress_percent(step_index: usize, total_steps: usize) -> u8 {
    if total_steps == 0 {
        return 0;
    }
    let percent = (step_index + 1).saturating_mul(100) / total_steps;
    percent.min(100) as u8
}

/// A partial update produced by one onboarding step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftPatch {
    pub display_name: Option<String>,
    pub credentials: Option<Credentials>,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub city: Option<City>,
    pub hobbies: Option<HobbySet>,
    pub bio: Option<String>,
    pub binary_choice_selections: Option<Vec<String>>,
    pub vibe_tags: Option<Vec<String>>,
    pub fun_line: Option<String>,
}

impl DraftPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn city(mut self, city: City) -> Self {
        self.city = Some(city);
        self
    }

    pub fn hobbies(mut self, hobbies: HobbySet) -> Self {
        self.hobbies = Some(hobbies);
        self
    }

    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn binary_choices<S: Into<String>>(mut self, choices: impl IntoIterator<Item = S>) -> Self {
        self.binary_choice_selections = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn vibe_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.vibe_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn fun_line(mut self, line: impl Into<String>) -> Self {
        self.fun_line = Some(line.into());
        self
    }
}

/// Inputs derived outside the questionnaire and applied at finalize.
#[derive(Debug, Clone, Default)]
pub struct FinalizeInputs {
    /// Result of the optional personality quiz
    pub personality: Option<PersonalityType>,
    /// Image reference produced by the suggestion oracle, if any
    pub generated_avatar: Option<String>,
}

/// In-progress onboarding answers, owned by the active onboarding session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub display_name: Option<String>,
    pub credentials: Option<Credentials>,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub city: Option<City>,
    pub hobbies: Option<HobbySet>,
    pub bio: Option<String>,
    pub binary_choice_selections: Option<Vec<String>>,
    pub vibe_tags: Option<Vec<String>>,
    pub fun_line: Option<String>,
}

/// Removes repeated entries while keeping first-seen order.
fn ordered_unique(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow-merges `patch` into the draft.
    ///
    /// The patch is checked against the set caps first; a rejected patch leaves
    /// the draft untouched.
    pub fn merge(&mut self, patch: DraftPatch, limits: &OnboardingSettings) -> Result<()> {
        let DraftPatch {
            display_name,
            credentials,
            age,
            gender,
            city,
            hobbies,
            bio,
            binary_choice_selections,
            vibe_tags,
            fun_line,
        } = patch;

        let binary_choice_selections = binary_choice_selections.map(ordered_unique);
        let vibe_tags = vibe_tags.map(ordered_unique);

        if let Some(hobbies) = &hobbies {
            if hobbies.len() > limits.max_hobbies {
                return Err(FrinzyError::validation(
                    "hobbies",
                    format!("at most {} hobbies allowed", limits.max_hobbies),
                ));
            }
        }
        if let Some(choices) = &binary_choice_selections {
            if choices.len() > limits.max_binary_choices {
                return Err(FrinzyError::validation(
                    "binary_choice_selections",
                    format!("at most {} selections allowed", limits.max_binary_choices),
                ));
            }
        }
        if let Some(tags) = &vibe_tags {
            if tags.len() > limits.max_vibe_tags {
                return Err(FrinzyError::validation(
                    "vibe_tags",
                    format!("at most {} vibe tags allowed", limits.max_vibe_tags),
                ));
            }
        }
        if let Some(bio) = &bio {
            if bio.chars().count() > limits.bio_max_len {
                return Err(FrinzyError::validation(
                    "bio",
                    format!("bio longer than {} characters", limits.bio_max_len),
                ));
            }
        }

        if display_name.is_some() {
            self.display_name = display_name;
        }
        if credentials.is_some() {
            self.credentials = credentials;
        }
        if age.is_some() {
            self.age = age;
        }
        if gender.is_some() {
            self.gender = gender;
        }
        if city.is_some() {
            self.city = city;
        }
        if hobbies.is_some() {
            self.hobbies = hobbies;
        }
        if bio.is_some() {
            self.bio = bio;
        }
        if binary_choice_selections.is_some() {
            self.binary_choice_selections = binary_choice_selections;
        }
        if vibe_tags.is_some() {
            self.vibe_tags = vibe_tags;
        }
        if fun_line.is_some() {
            self.fun_line = fun_line;
        }
        Ok(())
    }

    /// Names of mandatory fields that are absent or out of bounds.
    pub fn missing_fields(&self, limits: &OnboardingSettings) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.credentials.is_none() {
            missing.push("credentials");
        }
        if self.age.is_none() {
            missing.push("age");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.city.is_none() {
            missing.push("city");
        }
        let hobby_count = self.hobbies.as_ref().map_or(0, HobbySet::len);
        if hobby_count < limits.min_hobbies || hobby_count > limits.max_hobbies {
            missing.push("hobbies");
        }
        if self.bio.as_deref().is_none_or(|b| b.trim().is_empty()) {
            missing.push("bio");
        }
        missing
    }

    pub fn is_complete(&self, limits: &OnboardingSettings) -> bool {
        self.missing_fields(limits).is_empty()
    }

    /// Builds the durable profile for identity `id`.
    ///
    /// Fails with `Validation` naming the first missing mandatory field.
    pub fn to_profile(
        &self,
        id: &str,
        inputs: FinalizeInputs,
        limits: &OnboardingSettings,
        now: DateTime<Utc>,
    ) -> Result<Profile> {
        let missing = self.missing_fields(limits);
        if let Some(field) = missing.first() {
            if *field == "hobbies" && self.hobbies.is_some() {
                return Err(FrinzyError::validation(
                    "hobbies",
                    format!(
                        "between {} and {} hobbies required",
                        limits.min_hobbies, limits.max_hobbies
                    ),
                ));
            }
            return Err(FrinzyError::missing_field(*field));
        }

        let (Some(credentials), Some(age), Some(gender), Some(city), Some(hobbies), Some(bio)) = (
            self.credentials.as_ref(),
            self.age,
            self.gender,
            self.city,
            self.hobbies.as_ref(),
            self.bio.as_ref(),
        ) else {
            return Err(FrinzyError::internal("draft passed validation with gaps"));
        };

        let display_name = self
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| credentials.handle())
            .to_string();

        let fun_line = self
            .fun_line
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().take(limits.fun_line_max_len).collect::<String>());

        let binary_choice_selections = self.binary_choice_selections.clone().unwrap_or_default();

        Ok(Profile {
            id: id.to_string(),
            display_name,
            age,
            city,
            gender,
            hobbies: hobbies.clone(),
            bio: bio.trim().to_string(),
            personality_label: inputs
                .personality
                .map(|p| p.to_string())
                .unwrap_or_else(|| NEWCOMER_LABEL.to_string()),
            trait_hints: TraitHints::from_selections(&binary_choice_selections),
            binary_choice_selections,
            vibe_tags: self.vibe_tags.clone().unwrap_or_default(),
            fun_line,
            avatar_url: inputs
                .generated_avatar
                .unwrap_or_else(|| Profile::default_avatar_url(id)),
            verified: false,
            points: 0,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::Hobby;

    fn hobbies(names: &[&str]) -> HobbySet {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Hobby::new(i.to_string(), *n))
            .collect()
    }

    fn complete_draft() -> ProfileDraft {
        let limits = OnboardingSettings::default();
        let mut draft = ProfileDraft::new();
        draft
            .merge(
                DraftPatch::new()
                    .display_name("Alex")
                    .credentials(Credentials::new("alex@example.com", "secret")),
                &limits,
            )
            .unwrap();
        draft
            .merge(
                DraftPatch::new()
                    .age(22)
                    .gender(Gender::NonBinary)
                    .city(City::Bangalore)
                    .hobbies(hobbies(&["Gaming", "Reading", "Hiking"]))
                    .bio("Fueled by coffee and code."),
                &limits,
            )
            .unwrap();
        draft
    }

    #[test]
    fn test_progress_strictly_increasing() {
        let steps: Vec<u8> = OnboardingStep::iter().map(|s| s.progress_percent()).collect();
        assert_eq!(steps, vec![20, 40, 60, 80, 100]);
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(9, 5), 100);
    }

    #[test]
    fn test_step_sequence() {
        assert_eq!(OnboardingStep::Signup.next(), Some(OnboardingStep::CoreProfile));
        assert_eq!(OnboardingStep::FunLine.next(), None);
        assert_eq!(OnboardingStep::total(), 5);
    }

    #[test]
    fn test_merge_keeps_unrelated_keys() {
        let limits = OnboardingSettings::default();
        let mut draft = complete_draft();
        draft
            .merge(DraftPatch::new().bio("Updated bio"), &limits)
            .unwrap();

        assert_eq!(draft.bio.as_deref(), Some("Updated bio"));
        assert_eq!(draft.age, Some(22));
        assert_eq!(draft.display_name.as_deref(), Some("Alex"));
    }

    #[test]
    fn test_merge_rejects_too_many_vibe_tags_atomically() {
        let limits = OnboardingSettings::default();
        let mut draft = complete_draft();
        let before = draft.clone();

        let err = draft
            .merge(
                DraftPatch::new()
                    .age(30)
                    .vibe_tags(["Low-key", "Competitive", "Host-vibes"]),
                &limits,
            )
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_merge_dedups_ordered_selections() {
        let limits = OnboardingSettings::default();
        let mut draft = ProfileDraft::new();
        draft
            .merge(
                DraftPatch::new().binary_choices(["Night owl", "Plan ahead", "Night owl"]),
                &limits,
            )
            .unwrap();
        assert_eq!(
            draft.binary_choice_selections,
            Some(vec!["Night owl".to_string(), "Plan ahead".to_string()])
        );
    }

    #[test]
    fn test_to_profile_missing_bio() {
        let limits = OnboardingSettings::default();
        let mut draft = complete_draft();
        draft.bio = None;

        let err = draft
            .to_profile("u1", FinalizeInputs::default(), &limits, Utc::now())
            .unwrap_err();
        assert_eq!(err, FrinzyError::missing_field("bio"));
    }

    #[test]
    fn test_to_profile_too_few_hobbies() {
        let limits = OnboardingSettings::default();
        let mut draft = complete_draft();
        draft.hobbies = Some(hobbies(&["Gaming", "Reading"]));

        let err = draft
            .to_profile("u1", FinalizeInputs::default(), &limits, Utc::now())
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!draft.is_complete(&limits));
    }

    #[test]
    fn test_to_profile_defaults() {
        let limits = OnboardingSettings::default();
        let mut draft = complete_draft();
        draft.display_name = None;
        draft.fun_line = Some("   ".to_string());

        let profile = draft
            .to_profile("u1", FinalizeInputs::default(), &limits, Utc::now())
            .unwrap();

        assert_eq!(profile.display_name, "alex");
        assert_eq!(profile.personality_label, NEWCOMER_LABEL);
        assert_eq!(profile.avatar_url, Profile::default_avatar_url("u1"));
        assert_eq!(profile.fun_line, None);
        assert_eq!(profile.points, 0);
        assert!(!profile.verified);
    }

    #[test]
    fn test_to_profile_uses_quiz_and_generated_avatar() {
        let limits = OnboardingSettings::default();
        let mut draft = complete_draft();
        draft.fun_line = Some("x".repeat(200));
        let inputs = FinalizeInputs {
            personality: Some(PersonalityType::TheArchitect),
            generated_avatar: Some("data:image/jpeg;base64,AAAA".to_string()),
        };

        let profile = draft.to_profile("u1", inputs, &limits, Utc::now()).unwrap();

        assert_eq!(profile.personality_label, "The Architect");
        assert_eq!(profile.avatar_url, "data:image/jpeg;base64,AAAA");
        assert_eq!(profile.fun_line.map(|l| l.len()), Some(80));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("a@b.c", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("hunter2"));
        assert_eq!(creds.handle(), "a");
    }
}
