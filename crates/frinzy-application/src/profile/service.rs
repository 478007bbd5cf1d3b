//! Profile reads, self-edit and derived-field updates.

use std::sync::Arc;

use frinzy_core::config::OnboardingSettings;
use frinzy_core::profile::{PersonalityType, Profile, ProfileEdit, ProfileRepository};
use frinzy_core::{FrinzyError, Result};
use tracing::info;

use super::updater::ProfileUpdater;
use crate::suggestion_service::SuggestionService;

pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
    updater: ProfileUpdater,
    suggestions: Arc<SuggestionService>,
    limits: OnboardingSettings,
}

impl ProfileService {
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        suggestions: Arc<SuggestionService>,
        limits: OnboardingSettings,
    ) -> Self {
        Self {
            updater: ProfileUpdater::new(repository.clone()),
            repository,
            suggestions,
            limits,
        }
    }

    pub async fn get(&self, profile_id: &str) -> Result<Profile> {
        self.repository
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| FrinzyError::not_found("Profile", profile_id))
    }

    /// Applies an owner's edit. Fields left `None` are kept.
    pub async fn update_own(
        &self,
        actor_id: &str,
        profile_id: &str,
        edit: ProfileEdit,
    ) -> Result<Profile> {
        validate_edit(&edit, &self.limits)?;
        let profile = self
            .updater
            .update(actor_id, profile_id, move |p| {
                let ProfileEdit {
                    display_name,
                    age,
                    bio,
                    hobbies,
                    city,
                    gender,
                } = edit;
                if let Some(name) = display_name {
                    p.display_name = name.trim().to_string();
                }
                if let Some(age) = age {
                    p.age = age;
                }
                if let Some(bio) = bio {
                    p.bio = bio.trim().to_string();
                }
                if let Some(hobbies) = hobbies {
                    p.hobbies = hobbies;
                }
                if let Some(city) = city {
                    p.city = city;
                }
                if let Some(gender) = gender {
                    p.gender = gender;
                }
                Ok(())
            })
            .await?;
        info!("[ProfileService] Profile {} updated by owner", profile.id);
        Ok(profile)
    }

    /// Replaces the avatar with a freshly generated one (or its fallback).
    pub async fn regenerate_avatar(&self, actor_id: &str, profile_id: &str) -> Result<Profile> {
        if actor_id != profile_id {
            return Err(FrinzyError::forbidden(format!(
                "{} cannot modify profile {}",
                actor_id, profile_id
            )));
        }
        let current = self.get(profile_id).await?;
        let url = self.suggestions.avatar(current.hobbies.as_slice()).await;
        self.updater
            .update(actor_id, profile_id, move |p| {
                p.avatar_url = url;
                Ok(())
            })
            .await
    }

    /// Stores a personality quiz result taken after onboarding.
    pub async fn set_personality(
        &self,
        actor_id: &str,
        profile_id: &str,
        personality: PersonalityType,
    ) -> Result<Profile> {
        self.updater
            .update(actor_id, profile_id, move |p| {
                p.personality_label = personality.to_string();
                Ok(())
            })
            .await
    }
}

fn validate_edit(edit: &ProfileEdit, limits: &OnboardingSettings) -> Result<()> {
    if edit.is_empty() {
        return Err(FrinzyError::validation("edit", "nothing to change"));
    }
    if let Some(name) = &edit.display_name {
        if name.trim().is_empty() {
            return Err(FrinzyError::validation("display_name", "cannot be blank"));
        }
    }
    if let Some(bio) = &edit.bio {
        if bio.trim().is_empty() {
            return Err(FrinzyError::missing_field("bio"));
        }
        if bio.chars().count() > limits.bio_max_len {
            return Err(FrinzyError::validation(
                "bio",
                format!("bio longer than {} characters", limits.bio_max_len),
            ));
        }
    }
    if let Some(hobbies) = &edit.hobbies {
        if hobbies.len() < limits.min_hobbies || hobbies.len() > limits.max_hobbies {
            return Err(FrinzyError::validation(
                "hobbies",
                format!(
                    "between {} and {} hobbies required",
                    limits.min_hobbies, limits.max_hobbies
                ),
            ));
        }
    }
    Ok(())
}
