//! Onboarding session: draft accumulation and one-time finalize.
//!
//! The session owns the draft and the step cursor explicitly; nothing is
//! persisted until `finalize`, and an abandoned session simply drops its draft.

use std::sync::Arc;

use chrono::Utc;
use frinzy_core::config::OnboardingSettings;
use frinzy_core::profile::{
    DraftPatch, FinalizeInputs, OnboardingStep, PersonalityType, Profile, ProfileDraft,
    ProfileRepository,
};
use frinzy_core::{FrinzyError, Result};
use tracing::{debug, info, warn};

use crate::suggestion_service::SuggestionService;

pub struct OnboardingSession {
    identity_id: String,
    draft: ProfileDraft,
    step: OnboardingStep,
    limits: OnboardingSettings,
    personality: Option<PersonalityType>,
    generated_avatar: Option<String>,
    finalized: Option<Profile>,
    repository: Arc<dyn ProfileRepository>,
}

impl OnboardingSession {
    pub fn new(
        identity_id: impl Into<String>,
        repository: Arc<dyn ProfileRepository>,
        limits: OnboardingSettings,
    ) -> Self {
        Self {
            identity_id: identity_id.into(),
            draft: ProfileDraft::new(),
            step: OnboardingStep::Signup,
            limits,
            personality: None,
            generated_avatar: None,
            finalized: None,
            repository,
        }
    }

    pub fn identity_id(&self) -> &str {
        &self.identity_id
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn current_step(&self) -> OnboardingStep {
        self.step
    }

    pub fn progress_percent(&self) -> u8 {
        self.step.progress_percent()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.is_some()
    }

    /// Merges `patch` into the draft. Rejected once the profile exists.
    pub fn merge(&mut self, patch: DraftPatch) -> Result<()> {
        if self.finalized.is_some() {
            return Err(FrinzyError::validation(
                "draft",
                "onboarding already finalized",
            ));
        }
        self.draft.merge(patch, &self.limits)
    }

    /// Merges the current step's input and moves to the next step.
    ///
    /// Returns the new step, or `None` when the last step was completed.
    /// On a rejected patch the cursor stays put.
    pub fn complete_step(&mut self, patch: DraftPatch) -> Result<Option<OnboardingStep>> {
        self.merge(patch)?;
        let next = self.step.next();
        if let Some(next) = next {
            debug!(
                "[Onboarding] {} -> {:?} ({}%)",
                self.identity_id,
                next,
                next.progress_percent()
            );
            self.step = next;
        }
        Ok(next)
    }

    /// Records the personality quiz result used at finalize.
    pub fn set_personality(&mut self, personality: PersonalityType) {
        self.personality = Some(personality);
    }

    pub fn set_generated_avatar(&mut self, url: impl Into<String>) {
        self.generated_avatar = Some(url.into());
    }

    /// Asks the oracle for an avatar from the drafted hobbies.
    ///
    /// Returns the URL that will be used; fallbacks count as generated.
    pub async fn generate_avatar(&mut self, suggestions: &SuggestionService) -> String {
        let hobbies: Vec<_> = self
            .draft
            .hobbies
            .as_ref()
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default();
        let url = suggestions.avatar(&hobbies).await;
        self.generated_avatar = Some(url.clone());
        url
    }

    /// Creates the durable profile.
    ///
    /// Runs at most once: after success every call returns the same profile
    /// without touching the store. A missing mandatory field fails with
    /// `Validation` and writes nothing.
    pub async fn finalize(&mut self) -> Result<Profile> {
        if let Some(profile) = &self.finalized {
            debug!("[Onboarding] finalize() repeated for {}", self.identity_id);
            return Ok(profile.clone());
        }

        let candidate = self.draft.to_profile(
            &self.identity_id,
            FinalizeInputs {
                personality: self.personality,
                generated_avatar: self.generated_avatar.clone(),
            },
            &self.limits,
            Utc::now(),
        )?;

        let stored = self
            .repository
            .insert_if_absent(&candidate)
            .await
            .inspect_err(|e| warn!("[Onboarding] Finalize failed for {}: {}", self.identity_id, e))?;

        info!(
            "[Onboarding] Profile {} created ({} hobbies, city {})",
            stored.id,
            stored.hobbies.len(),
            stored.city
        );
        self.finalized = Some(stored.clone());
        Ok(stored)
    }
}
