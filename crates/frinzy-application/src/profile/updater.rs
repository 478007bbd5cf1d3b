//! Owner-only find → mutate → save helper for profiles.

use std::sync::Arc;

use chrono::Utc;
use frinzy_core::profile::{Profile, ProfileRepository};
use frinzy_core::{FrinzyError, Result};

pub struct ProfileUpdater {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileUpdater {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Applies `updater` to `profile_id` on behalf of `actor_id` and saves it.
    ///
    /// Only the owner may mutate a profile; anyone else gets `Forbidden`
    /// before the store is read. An updater error discards the change.
    pub async fn update<F>(&self, actor_id: &str, profile_id: &str, updater: F) -> Result<Profile>
    where
        F: FnOnce(&mut Profile) -> Result<()>,
    {
        if actor_id != profile_id {
            return Err(FrinzyError::forbidden(format!(
                "{} cannot modify profile {}",
                actor_id, profile_id
            )));
        }

        let mut profile = self
            .repository
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| FrinzyError::not_found("Profile", profile_id))?;

        tracing::debug!("[ProfileUpdater] Loaded profile {}", profile.id);
        updater(&mut profile)?;
        profile.updated_at = Utc::now();

        self.repository.save(&profile).await?;
        tracing::debug!("[ProfileUpdater] Saved profile {}", profile.id);
        Ok(profile)
    }
}
