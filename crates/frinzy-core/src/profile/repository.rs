//! Profile repository trait.
//!
//! Defines the interface for profile persistence operations.

use super::model::{City, Profile};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for finalized profiles.
///
/// Decouples the pipeline from the concrete record store (in-memory, TOML
/// file, remote backend).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds a profile by identity id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Profile))`: Profile found
    /// - `Ok(None)`: Profile not found
    /// - `Err(_)`: Store failure
    async fn find_by_id(&self, profile_id: &str) -> Result<Option<Profile>>;

    /// Inserts the profile only if no profile with the same id exists.
    ///
    /// Returns the stored profile: the given one when inserted, the existing
    /// one otherwise.
    async fn insert_if_absent(&self, profile: &Profile) -> Result<Profile>;

    /// Overwrites an existing profile.
    async fn save(&self, profile: &Profile) -> Result<()>;

    /// Lists every stored profile in insertion order.
    async fn list_all(&self) -> Result<Vec<Profile>>;

    /// Lists profiles located in `city`, in insertion order.
    async fn list_by_city(&self, city: City) -> Result<Vec<Profile>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|p| p.city == city)
            .collect())
    }
}
