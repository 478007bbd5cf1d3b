//! File-backed profile repository.
//!
//! All profiles live in one `profiles.toml`, keyed by identity id. Blocking
//! file IO runs on tokio's blocking pool.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use frinzy_core::profile::{Profile, ProfileRepository};
use frinzy_core::{FrinzyError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::paths::FrinzyPaths;
use crate::storage::AtomicTomlFile;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfileDocument {
    #[serde(default)]
    profiles: BTreeMap<String, Profile>,
}

pub struct TomlProfileRepository {
    file: Arc<AtomicTomlFile<ProfileDocument>>,
}

impl TomlProfileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    /// Uses `profiles.toml` in the resolved data directory.
    pub fn from_paths(paths: &FrinzyPaths) -> Result<Self> {
        Ok(Self::new(paths.profiles_file()?))
    }

    async fn blocking<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&AtomicTomlFile<ProfileDocument>) -> Result<R> + Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || f(&file))
            .await
            .map_err(|e| FrinzyError::internal(format!("profile store task failed: {}", e)))?
    }
}

#[async_trait]
impl ProfileRepository for TomlProfileRepository {
    async fn find_by_id(&self, profile_id: &str) -> Result<Option<Profile>> {
        let id = profile_id.to_string();
        self.blocking(move |file| Ok(file.load()?.profiles.remove(&id)))
            .await
    }

    async fn insert_if_absent(&self, profile: &Profile) -> Result<Profile> {
        let profile = profile.clone();
        self.blocking(move |file| {
            file.update(|doc| {
                if let Some(existing) = doc.profiles.get(&profile.id) {
                    return Ok(existing.clone());
                }
                debug!("[TomlProfileRepository] Inserting profile {}", profile.id);
                doc.profiles.insert(profile.id.clone(), profile.clone());
                Ok(profile)
            })
        })
        .await
    }

    async fn save(&self, profile: &Profile) -> Result<()> {
        let profile = profile.clone();
        self.blocking(move |file| {
            file.update(|doc| {
                doc.profiles.insert(profile.id.clone(), profile);
                Ok(())
            })
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<Profile>> {
        self.blocking(|file| Ok(file.load()?.profiles.into_values().collect()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use frinzy_core::profile::{City, Gender, Hobby, HobbySet, NEWCOMER_LABEL, TraitHints};
    use tempfile::TempDir;

    fn profile(id: &str, city: City) -> Profile {
        let now = Utc::now();
        Profile {
            id: id.to_string(),
            display_name: format!("{} name", id),
            age: 24,
            city,
            gender: Gender::NonBinary,
            hobbies: [Hobby::new("1", "Gaming"), Hobby::new("2", "Reading")]
                .into_iter()
                .collect::<HobbySet>(),
            bio: "Into board games".to_string(),
            personality_label: NEWCOMER_LABEL.to_string(),
            binary_choice_selections: vec!["Night owl".to_string()],
            vibe_tags: Vec::new(),
            fun_line: Some("Ask me about chess".to_string()),
            avatar_url: Profile::default_avatar_url(id),
            trait_hints: TraitHints {
                night_owl: Some(true),
                ..TraitHints::default()
            },
            verified: false,
            points: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profiles.toml");
        let repo = TomlProfileRepository::new(path.clone());

        let stored = repo.insert_if_absent(&profile("p1", City::Delhi)).await.unwrap();
        assert_eq!(stored.id, "p1");

        let reopened = TomlProfileRepository::new(path);
        let loaded = reopened.find_by_id("p1").await.unwrap().unwrap();
        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn test_insert_if_absent_keeps_first() {
        let dir = TempDir::new().unwrap();
        let repo = TomlProfileRepository::new(dir.path().join("profiles.toml"));

        let first = profile("p1", City::Delhi);
        repo.insert_if_absent(&first).await.unwrap();

        let mut second = profile("p1", City::Mumbai);
        second.bio = "different".to_string();
        let stored = repo.insert_if_absent(&second).await.unwrap();

        assert_eq!(stored.city, City::Delhi);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_by_city() {
        let dir = TempDir::new().unwrap();
        let repo = TomlProfileRepository::new(dir.path().join("profiles.toml"));
        repo.save(&profile("d1", City::Delhi)).await.unwrap();
        repo.save(&profile("m1", City::Mumbai)).await.unwrap();
        repo.save(&profile("d2", City::Delhi)).await.unwrap();

        let delhi: Vec<String> = repo
            .list_by_city(City::Delhi)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(delhi, vec!["d1", "d2"]);
    }
}
