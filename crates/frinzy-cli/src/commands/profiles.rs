use std::path::PathBuf;

use anyhow::{Context, Result};
use frinzy_core::profile::ProfileRepository;
use frinzy_infrastructure::{FrinzyPaths, TomlProfileRepository};

use super::roster::sample_profiles;

pub fn open_store(data_dir: Option<PathBuf>) -> Result<TomlProfileRepository> {
    TomlProfileRepository::from_paths(&FrinzyPaths::new(data_dir))
        .context("Failed to open the profile store")
}

pub async fn seed(data_dir: Option<PathBuf>) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut written = 0;
    for profile in sample_profiles() {
        if store.find_by_id(&profile.id).await?.is_none() {
            store.insert_if_absent(&profile).await?;
            written += 1;
        }
    }
    println!("Seeded {} profiles", written);
    Ok(())
}

pub async fn list(data_dir: Option<PathBuf>) -> Result<()> {
    let store = open_store(data_dir)?;
    let profiles = store.list_all().await?;
    if profiles.is_empty() {
        println!("No profiles stored. Run `frinzy profiles seed` first.");
        return Ok(());
    }
    for profile in profiles {
        let hobbies: Vec<&str> = profile.hobbies.iter().map(|h| h.name.as_str()).collect();
        println!(
            "{:<10} {:<10} {:<10} {}",
            profile.id,
            profile.display_name,
            profile.city,
            hobbies.join(", ")
        );
    }
    Ok(())
}
