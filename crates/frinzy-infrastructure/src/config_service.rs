//! Configuration service.
//!
//! Loads `RootConfig` from `config.toml` once and caches it. A missing file
//! yields defaults; a malformed one is a `Config` error.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use frinzy_core::config::RootConfig;
use frinzy_core::{FrinzyError, Result};
use tracing::{debug, info};

use crate::paths::FrinzyPaths;
use crate::storage::AtomicTomlFile;

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Uses the platform config location.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the cached configuration, loading it on first access.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let cached = self
                .config
                .read()
                .map_err(|_| FrinzyError::internal("config cache poisoned"))?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.load()?;
        let mut cached = self
            .config
            .write()
            .map_err(|_| FrinzyError::internal("config cache poisoned"))?;
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    pub fn invalidate_cache(&self) {
        if let Ok(mut cached) = self.config.write() {
            *cached = None;
        }
    }

    /// Writes the default configuration if no file exists yet.
    ///
    /// Returns the config file path.
    pub fn write_default_if_missing(&self) -> Result<PathBuf> {
        let path = self.config_path()?;
        if !path.exists() {
            AtomicTomlFile::<RootConfig>::new(path.clone()).save(&RootConfig::default())?;
            info!("[ConfigService] Wrote default configuration to {}", path.display());
        }
        Ok(path)
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => FrinzyPaths::default().config_file(),
        }
    }

    fn load(&self) -> Result<RootConfig> {
        let path = self.config_path()?;
        debug!("[ConfigService] Loading configuration from {}", path.display());
        AtomicTomlFile::<RootConfig>::new(path.clone())
            .load()
            .map_err(|e| FrinzyError::config(format!("{}: {}", path.display(), e)))
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
