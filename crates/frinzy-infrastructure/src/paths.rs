//! Path resolution for Frinzy's local files.
//!
//! ```text
//! ~/.config/frinzy/        # config directory (platform equivalent elsewhere)
//! └── config.toml
//!
//! ~/.local/share/frinzy/   # data directory
//! └── profiles.toml
//! ```

use std::path::PathBuf;

use frinzy_core::FrinzyError;

const APP_DIR: &str = "frinzy";

/// Resolves directories either from the platform defaults or from an
/// explicit base (tests, `--data-dir`).
#[derive(Debug, Clone, Default)]
pub struct FrinzyPaths {
    base: Option<PathBuf>,
}

impl FrinzyPaths {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    pub fn config_dir(&self) -> Result<PathBuf, FrinzyError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or_else(|| FrinzyError::config("cannot determine config directory")),
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, FrinzyError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or_else(|| FrinzyError::config("cannot determine data directory")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, FrinzyError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn profiles_file(&self) -> Result<PathBuf, FrinzyError> {
        Ok(self.data_dir()?.join("profiles.toml"))
    }
}
