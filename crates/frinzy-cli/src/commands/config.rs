use std::path::PathBuf;

use anyhow::{Context, Result};
use frinzy_core::config::RootConfig;
use frinzy_infrastructure::ConfigService;

fn service(path: Option<PathBuf>) -> ConfigService {
    match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    }
}

pub fn load(path: Option<PathBuf>) -> Result<RootConfig> {
    service(path)
        .get_config()
        .context("Failed to load configuration")
}

pub fn show(config: &RootConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}

pub fn init(path: Option<PathBuf>) -> Result<()> {
    let written = service(path).write_default_if_missing()?;
    println!("Configuration at {}", written.display());
    Ok(())
}

pub fn path(path: Option<PathBuf>) -> Result<()> {
    println!("{}", service(path).config_path()?.display());
    Ok(())
}
