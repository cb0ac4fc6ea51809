//! Settings file utilities

use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("firelens"))
}

pub fn data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .context("Could not determine data directory")
        .map(|p| p.join("firelens"))
}

pub fn logs_dir() -> Result<PathBuf> {
    data_dir().map(|p| p.join("logs"))
}

pub fn profiles_file() -> Result<PathBuf> {
    data_dir().map(|p| p.join("profiles.json"))
}

/// Where exports land when no output directory is configured
pub fn default_export_dir() -> Result<PathBuf> {
    match dirs::download_dir() {
        Some(dir) => Ok(dir),
        None => data_dir().map(|p| p.join("exports")),
    }
}

pub fn ensure_directories() -> Result<()> {
    let dirs = [config_dir()?, data_dir()?, logs_dir()?];
    for dir in dirs {
        if !dir.exists() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {:?}", dir))?;
        }
    }
    Ok(())
}
