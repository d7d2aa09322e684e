use anyhow::{Context, Result};
use pocketbook_core::{Budget, FileStore};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;

/// `$POCKETBOOK_HOME`, or `~/.pocketbook`.
pub fn pocketbook_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("POCKETBOOK_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".pocketbook"))
}

pub fn ensure_pocketbook_home() -> Result<PathBuf> {
    let dir = pocketbook_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Where the JSON state files live: `[storage].data_dir`, or `<home>/data`.
pub fn data_dir(cfg: &Config) -> Result<PathBuf> {
    match cfg.storage.data_dir.as_deref().map(str::trim) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => Ok(ensure_pocketbook_home()?.join("data")),
    }
}

pub fn open_budget(cfg: &Config) -> Result<Budget<FileStore>> {
    let dir = data_dir(cfg)?;
    let store = FileStore::open(&dir).with_context(|| format!("open data dir {}", dir.display()))?;
    tracing::debug!(dir = %dir.display(), "opened budget store");
    Ok(Budget::load(store))
}
