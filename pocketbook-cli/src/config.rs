use anyhow::{Context, Result};
use pocketbook_core::MoneyFormat;
use pocketbook_core::report::DEFAULT_CURRENCY_PREFIX;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_pocketbook_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplaySection,
    pub storage: StorageSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Printed before every amount, e.g. "Rs" or "$"
    pub currency_prefix: String,
    /// Characters used for a 100% bar in `pocketbook chart`
    pub chart_width: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Directory for the JSON state files (default: <home>/data)
    pub data_dir: Option<String>,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            currency_prefix: DEFAULT_CURRENCY_PREFIX.to_string(),
            chart_width: 40,
        }
    }
}

impl Config {
    pub fn money(&self) -> MoneyFormat {
        MoneyFormat::new(self.display.currency_prefix.trim())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_pocketbook_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.money().amount(5.0), "Rs 5.00");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[display]\ncurrency_prefix = \"$\"\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.display.currency_prefix, "$");
        assert_eq!(cfg.display.chart_width, 40);
        assert_eq!(cfg.storage.data_dir, None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.display.chart_width = 20;
        cfg.storage.data_dir = Some("/tmp/pocketbook-data".to_string());

        save_config_to(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[display\n").unwrap();
        let err = load_config_from(&p).unwrap_err();
        assert!(format!("{err:#}").contains("parse"));
    }
}
