//! JSON-file persistence for the rate config.
//!
//! The store owns the single `config.json` the admin panel edits.  The
//! engine never touches it: callers fetch a [`RateConfig`] snapshot
//! here and pass it into [`crate::engine::calculate`] by value, so a
//! concurrent admin update can never tear a calculation in half.

use crate::rates::RateConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Reads and writes the persisted rate config.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    /// Returns the persisted config.  If none has ever been saved the
    /// default rate table is written to disk and returned, so the
    /// first `GET` an admin sees is also the file they will edit.
    pub fn get(&self) -> Result<RateConfig> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)
                .with_context(|| format!("failed to read config from {:?}", self.path))?;
            let config = serde_json::from_str(&data)
                .with_context(|| format!("config file {:?} is not valid JSON", self.path))?;
            Ok(config)
        } else {
            let config = RateConfig::default();
            self.write(&config)?;
            Ok(config)
        }
    }

    /// Validates and persists an updated config, returning the stored
    /// value.  A config with any negative rate is rejected and the
    /// file on disk is left untouched.
    pub fn put(&self, config: RateConfig) -> Result<RateConfig> {
        config.validate()?;
        self.write(&config)?;
        Ok(config)
    }

    fn write(&self, config: &RateConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create config directory {parent:?}"))?;
            }
        }
        let data = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write config to {:?}", self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_get_seeds_the_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = ConfigStore::new(&path);
        let config = store.get().unwrap();
        assert_eq!(config.paper_rate, 100.0);
        assert!(path.exists());
    }

    #[test]
    fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        let mut config = RateConfig::default();
        config.paper_rate = 150.0;
        config.spot_uv_minimum = 4000.0;
        store.put(config).unwrap();
        let loaded = store.get().unwrap();
        assert_eq!(loaded.paper_rate, 150.0);
        assert_eq!(loaded.spot_uv_minimum, 4000.0);
    }

    #[test]
    fn put_rejects_negative_rates_without_touching_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        store.get().unwrap();
        let mut config = RateConfig::default();
        config.coating_rate = -1.0;
        assert!(store.put(config).is_err());
        assert_eq!(store.get().unwrap().coating_rate, 1.2);
    }
}
