//! User configuration
//!
//! Credentials and the default target language live in a single JSON file in
//! the user's home directory, created interactively on first run.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Name of the configuration file in the home directory
const CONFIG_FILE: &str = ".wikiturnrc";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// DeepL authorisation key
    pub auth_key: String,
    /// Target language code used when none is given on the command line
    pub default_target_lang: String,
}

impl Config {
    pub fn new(auth_key: impl Into<String>, default_target_lang: impl Into<String>) -> Self {
        Self {
            auth_key: auth_key.into(),
            default_target_lang: default_target_lang.into().to_uppercase(),
        }
    }

    /// Path of the configuration file, `~/.wikiturnrc`.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        Ok(home.join(CONFIG_FILE))
    }

    /// Whether a configuration file already exists.
    pub fn exists() -> bool {
        Self::path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Load the configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::path()?)
    }

    /// Load the configuration from an explicit path.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("config file {:?} is not valid", path))?;
        Ok(config)
    }

    /// Save the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::path()?)
    }

    /// Save the configuration to an explicit path.
    pub fn save_to(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_json::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write config file {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let config = Config::new("secret:fx", "cs");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.auth_key, "secret:fx");
        assert_eq!(loaded.default_target_lang, "CS");
    }

    #[test]
    fn test_new_uppercases_language() {
        let config = Config::new("key", "de");
        assert_eq!(config.default_target_lang, "DE");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(dir.path().join("absent")).is_err());
    }
}
