use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Page sizes the settings panel cycles through
pub const PAGE_SIZE_CHOICES: [usize; 5] = [5, 10, 15, 25, 50];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dark_mode: bool,
    /// Page size of the full transaction list and the users/reports tables
    pub page_size: usize,
    /// Page size of the recent transactions panel
    pub compact_page_size: usize,
    /// Whether tables jump back to page 1 when their rows change
    pub reset_page_on_data_change: bool,
    pub user_count: usize,
    pub transaction_count: usize,
    /// Fixed RNG seed for reproducible mock data
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dark_mode: true,
            page_size: 15,
            compact_page_size: 5,
            reset_page_on_data_change: true,
            user_count: 24,
            transaction_count: 60,
            seed: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".pulse-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the saved config, falling back to defaults
    pub fn load() -> Config {
        let Some(config_path) = Self::config_path() else {
            log::warn!("HOME is not set, using default config");
            return Config::default();
        };
        if !config_path.exists() {
            return Config::default();
        }

        let parsed = fs::read_to_string(&config_path)
            .map_err(anyhow::Error::from)
            .and_then(|contents| Self::parse(&contents));
        match parsed {
            Ok(config) => {
                log::info!("loaded config from {}", config_path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring config at {}: {:#}", config_path.display(), e);
                Config::default()
            }
        }
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn parse(contents: &str) -> anyhow::Result<Config> {
        let config: Config = serde_json::from_str(contents).context("invalid config JSON")?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self.compact_page_size = self.compact_page_size.max(1);
        self
    }

    /// Next page size in `PAGE_SIZE_CHOICES` after the current one
    pub fn next_page_size(&self) -> usize {
        PAGE_SIZE_CHOICES
            .iter()
            .copied()
            .find(|&size| size > self.page_size)
            .unwrap_or(PAGE_SIZE_CHOICES[0])
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("creating {}", config_dir.display()))?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)
            .with_context(|| format!("writing {}", config_path.display()))?;

        log::info!("saved config to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fills_missing_fields() {
        let config = Config::parse(r#"{ "dark_mode": false, "page_size": 25 }"#).unwrap();
        assert!(!config.dark_mode);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.compact_page_size, 5);
        assert!(config.reset_page_on_data_change);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_parse_clamps_zero_page_size() {
        let config = Config::parse(r#"{ "page_size": 0 }"#).unwrap();
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Config::parse("not json").is_err());
    }

    #[test]
    fn test_next_page_size_cycles() {
        let mut config = Config::default();
        assert_eq!(config.next_page_size(), 25);
        config.page_size = 50;
        assert_eq!(config.next_page_size(), 5);
        config.page_size = 7;
        assert_eq!(config.next_page_size(), 10);
    }

    #[test]
    fn test_roundtrip_json() {
        let config = Config {
            seed: Some(9),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::parse(&json).unwrap(), config);
    }
}
