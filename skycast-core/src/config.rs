use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Units;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "SKYCAST_API_KEY";

/// How many recent searches are kept.
const RECENT_LIMIT: usize = 5;

/// Top-level configuration stored on disk: the provider credential plus
/// the user preferences the dashboard persists between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key. `SKYCAST_API_KEY` takes precedence when set.
    pub api_key: Option<String>,

    /// Preferred unit system, "metric" or "imperial".
    pub units: Option<String>,

    /// Favorite cities, in the order they were added.
    #[serde(default)]
    pub favorites: Vec<String>,

    /// Most recent searches first, capped at [`RECENT_LIMIT`].
    #[serde(default)]
    pub recent_searches: Vec<String>,
}

impl Config {
    /// API key with environment precedence over the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
    }

    /// Return the preferred unit system as a strongly-typed value,
    /// defaulting to metric when none is stored.
    pub fn resolved_units(&self) -> Result<Units> {
        match self.units.as_deref() {
            None => Ok(Units::default()),
            Some(s) => Units::try_from(s),
        }
    }

    /// Store the unit system as a string.
    pub fn set_units(&mut self, units: Units) {
        self.units = Some(units.to_string());
    }

    /// Add a favorite unless an equivalent entry (case-insensitive)
    /// already exists. Returns whether anything changed.
    pub fn add_favorite(&mut self, city: &str) -> bool {
        if self.favorites.iter().any(|f| f.eq_ignore_ascii_case(city)) {
            return false;
        }
        self.favorites.push(city.to_string());
        true
    }

    /// Remove a favorite by case-insensitive match. Returns whether
    /// anything changed.
    pub fn remove_favorite(&mut self, city: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| !f.eq_ignore_ascii_case(city));
        self.favorites.len() != before
    }

    /// Record a search: moves the city to the front, dropping any older
    /// duplicate, and trims the list to its cap.
    pub fn push_recent(&mut self, city: &str) {
        self.recent_searches.retain(|c| !c.eq_ignore_ascii_case(city));
        self.recent_searches.insert(0, city.to_string());
        self.recent_searches.truncate(RECENT_LIMIT);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
