//! Application configuration.

use crate::consts::cli_consts::{refresh, search};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the admin panel. Empty means "use the environment's".
    pub api_url: String,
    /// Route the client is considered to be on while watching.
    pub route: String,
    pub refresh_interval_secs: u64,
    pub search_debounce_ms: u64,
    /// Directory exports are written to. Empty means the current directory.
    pub export_dir: String,
    /// Window for the daily activity chart, in days.
    pub analytics_days: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::new(),
            route: "/".to_string(),
            refresh_interval_secs: refresh::interval().as_secs(),
            search_debounce_ms: search::debounce().as_millis() as u64,
            export_dir: String::new(),
            analytics_days: None,
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the timer settings can drive a scheduler.
    ///
    /// # Errors
    /// Returns `InvalidData` naming the first setting that is out of range.
    pub fn validate(&self) -> Result<(), std::io::Error> {
        if !(refresh::MIN_INTERVAL_SECS..=refresh::MAX_INTERVAL_SECS)
            .contains(&self.refresh_interval_secs)
        {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "refresh_interval_secs must be between {} and {}, got {}",
                    refresh::MIN_INTERVAL_SECS,
                    refresh::MAX_INTERVAL_SECS,
                    self.refresh_interval_secs
                ),
            ));
        }
        if self.search_debounce_ms > search::MAX_DEBOUNCE_MS {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "search_debounce_ms must be at most {}, got {}",
                    search::MAX_DEBOUNCE_MS,
                    self.search_debounce_ms
                ),
            ));
        }
        Ok(())
    }

    /// Loads the file at `path` if there is one, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the configuration file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        // Check that the path ends with config.json
        if !path.ends_with("config.json") {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path must end with config.json",
            ));
        }

        if !path.exists() {
            println!("No config file found at {}", path.display());
            return Ok(());
        }

        fs::remove_file(path)
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn search_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.search_debounce_ms)
    }
}

/// Location of the config file, `~/.admin-panel/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Failed to get home directory",
    ))?;
    Ok(home_path.join(".admin-panel").join("config.json"))
}
