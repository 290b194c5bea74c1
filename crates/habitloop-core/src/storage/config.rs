//! TOML-based user preferences.
//!
//! Stores the appearance and quote settings a UI layer applies:
//! theme color, font size, and whether the daily quote is shown.
//! Preferences live at `~/.config/habitloop/config.toml`, separate from
//! the tracker state in the key-value store, and are never consulted by
//! the habit state machine itself.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

use super::data_dir;

/// User preferences.
///
/// Serialized to/from TOML at `~/.config/habitloop/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    #[serde(default = "default_font_size")]
    pub font_size: String,
    #[serde(default = "default_true")]
    pub show_daily_quote: bool,
}

fn default_theme_color() -> String {
    "green".into()
}
fn default_font_size() -> String {
    "medium".into()
}
fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme_color: default_theme_color(),
            font_size: default_font_size(),
            show_daily_quote: true,
        }
    }
}

impl Preferences {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if
    /// the defaults cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let prefs = Self::default();
                prefs.save()?;
                Ok(prefs)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning defaults on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a preference value as string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "theme_color" => Some(self.theme_color.clone()),
            "font_size" => Some(self.font_size.clone()),
            "show_daily_quote" => Some(self.show_daily_quote.to_string()),
            _ => None,
        }
    }

    /// Set a preference value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the preferences cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "theme_color" => self.theme_color = value.to_string(),
            "font_size" => self.font_size = value.to_string(),
            "show_daily_quote" => {
                self.show_daily_quote =
                    value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as bool"),
                    })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.save()
    }
}
