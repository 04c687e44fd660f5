use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use katana_menu::MenuSettings;
use serde::{Deserialize, Serialize};

/// User configuration, loaded from `~/.config/katana/config.json`.
///
/// Everything has a default so a missing file just means stock behavior.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory rofi theme names are resolved against.
    pub theme_dir: PathBuf,
    /// Theme applied to every menu, when set.
    pub menu_theme: Option<String>,
    /// Where screenshots are saved.
    pub screenshot_dir: PathBuf,
    /// Seconds to wait for a menu selection before giving up.
    pub picker_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_dir: home().join(".config/rofi/themes"),
            menu_theme: None,
            screenshot_dir: PathBuf::from("/tmp"),
            picker_timeout_secs: 120,
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        home().join(".config/katana/config.json")
    }

    pub fn load() -> Result<Self> {
        let path = Self::path();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Menu orchestration settings derived from this configuration.
    pub fn menu_settings(&self) -> MenuSettings {
        MenuSettings::default()
            .with_theme_dir(&self.theme_dir)
            .with_value_timeout(Duration::from_secs(self.picker_timeout_secs))
    }
}

fn home() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: Config = serde_json::from_str("{\"picker_timeout_secs\": 30}").unwrap();
        assert_eq!(config.picker_timeout_secs, 30);
        assert_eq!(config.screenshot_dir, PathBuf::from("/tmp"));
        assert!(config.menu_theme.is_none());
    }

    #[test]
    fn settings_carry_the_timeout() {
        let config = Config {
            picker_timeout_secs: 7,
            ..Config::default()
        };
        let settings = config.menu_settings();
        assert_eq!(settings.value_timeout, Duration::from_secs(7));
    }
}
