use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::theme::ThemePreference;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Countdown interval in seconds shown when the window opens
    pub interval_secs: u32,

    /// Alarm clip to play instead of the bundled `alarm.wav`
    pub sound_file: Option<PathBuf>,

    /// Playback volume, 1.0 is the clip's own level
    pub volume: f32,

    /// Open the window pinned above other windows
    pub start_pinned: bool,

    /// Also show a desktop notification on every alarm
    pub enable_notifications: bool,

    /// Palette: follow the system, or force light/dark
    pub theme: ThemePreference,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_secs: 55,
            sound_file: None,
            volume: 1.0,
            start_pinned: false,
            enable_notifications: false,
            theme: ThemePreference::System,
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        Ok(PathBuf::from(home).join(".config/smoke-alert"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            anyhow::bail!("Interval must be greater than 0");
        }
        if !(0.0..=2.0).contains(&self.volume) {
            anyhow::bail!("Volume must be between 0.0 and 2.0, got {}", self.volume);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reminder_interval() {
        let config = Config::default();
        assert_eq!(config.interval_secs, 55);
        assert!(!config.start_pinned);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse("interval_secs = 30\nstart_pinned = true\n").unwrap();
        assert_eq!(config.interval_secs, 30);
        assert!(config.start_pinned);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.sound_file, None);
    }

    #[test]
    fn sound_file_is_read_as_path() {
        let config = Config::parse("sound_file = \"/opt/sounds/beep.wav\"").unwrap();
        assert_eq!(config.sound_file, Some(PathBuf::from("/opt/sounds/beep.wav")));
    }

    #[test]
    fn theme_preference_is_lowercase() {
        let config = Config::parse("theme = \"dark\"").unwrap();
        assert_eq!(config.theme, ThemePreference::Dark);
        assert!(Config::parse("theme = \"solarized\"").is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Config::parse("interval_secs = \"soon\"").is_err());
    }

    #[test]
    fn zero_interval_fails_validation() {
        let config = Config {
            interval_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn volume_out_of_range_fails_validation() {
        let config = Config {
            volume: 3.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
