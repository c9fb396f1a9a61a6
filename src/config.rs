use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::Deserialize;

use crate::alarm::DuplicatePolicy;

pub const APP_DIR: &str = "calendar-alarms";
const DEFAULT_WINDOW_DAYS: u32 = 7;

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

/// Settings from `~/.config/calendar-alarms/config.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where alarms and logs are written. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,

    /// Days of calendar events offered for selection.
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            window_days: DEFAULT_WINDOW_DAYS,
            duplicate_policy: DuplicatePolicy::default(),
            log_level: None,
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Loads the user config, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("Invalid config in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.window_days == 0 {
            return Err(eyre!("window_days must be at least 1"));
        }
        Ok(config)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or_else(|| eyre!("Could not determine data directory")),
        }
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.window_days, 7);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Allow);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn reads_every_key() {
        let config = Config::parse(
            r#"
            data_dir = "/var/tmp/alarms"
            window_days = 14
            duplicate_policy = "reject"
            log_level = "warn"
            "#,
        )
        .unwrap();
        assert_eq!(config.window_days, 14);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/var/tmp/alarms"));
        assert_eq!(config.log_dir().unwrap(), PathBuf::from("/var/tmp/alarms/logs"));
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn rejects_zero_window_and_unknown_keys() {
        assert!(Config::parse("window_days = 0").is_err());
        assert!(Config::parse("colour = \"red\"").is_err());
        assert!(Config::parse("duplicate_policy = \"merge\"").is_err());
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "window_days = 3\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().window_days, 3);
    }
}
