//! CLI configuration management.
//!
//! Precedence, lowest first: built-in defaults, the JSON config file,
//! `LUCKY_WHEEL_*` environment variables (a `.env` file is honored), then
//! command-line flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use lucky_wheel_core::WheelConfig;
use serde::{Deserialize, Serialize};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "LUCKY_WHEEL_CONFIG";
/// Overrides the options directory.
pub const DATA_DIR_ENV: &str = "LUCKY_WHEEL_DATA_DIR";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "lucky-wheel", "lucky-wheel")
}

/// Application-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Widget tunables shared with the front-end.
    #[serde(flatten)]
    pub wheel: WheelConfig,

    /// Directory holding `options.json`.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("lucky-wheel"));

        Self {
            wheel: WheelConfig::default(),
            data_dir,
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config from {}", path.display()))?;
                serde_json::from_str(&contents).with_context(|| {
                    format!("Failed to parse config file {}", path.display())
                })?
            }
            _ => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `LUCKY_WHEEL_*` overrides read through `var`.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = var(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(locale) = var("LUCKY_WHEEL_LOCALE") {
            self.wheel.locale = locale;
        }
        if let Some(user_agent) = var("LUCKY_WHEEL_USER_AGENT") {
            self.wheel.user_agent = Some(user_agent);
        }
        if let Some(turns) = var("LUCKY_WHEEL_EXTRA_ROTATIONS") {
            self.wheel.extra_rotations = turns
                .parse()
                .with_context(|| format!("Invalid LUCKY_WHEEL_EXTRA_ROTATIONS: {}", turns))?;
        }
        if let Some(ms) = var("LUCKY_WHEEL_SPIN_DURATION_MS") {
            self.wheel.spin_duration_ms = ms
                .parse()
                .with_context(|| format!("Invalid LUCKY_WHEEL_SPIN_DURATION_MS: {}", ms))?;
        }
        Ok(())
    }

    /// Save current configuration to the config file.
    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::config_file_path() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&config_path, contents)
                .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        }
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                (DATA_DIR_ENV, "/tmp/wheel"),
                ("LUCKY_WHEEL_USER_AGENT", "MicroMessenger"),
                ("LUCKY_WHEEL_SPIN_DURATION_MS", "1200"),
            ]))
            .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/wheel"));
        assert_eq!(config.wheel.user_agent.as_deref(), Some("MicroMessenger"));
        assert_eq!(config.wheel.spin_duration_ms, 1200);
        assert_eq!(config.wheel.extra_rotations, 5);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let mut config = Config::default();
        let err = config
            .apply_env(env(&[("LUCKY_WHEEL_EXTRA_ROTATIONS", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("LUCKY_WHEEL_EXTRA_ROTATIONS"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"data_dir": "/srv/wheel", "locale": "zh-TW"}"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/wheel"));
        assert_eq!(config.wheel.locale, "zh-TW");
        assert_eq!(config.wheel.storage_key, "wheelOptions");
        assert_eq!(config.wheel.long_press_ms, 1500);
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.wheel, config.wheel);
        assert_eq!(back.data_dir, config.data_dir);
    }
}
