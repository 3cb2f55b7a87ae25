//! Tunables for the wheel widget.

use serde::{Deserialize, Serialize};

use crate::error::WheelResult;

/// Configuration shared by the core, the egui front-end and the CLI.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Full extra turns added to every spin for visual effect.
    #[serde(default = "default_extra_rotations")]
    pub extra_rotations: u32,

    /// Duration of the spin transition in milliseconds.
    #[serde(default = "default_spin_duration_ms")]
    pub spin_duration_ms: u64,

    /// Locale tag for spoken announcements.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Key under which the labels are persisted.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Script path registered as the offline caching worker.
    #[serde(default = "default_service_worker_path")]
    pub service_worker_path: String,

    /// How long the wheel must be held before the reset confirmation opens.
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,

    /// User-agent substring identifying the embedded in-app browser.
    #[serde(default = "default_embedded_marker")]
    pub embedded_marker: String,

    /// Overrides the detected user agent (native builds have none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_extra_rotations() -> u32 {
    5
}

fn default_spin_duration_ms() -> u64 {
    5000
}

fn default_locale() -> String {
    "zh-CN".to_string()
}

fn default_storage_key() -> String {
    "wheelOptions".to_string()
}

fn default_service_worker_path() -> String {
    "service-worker.js".to_string()
}

fn default_long_press_ms() -> u64 {
    1500
}

fn default_embedded_marker() -> String {
    "micromessenger".to_string()
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            extra_rotations: default_extra_rotations(),
            spin_duration_ms: default_spin_duration_ms(),
            locale: default_locale(),
            storage_key: default_storage_key(),
            service_worker_path: default_service_worker_path(),
            long_press_ms: default_long_press_ms(),
            embedded_marker: default_embedded_marker(),
            user_agent: None,
        }
    }
}

impl WheelConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> WheelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Spin duration as a [`std::time::Duration`].
    pub fn spin_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.spin_duration_ms)
    }

    /// Long-press threshold as a [`std::time::Duration`].
    pub fn long_press(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.long_press_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_widget_constants() {
        let config = WheelConfig::default();
        assert_eq!(config.extra_rotations, 5);
        assert_eq!(config.spin_duration_ms, 5000);
        assert_eq!(config.locale, "zh-CN");
        assert_eq!(config.storage_key, "wheelOptions");
        assert_eq!(config.service_worker_path, "service-worker.js");
        assert_eq!(config.long_press_ms, 1500);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = WheelConfig::from_json(r#"{ "extra_rotations": 2 }"#).unwrap();
        assert_eq!(config.extra_rotations, 2);
        assert_eq!(config.spin_duration_ms, 5000);
        assert_eq!(config.embedded_marker, "micromessenger");
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(WheelConfig::from_json("{ not json").is_err());
    }
}
