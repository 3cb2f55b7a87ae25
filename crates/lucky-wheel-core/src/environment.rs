//! Host environment classification.

use serde::{Deserialize, Serialize};

/// Whether `user_agent` contains `marker`, ignoring ASCII case.
pub fn is_embedded_browser(user_agent: &str, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }
    user_agent
        .to_ascii_lowercase()
        .contains(&marker.to_ascii_lowercase())
}

/// Kind of browsing environment the widget runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// In-app web view with restricted capabilities.
    Embedded,
    /// Regular browser or native window.
    Standard,
}

impl Environment {
    /// Classify a user-agent string.
    pub fn from_user_agent(user_agent: &str, marker: &str) -> Self {
        if is_embedded_browser(user_agent, marker) {
            Environment::Embedded
        } else {
            Environment::Standard
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Environment::Embedded => "embedded",
            Environment::Standard => "standard",
        }
    }
}

/// Speech synthesis availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechSupport {
    Available,
    Unavailable,
}

/// Capabilities resolved once at startup.
///
/// Call sites branch on this value instead of probing the host again, so tests
/// can pin any combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub environment: Environment,
    pub speech: SpeechSupport,
    /// Background caching workers can be registered.
    pub offline_cache: bool,
}

impl Capabilities {
    /// Resolve capabilities from the raw host probes.
    pub fn resolve(
        user_agent: &str,
        marker: &str,
        speech_available: bool,
        offline_cache_available: bool,
    ) -> Self {
        Self {
            environment: Environment::from_user_agent(user_agent, marker),
            speech: if speech_available {
                SpeechSupport::Available
            } else {
                SpeechSupport::Unavailable
            },
            offline_cache: offline_cache_available,
        }
    }

    /// Standard browser without speech or offline support (native default).
    pub fn standard() -> Self {
        Self {
            environment: Environment::Standard,
            speech: SpeechSupport::Unavailable,
            offline_cache: false,
        }
    }

    /// Standard browser with speech synthesis.
    pub fn standard_with_speech() -> Self {
        Self {
            speech: SpeechSupport::Available,
            ..Self::standard()
        }
    }

    /// Embedded in-app browser.
    pub fn embedded() -> Self {
        Self {
            environment: Environment::Embedded,
            ..Self::standard()
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.environment == Environment::Embedded
    }

    pub fn has_speech(&self) -> bool {
        self.speech == SpeechSupport::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WECHAT_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148 MicroMessenger/8.0.47";
    const CHROME_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
        (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

    #[test]
    fn test_detects_marker_case_insensitively() {
        assert!(is_embedded_browser(WECHAT_UA, "micromessenger"));
        assert!(is_embedded_browser(WECHAT_UA, "MICROMESSENGER"));
        assert!(!is_embedded_browser(CHROME_UA, "micromessenger"));
        assert!(!is_embedded_browser("", "micromessenger"));
        assert!(!is_embedded_browser(WECHAT_UA, ""));
    }

    #[test]
    fn test_resolve_capabilities() {
        let caps = Capabilities::resolve(WECHAT_UA, "micromessenger", true, true);
        assert!(caps.is_embedded());
        assert!(caps.has_speech());

        let caps = Capabilities::resolve(CHROME_UA, "micromessenger", false, true);
        assert_eq!(caps.environment, Environment::Standard);
        assert!(!caps.has_speech());
        assert!(caps.offline_cache);
    }
}
