//! Offline caching worker registration policy.

use tracing::{info, warn};

use crate::environment::Capabilities;

/// Why registration was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmbeddedBrowser,
    Unsupported,
}

/// Whether to register the caching worker, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationPlan {
    Register { path: String },
    Skip(SkipReason),
}

/// Decide on registration. The embedded browser never registers.
pub fn plan_registration(capabilities: &Capabilities, path: &str) -> RegistrationPlan {
    if capabilities.is_embedded() {
        return RegistrationPlan::Skip(SkipReason::EmbeddedBrowser);
    }
    if !capabilities.offline_cache {
        return RegistrationPlan::Skip(SkipReason::Unsupported);
    }
    RegistrationPlan::Register {
        path: path.to_string(),
    }
}

impl RegistrationPlan {
    /// Log a registration attempt's outcome. Failures never propagate.
    pub fn report(&self, result: Result<(), String>) {
        let RegistrationPlan::Register { path } = self else {
            return;
        };
        match result {
            Ok(()) => info!(path = %path, "ServiceWorker registration successful"),
            Err(err) => warn!(path = %path, error = %err, "ServiceWorker registration failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_in_standard_browser() {
        let caps = Capabilities {
            offline_cache: true,
            ..Capabilities::standard()
        };
        assert_eq!(
            plan_registration(&caps, "service-worker.js"),
            RegistrationPlan::Register {
                path: "service-worker.js".to_string()
            }
        );
    }

    #[test]
    fn test_skips_embedded_even_when_supported() {
        let caps = Capabilities {
            offline_cache: true,
            ..Capabilities::embedded()
        };
        assert_eq!(
            plan_registration(&caps, "service-worker.js"),
            RegistrationPlan::Skip(SkipReason::EmbeddedBrowser)
        );
    }

    #[test]
    fn test_skips_without_worker_support() {
        assert_eq!(
            plan_registration(&Capabilities::standard(), "service-worker.js"),
            RegistrationPlan::Skip(SkipReason::Unsupported)
        );
    }
}
