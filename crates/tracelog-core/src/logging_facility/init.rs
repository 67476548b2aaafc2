//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::{Arc, Once};

use tracelog_core_types::schema::BRIDGE_TARGET;
use tracing_subscriber::EnvFilter;

use crate::config::LevelConfig;
use crate::severity::Severity;
use crate::sink::{default_sink, install_sink, TracingSink};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Facade threshold used when `TRACELOG_LEVEL` is unset
    pub fn default_threshold(&self) -> Severity {
        match self {
            Profile::Development => Severity::DEBUG,
            Profile::Production => Severity::INFO,
            Profile::Test => Severity::TRACE,
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// This function should be called once at application startup. It installs
/// a `tracing` subscriber for the profile and a global [`TracingSink`]
/// whose thresholds come from `TRACELOG_LEVEL` or the profile default.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, DEBUG threshold
/// - **Production**: JSON structured logs, INFO threshold
/// - **Test**: No subscriber, TRACE threshold; pair with `init_test_capture`,
///   before or after this call
///
/// The subscriber filter lets every bridged event through; per-unit gating
/// happens in the sink. `RUST_LOG` still overrides it.
///
/// If a logger already materialized the default sink, that sink is switched
/// to the profile's thresholds. A sink installed through `install_sink`
/// before `init` is left as is.
///
/// # Example
///
/// ```
/// use tracelog_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{BRIDGE_TARGET}=trace")))
        };

        match profile {
            Profile::Development => {
                tracing_subscriber::fmt().with_env_filter(filter()).init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter())
                    .init();
            }
            Profile::Test => {
                // The subscriber comes from init_test_capture()
            }
        }

        let levels = LevelConfig::from_env_or(profile.default_threshold());
        if install_sink(Arc::new(TracingSink::new(levels.clone()))).is_err() {
            match default_sink() {
                Some(default) => default.set_levels(levels),
                None => tracing::debug!(
                    target: BRIDGE_TARGET,
                    profile = ?profile,
                    "Keeping sink installed before init"
                ),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        // Multiple calls should not panic
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Test);
    }

    #[test]
    fn test_profile_thresholds() {
        assert_eq!(Profile::Development.default_threshold(), Severity::DEBUG);
        assert_eq!(Profile::Production.default_threshold(), Severity::INFO);
        assert_eq!(Profile::Test.default_threshold(), Severity::TRACE);
    }
}
