//! Level and instrumentation configuration
//!
//! Levels are configured with `EnvFilter`-style directives:
//!
//! ```
//! use tracelog_core::config::LevelConfig;
//! use tracelog_core::Severity;
//!
//! let config = LevelConfig::parse("info,my_demo::app=trace,my_demo2=diag").unwrap();
//! assert_eq!(config.threshold_for("my_demo::app::Greeter"), Severity::TRACE);
//! assert_eq!(config.threshold_for("my_demo2::App2"), Severity::DIAG);
//! assert_eq!(config.threshold_for("other"), Severity::INFO);
//! ```

use serde::{Deserialize, Serialize};
use tracelog_core_types::schema::ENV_LEVEL;

use crate::errors::{Result, TraceLogError};
use crate::instrument::InstrumentationConfig;
use crate::redaction::KeyRedactor;
use crate::severity::Severity;

/// Per-unit severity thresholds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    default: Severity,
    /// Sorted longest prefix first
    overrides: Vec<(String, Severity)>,
}

impl LevelConfig {
    /// A config applying `default` to every unit
    pub fn new(default: Severity) -> Self {
        Self {
            default,
            overrides: Vec::new(),
        }
    }

    /// Set the threshold for every unit under `prefix`
    pub fn with_override(mut self, prefix: impl Into<String>, threshold: Severity) -> Self {
        let prefix = prefix.into();
        self.overrides.retain(|(p, _)| *p != prefix);
        self.overrides.push((prefix, threshold));
        self.overrides
            .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        self
    }

    /// Parse a comma separated directive list.
    ///
    /// A bare level sets the default; `prefix=level` sets an override.
    ///
    /// # Errors
    ///
    /// `InvalidDirective` for empty prefixes, empty levels or unknown
    /// severity names.
    pub fn parse(directives: &str) -> Result<Self> {
        let mut config = LevelConfig::new(Severity::INFO);

        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                None => config.default = parse_level(directive, directive)?,
                Some((prefix, level)) => {
                    let prefix = prefix.trim();
                    if prefix.is_empty() {
                        return Err(TraceLogError::InvalidDirective {
                            directive: directive.to_string(),
                            reason: "empty unit prefix".to_string(),
                        });
                    }
                    let threshold = parse_level(directive, level)?;
                    config = config.with_override(prefix, threshold);
                }
            }
        }

        Ok(config)
    }

    /// Read directives from `TRACELOG_LEVEL`, falling back to INFO when the
    /// variable is unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_env_or(Severity::INFO)
    }

    pub fn from_env_or(default: Severity) -> Self {
        std::env::var(ENV_LEVEL)
            .ok()
            .and_then(|d| LevelConfig::parse(&d).ok())
            .unwrap_or_else(|| LevelConfig::new(default))
    }

    pub fn default_threshold(&self) -> Severity {
        self.default
    }

    /// Threshold applying to `unit`: the longest matching prefix, else the
    /// default.
    pub fn threshold_for(&self, unit: &str) -> Severity {
        self.overrides
            .iter()
            .find(|(prefix, _)| prefix_matches(prefix, unit))
            .map(|(_, threshold)| *threshold)
            .unwrap_or(self.default)
    }

    pub fn is_enabled(&self, unit: &str, severity: Severity) -> bool {
        self.threshold_for(unit).enables(severity)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::new(Severity::INFO)
    }
}

impl std::str::FromStr for LevelConfig {
    type Err = TraceLogError;

    fn from_str(s: &str) -> Result<Self> {
        LevelConfig::parse(s)
    }
}

fn parse_level(directive: &str, level: &str) -> Result<Severity> {
    let level = level.trim();
    if level.is_empty() {
        return Err(TraceLogError::InvalidDirective {
            directive: directive.to_string(),
            reason: "empty level".to_string(),
        });
    }
    Severity::lookup(level).map_err(|e| TraceLogError::InvalidDirective {
        directive: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Prefix match on whole path segments, `::` or `.` separated.
pub(crate) fn prefix_matches(prefix: &str, unit: &str) -> bool {
    match unit.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with("::") || rest.starts_with('.'),
        None => false,
    }
}

/// File-level configuration
///
/// ```toml
/// level = "info,my_demo=trace"
/// scope = ["my_demo1", "my_demo2"]
/// exclude_units = ["my_demo1::Secrets"]
/// exclude_methods = ["heartbeat"]
/// redact_keys = ["password", "token"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceLogConfig {
    pub level: Option<String>,
    pub scope: Vec<String>,
    pub exclude_units: Vec<String>,
    pub exclude_methods: Vec<String>,
    pub redact_keys: Vec<String>,
}

impl TraceLogConfig {
    /// # Errors
    ///
    /// `Config` when the document is not valid TOML for this shape.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// # Errors
    ///
    /// `InvalidDirective` when `level` does not parse.
    pub fn level_config(&self) -> Result<LevelConfig> {
        match &self.level {
            Some(directives) => LevelConfig::parse(directives),
            None => Ok(LevelConfig::default()),
        }
    }

    pub fn instrumentation(&self) -> InstrumentationConfig {
        InstrumentationConfig {
            scope: self.scope.clone(),
            exclude_units: self.exclude_units.clone(),
            exclude_methods: self.exclude_methods.clone(),
        }
    }

    /// `None` unless redaction keys were configured
    pub fn redactor(&self) -> Option<KeyRedactor> {
        if self.redact_keys.is_empty() {
            None
        } else {
            Some(KeyRedactor::new(self.redact_keys.iter().cloned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_sets_default() {
        let config = LevelConfig::parse("debug").unwrap();
        assert_eq!(config.default_threshold(), Severity::DEBUG);
        assert_eq!(config.threshold_for("anything"), Severity::DEBUG);
    }

    #[test]
    fn test_empty_string_defaults_to_info() {
        let config = LevelConfig::parse("").unwrap();
        assert_eq!(config, LevelConfig::default());
    }

    #[test]
    fn test_longest_prefix_wins() {
        let config = LevelConfig::parse("warn,app=debug,app::db=trace").unwrap();
        assert_eq!(config.threshold_for("app::db::Pool"), Severity::TRACE);
        assert_eq!(config.threshold_for("app::web"), Severity::DEBUG);
        assert_eq!(config.threshold_for("app"), Severity::DEBUG);
        assert_eq!(config.threshold_for("other"), Severity::WARN);
    }

    #[test]
    fn test_prefix_respects_segment_boundaries() {
        let config = LevelConfig::parse("error,app=trace").unwrap();
        assert_eq!(config.threshold_for("application"), Severity::ERROR);
        assert_eq!(config.threshold_for("app.Main"), Severity::TRACE);
    }

    #[test]
    fn test_later_override_replaces_earlier() {
        let config = LevelConfig::parse("app=trace,app=error").unwrap();
        assert_eq!(config.threshold_for("app"), Severity::ERROR);
    }

    #[test]
    fn test_invalid_directives() {
        for bad in ["=debug", "app=", "loud", "app=loud"] {
            let err = LevelConfig::parse(bad).unwrap_err();
            assert_eq!(err.code(), "ERR_INVALID_DIRECTIVE", "directive {bad}");
        }
    }

    #[test]
    fn test_toml_config() {
        let config = TraceLogConfig::from_toml_str(
            r#"
            level = "info,my_demo=diag"
            scope = ["my_demo1", "my_demo2"]
            exclude_methods = ["heartbeat"]
            redact_keys = ["password"]
            "#,
        )
        .unwrap();

        let levels = config.level_config().unwrap();
        assert_eq!(levels.threshold_for("my_demo::App"), Severity::DIAG);
        assert_eq!(config.instrumentation().scope.len(), 2);
        assert!(config.redactor().is_some());
    }

    #[test]
    fn test_toml_config_rejects_bad_shape() {
        let err = TraceLogConfig::from_toml_str("scope = 3").unwrap_err();
        assert_eq!(err.code(), "ERR_CONFIG");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = TraceLogConfig::from_toml_str("").unwrap();
        assert_eq!(config, TraceLogConfig::default());
        assert!(config.redactor().is_none());
    }
}
