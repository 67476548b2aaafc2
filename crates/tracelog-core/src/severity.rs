//! Severity model
//!
//! Severities are ordered values with an explicit numeric rank rather than a
//! closed enum, so custom levels can sit between the standard ones. Ranks use
//! the log4j scale where a larger rank is more verbose:
//!
//! | Severity | Rank |
//! |----------|------|
//! | ERROR    | 200  |
//! | WARN     | 300  |
//! | INFO     | 400  |
//! | DEBUG    | 500  |
//! | DIAG     | 550  |
//! | TRACE    | 600  |
//!
//! `OFF` and `ALL` are thresholds only; no event is ever emitted at them.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Result, TraceLogError};

/// A named severity with an explicit rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Severity {
    name: &'static str,
    rank: u16,
}

impl Severity {
    /// Nothing is enabled at this threshold
    pub const OFF: Severity = Severity::new("OFF", 0);
    pub const ERROR: Severity = Severity::new("ERROR", 200);
    pub const WARN: Severity = Severity::new("WARN", 300);
    pub const INFO: Severity = Severity::new("INFO", 400);
    pub const DEBUG: Severity = Severity::new("DEBUG", 500);
    /// Very fine-grained diagnostic payloads (full request/response bodies).
    /// Not meant for call flow tracing.
    pub const DIAG: Severity = Severity::new("DIAG", 550);
    pub const TRACE: Severity = Severity::new("TRACE", 600);
    /// Everything is enabled at this threshold
    pub const ALL: Severity = Severity::new("ALL", u16::MAX);

    const STANDARD: [Severity; 8] = [
        Severity::OFF,
        Severity::ERROR,
        Severity::WARN,
        Severity::INFO,
        Severity::DEBUG,
        Severity::DIAG,
        Severity::TRACE,
        Severity::ALL,
    ];

    const fn new(name: &'static str, rank: u16) -> Self {
        Self { name, rank }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rank(&self) -> u16 {
        self.rank
    }

    /// Whether an event at `severity` passes when `self` is the threshold.
    ///
    /// Enablement is monotonic: a threshold enabling some severity enables
    /// every less verbose one too.
    pub fn enables(&self, severity: Severity) -> bool {
        severity.rank != 0 && severity.rank <= self.rank
    }

    /// Whether `self` is strictly more verbose than `other`
    pub fn is_more_verbose_than(&self, other: Severity) -> bool {
        self.rank > other.rank
    }

    /// Register a custom severity at an explicit rank.
    ///
    /// Registering an existing name at the same rank returns the existing
    /// severity. Names are matched case-insensitively and stored upper case,
    /// like the standard levels.
    ///
    /// # Errors
    ///
    /// `ReservedRank` for ranks 0 and `u16::MAX`, `SeverityConflict` when the
    /// name is already taken at another rank.
    pub fn register(name: &'static str, rank: u16) -> Result<Severity> {
        if rank == Severity::OFF.rank || rank == Severity::ALL.rank {
            return Err(TraceLogError::ReservedRank { rank });
        }

        let key = name.to_ascii_uppercase();
        let mut levels = registry()
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = levels.get(&key) {
            if existing.rank == rank {
                return Ok(*existing);
            }
            return Err(TraceLogError::SeverityConflict {
                name: key,
                existing: existing.rank,
                requested: rank,
            });
        }

        let name: &'static str = if name == key {
            name
        } else {
            // One allocation per distinct custom level, kept for the process
            Box::leak(key.clone().into_boxed_str())
        };
        let severity = Severity::new(name, rank);
        levels.insert(key, severity);
        Ok(severity)
    }

    /// Look up a standard or registered severity by name (case-insensitive).
    ///
    /// # Errors
    ///
    /// `UnknownSeverity` when nothing is registered under `name`.
    pub fn lookup(name: &str) -> Result<Severity> {
        let key = name.trim().to_ascii_uppercase();
        registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied()
            .ok_or_else(|| TraceLogError::UnknownSeverity {
                name: name.to_string(),
            })
    }
}

fn registry() -> &'static RwLock<HashMap<String, Severity>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, Severity>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let levels = Severity::STANDARD
            .iter()
            .map(|s| (s.name.to_string(), *s))
            .collect();
        RwLock::new(levels)
    })
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.name.cmp(other.name))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl std::str::FromStr for Severity {
    type Err = TraceLogError;

    fn from_str(s: &str) -> Result<Self> {
        Severity::lookup(s)
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Severity::lookup(&name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_ordering() {
        assert!(Severity::TRACE > Severity::DIAG);
        assert!(Severity::DIAG > Severity::DEBUG);
        assert!(Severity::DEBUG > Severity::INFO);
        assert!(Severity::INFO > Severity::WARN);
        assert!(Severity::WARN > Severity::ERROR);
    }

    #[test]
    fn test_diag_sits_between_debug_and_trace() {
        assert_eq!(Severity::DIAG.rank(), 550);
        assert!(Severity::DIAG.is_more_verbose_than(Severity::DEBUG));
        assert!(Severity::TRACE.is_more_verbose_than(Severity::DIAG));
    }

    #[test]
    fn test_off_enables_nothing_all_enables_everything() {
        for s in [
            Severity::ERROR,
            Severity::WARN,
            Severity::INFO,
            Severity::DEBUG,
            Severity::DIAG,
            Severity::TRACE,
        ] {
            assert!(!Severity::OFF.enables(s));
            assert!(Severity::ALL.enables(s));
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Severity::lookup("diag").unwrap(), Severity::DIAG);
        assert_eq!(" Warn ".parse::<Severity>().unwrap(), Severity::WARN);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = Severity::lookup("loud").unwrap_err();
        assert_eq!(err.code(), "ERR_UNKNOWN_SEVERITY");
    }

    #[test]
    fn test_register_idempotent_and_conflicting() {
        let notice = Severity::register("NOTICE_UNIT_TEST", 350).unwrap();
        assert_eq!(Severity::register("notice_unit_test", 350).unwrap(), notice);
        assert!(Severity::WARN < notice && notice < Severity::INFO);

        let err = Severity::register("NOTICE_UNIT_TEST", 360).unwrap_err();
        assert_eq!(
            err,
            TraceLogError::SeverityConflict {
                name: "NOTICE_UNIT_TEST".to_string(),
                existing: 350,
                requested: 360,
            }
        );
    }

    #[test]
    fn test_registered_name_is_upper_case() {
        let verbose = Severity::register("verbose_unit_test", 580).unwrap();
        assert_eq!(verbose.name(), "VERBOSE_UNIT_TEST");
        assert_eq!(verbose.to_string(), "VERBOSE_UNIT_TEST");
        assert_eq!(
            serde_json::to_string(&verbose).unwrap(),
            "\"VERBOSE_UNIT_TEST\""
        );
        assert_eq!(Severity::lookup("Verbose_Unit_Test").unwrap(), verbose);
    }

    #[test]
    fn test_register_diag_again_returns_builtin() {
        assert_eq!(Severity::register("DIAG", 550).unwrap(), Severity::DIAG);
    }

    #[test]
    fn test_register_reserved_rank() {
        assert!(matches!(
            Severity::register("NEVER", 0),
            Err(TraceLogError::ReservedRank { rank: 0 })
        ));
    }

    #[test]
    fn test_serde_by_name() {
        let json = serde_json::to_string(&Severity::DIAG).unwrap();
        assert_eq!(json, "\"DIAG\"");
        let back: Severity = serde_json::from_str("\"trace\"").unwrap();
        assert_eq!(back, Severity::TRACE);
    }
}
