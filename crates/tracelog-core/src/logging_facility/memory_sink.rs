//! In-memory sink
//!
//! Records owned copies of every emitted event and counts enablement checks,
//! which makes the facade's gating observable in tests.

use std::error::Error;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use crate::config::LevelConfig;
use crate::severity::Severity;
use crate::sink::{LogEvent, Sink};

/// Owned copy of an emitted event
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedRecord {
    pub severity: Severity,
    pub unit: String,
    pub message: String,
    /// `Display` of the attached failure
    pub failure: Option<String>,
    /// Address of the attached failure, for identity checks
    pub failure_addr: Option<usize>,
    pub location: &'static Location<'static>,
}

impl CapturedRecord {
    /// Whether `failure` is the very object attached to this record
    pub fn failure_is(&self, failure: &(dyn Error + 'static)) -> bool {
        self.failure_addr == Some(error_addr(failure))
    }
}

fn error_addr(failure: &(dyn Error + 'static)) -> usize {
    failure as *const dyn Error as *const () as usize
}

/// Sink buffering events in memory
pub struct MemorySink {
    levels: RwLock<LevelConfig>,
    records: Mutex<Vec<CapturedRecord>>,
    checks: AtomicUsize,
}

impl MemorySink {
    pub fn new(levels: LevelConfig) -> Self {
        Self {
            levels: RwLock::new(levels),
            records: Mutex::new(Vec::new()),
            checks: AtomicUsize::new(0),
        }
    }

    pub fn set_levels(&self, levels: LevelConfig) {
        *self.levels.write().unwrap_or_else(PoisonError::into_inner) = levels;
    }

    /// Get all recorded events
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Messages of all recorded events, in order
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    /// Count records matching a predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedRecord) -> bool,
    {
        self.records().iter().filter(|r| predicate(r)).count()
    }

    /// Number of `is_enabled` calls so far
    pub fn enabled_checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    /// Clear all recorded events and the check counter
    pub fn clear(&self) {
        self.records.lock().map(|mut r| r.clear()).ok();
        self.checks.store(0, Ordering::SeqCst);
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new(LevelConfig::new(Severity::ALL))
    }
}

impl Sink for MemorySink {
    fn is_enabled(&self, unit: &str, severity: Severity) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.levels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_enabled(unit, severity)
    }

    fn emit(&self, event: &LogEvent<'_>) {
        let record = CapturedRecord {
            severity: event.severity,
            unit: event.unit.to_string(),
            message: event.message.to_string(),
            failure: event.failure.map(|f| f.to_string()),
            failure_addr: event.failure.map(error_addr),
            location: event.location,
        };

        self.records
            .lock()
            .map(|mut records| records.push(record))
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_and_clear() {
        let sink = MemorySink::default();
        sink.emit(&LogEvent {
            severity: Severity::INFO,
            unit: "unit",
            message: "hello",
            failure: None,
            location: Location::caller(),
        });

        assert_eq!(sink.messages(), vec!["hello".to_string()]);
        sink.clear();
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_failure_identity() {
        let sink = MemorySink::default();
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let other = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        sink.emit(&LogEvent {
            severity: Severity::ERROR,
            unit: "unit",
            message: "failed",
            failure: Some(&err),
            location: Location::caller(),
        });

        let record = &sink.records()[0];
        assert_eq!(record.failure.as_deref(), Some("boom"));
        assert!(record.failure_is(&err));
        assert!(!record.failure_is(&other));
    }

    #[test]
    fn test_poisoned_levels_still_gate() {
        let sink = std::sync::Arc::new(MemorySink::new(LevelConfig::new(Severity::WARN)));
        let holder = sink.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.levels.write().unwrap();
            panic!("poison the level lock");
        })
        .join();

        assert!(sink.is_enabled("u", Severity::ERROR));
        assert!(!sink.is_enabled("u", Severity::INFO));
    }

    #[test]
    fn test_checks_counted() {
        let sink = MemorySink::new(LevelConfig::new(Severity::WARN));
        assert!(sink.is_enabled("u", Severity::ERROR));
        assert!(!sink.is_enabled("u", Severity::INFO));
        assert_eq!(sink.enabled_checks(), 2);
    }
}
