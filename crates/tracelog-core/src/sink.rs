//! Sink abstraction
//!
//! The sink is the external collaborator that finally records an event. The
//! facade asks it `is_enabled` before building a message and calls `emit`
//! only when that check passed.

use std::error::Error;
use std::panic::Location;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracelog_core_types::schema::BRIDGE_TARGET;
use tracing::Level;

use crate::config::LevelConfig;
use crate::errors::{Result, TraceLogError};
use crate::severity::Severity;

/// A finished log event, lent to the sink for one `emit` call
#[derive(Debug, Clone, Copy)]
pub struct LogEvent<'a> {
    pub severity: Severity,
    /// Identity of the originating unit, not of the facade
    pub unit: &'a str,
    pub message: &'a str,
    pub failure: Option<&'a (dyn Error + 'static)>,
    /// Source location of the logging call, or of the traced call site
    pub location: &'static Location<'static>,
}

/// Destination for log events
pub trait Sink: Send + Sync {
    /// Whether events at `severity` from `unit` would be recorded
    fn is_enabled(&self, unit: &str, severity: Severity) -> bool;

    /// Record an event. Only called after `is_enabled` returned true.
    fn emit(&self, event: &LogEvent<'_>);
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn is_enabled(&self, unit: &str, severity: Severity) -> bool {
        (**self).is_enabled(unit, severity)
    }

    fn emit(&self, event: &LogEvent<'_>) {
        (**self).emit(event)
    }
}

/// Sink forwarding to the `tracing` dispatcher.
///
/// Gating requires both the unit's threshold in the `LevelConfig` and
/// `tracing` interest at the bridged level. DIAG bridges to `DEBUG`; the
/// `severity` field keeps the precise name.
pub struct TracingSink {
    levels: RwLock<LevelConfig>,
}

impl TracingSink {
    pub fn new(levels: LevelConfig) -> Self {
        Self {
            levels: RwLock::new(levels),
        }
    }

    /// Thresholds from `TRACELOG_LEVEL`
    pub fn from_env() -> Self {
        Self::new(LevelConfig::from_env())
    }

    /// Replace the thresholds at runtime
    pub fn set_levels(&self, levels: LevelConfig) {
        *self.levels.write().unwrap_or_else(PoisonError::into_inner) = levels;
    }

    pub fn levels(&self) -> LevelConfig {
        self.levels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn configured(&self, unit: &str, severity: Severity) -> bool {
        self.levels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_enabled(unit, severity)
    }
}

/// `tracing` level a severity is bridged to, by rank band
pub fn bridge_level(severity: Severity) -> Level {
    match severity.rank() {
        0..=200 => Level::ERROR,
        201..=300 => Level::WARN,
        301..=400 => Level::INFO,
        401..=550 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn bridge_enabled(level: Level) -> bool {
    if level == Level::ERROR {
        tracing::enabled!(target: BRIDGE_TARGET, Level::ERROR)
    } else if level == Level::WARN {
        tracing::enabled!(target: BRIDGE_TARGET, Level::WARN)
    } else if level == Level::INFO {
        tracing::enabled!(target: BRIDGE_TARGET, Level::INFO)
    } else if level == Level::DEBUG {
        tracing::enabled!(target: BRIDGE_TARGET, Level::DEBUG)
    } else {
        tracing::enabled!(target: BRIDGE_TARGET, Level::TRACE)
    }
}

macro_rules! bridge_event {
    ($level:expr, $event:expr) => {
        match $event.failure {
            Some(failure) => tracing::event!(
                target: BRIDGE_TARGET,
                $level,
                component = $event.unit,
                severity = $event.severity.name(),
                failure = failure,
                caller_file = $event.location.file(),
                caller_line = $event.location.line(),
                "{}",
                $event.message
            ),
            None => tracing::event!(
                target: BRIDGE_TARGET,
                $level,
                component = $event.unit,
                severity = $event.severity.name(),
                caller_file = $event.location.file(),
                caller_line = $event.location.line(),
                "{}",
                $event.message
            ),
        }
    };
}

impl Sink for TracingSink {
    fn is_enabled(&self, unit: &str, severity: Severity) -> bool {
        self.configured(unit, severity) && bridge_enabled(bridge_level(severity))
    }

    fn emit(&self, event: &LogEvent<'_>) {
        let level = bridge_level(event.severity);
        if level == Level::ERROR {
            bridge_event!(Level::ERROR, event);
        } else if level == Level::WARN {
            bridge_event!(Level::WARN, event);
        } else if level == Level::INFO {
            bridge_event!(Level::INFO, event);
        } else if level == Level::DEBUG {
            bridge_event!(Level::DEBUG, event);
        } else {
            bridge_event!(Level::TRACE, event);
        }
    }
}

static GLOBAL_SINK: OnceLock<Arc<dyn Sink>> = OnceLock::new();
static DEFAULT_SINK: OnceLock<Arc<TracingSink>> = OnceLock::new();

/// Install the process-wide sink used by `Logger::get`.
///
/// Must happen before the first logger is created through the global path.
///
/// # Errors
///
/// `SinkAlreadyInstalled` if a sink was installed, or the default was
/// already materialized by an earlier `global_sink()` call.
pub fn install_sink(sink: Arc<dyn Sink>) -> Result<()> {
    GLOBAL_SINK
        .set(sink)
        .map_err(|_| TraceLogError::SinkAlreadyInstalled)
}

/// The process-wide sink; a `TracingSink::from_env()` unless one was
/// installed first.
pub fn global_sink() -> Arc<dyn Sink> {
    GLOBAL_SINK
        .get_or_init(|| {
            let default: Arc<dyn Sink> = DEFAULT_SINK
                .get_or_init(|| Arc::new(TracingSink::from_env()))
                .clone();
            default
        })
        .clone()
}

/// The default sink, if `global_sink()` materialized it. When set, it is
/// the process-wide sink.
pub(crate) fn default_sink() -> Option<&'static Arc<TracingSink>> {
    DEFAULT_SINK.get()
}
