//! Per-unit call tracer

use std::fmt::Display;
use std::panic::Location;
use std::sync::{Arc, OnceLock};

use crate::facade::Logger;
use crate::sink::Sink;

use super::format;
use super::scope::{self, Exclusion, UnitDecl};
use super::value::TraceValue;

/// Name reported for constructor calls
pub const CONSTRUCTOR: &str = "new";

const PANICKED: &str = "panicked";

/// Tracer owned by one unit, typically declared as a `static`:
///
/// ```
/// use tracelog_core::instrument::UnitTracer;
///
/// static TRACER: UnitTracer = UnitTracer::new("my_demo1::App1");
///
/// fn get_greeting() -> String {
///     TRACER.call("get_greeting", &[], || "Hello world from my-demo1".to_string())
/// }
/// # assert_eq!(get_greeting(), "Hello world from my-demo1");
/// ```
///
/// The unit's logger is created on first use and shared by every later
/// call, including calls racing on first use.
pub struct UnitTracer {
    unit: &'static str,
    untraced: bool,
    excluded_methods: &'static [&'static str],
    sink: Option<Arc<dyn Sink>>,
    logger: OnceLock<Logger>,
}

impl UnitTracer {
    pub const fn new(unit: &'static str) -> Self {
        Self::declare(unit, false, &[])
    }

    /// A unit carrying the untraced marker: nothing is ever emitted and no
    /// logger is created.
    ///
    /// The marker belongs to this tracer only. Units nested under the same
    /// path (`my_demo::Vault::Inner`) declare their own tracer and stay
    /// traced unless marked too; to silence a whole subtree, list its prefix
    /// in `InstrumentationConfig::exclude_units`.
    pub const fn untraced(unit: &'static str) -> Self {
        Self::declare(unit, true, &[])
    }

    /// A traced unit with some methods marked untraced
    pub const fn excluding(unit: &'static str, methods: &'static [&'static str]) -> Self {
        Self::declare(unit, false, methods)
    }

    const fn declare(
        unit: &'static str,
        untraced: bool,
        excluded_methods: &'static [&'static str],
    ) -> Self {
        Self {
            unit,
            untraced,
            excluded_methods,
            sink: None,
            logger: OnceLock::new(),
        }
    }

    /// Write to `sink` instead of the process-wide one
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }

    pub fn is_untraced(&self) -> bool {
        self.untraced
    }

    fn decl(&self) -> UnitDecl<'static> {
        UnitDecl {
            unit: self.unit,
            untraced: self.untraced,
            excluded_methods: self.excluded_methods,
        }
    }

    /// Why `method` is not traced, or `None` when it is
    pub fn exclusion(&self, method: &str) -> Option<Exclusion> {
        scope::resolve(&self.decl(), method, super::config())
    }

    /// The unit's logger, initialized on first access. `None` for units the
    /// scope rules exclude as a whole.
    pub fn logger(&self) -> Option<&Logger> {
        match scope::resolve_unit(&self.decl(), super::config()) {
            Some(_) => None,
            None => Some(self.init_logger()),
        }
    }

    /// Whether the logger was created yet
    pub fn is_initialized(&self) -> bool {
        self.logger.get().is_some()
    }

    fn init_logger(&self) -> &Logger {
        self.logger.get_or_init(|| match &self.sink {
            Some(sink) => Logger::with_sink(self.unit, sink.clone()),
            None => Logger::get(self.unit),
        })
    }

    fn active(&self, method: &str) -> Option<&Logger> {
        match self.exclusion(method) {
            Some(_) => None,
            None => Some(self.init_logger()),
        }
    }

    /// Trace a method that returns normally or panics
    #[track_caller]
    pub fn call<R, F>(&self, method: &str, args: &[&dyn TraceValue], body: F) -> R
    where
        R: TraceValue,
        F: FnOnce() -> R,
    {
        let Some(log) = self.active(method) else {
            return body();
        };

        let location = Location::caller();
        let guard = enter(log, location, method, args);
        let ret = body();
        guard.disarm();

        log.trace(location, || {
            format::exiting(method, args, Some(&ret as &dyn TraceValue))
        });
        ret
    }

    /// Trace a fallible method. An `Err` emits a throwing event and is
    /// handed back to the caller as is.
    #[track_caller]
    pub fn call_result<R, E, F>(
        &self,
        method: &str,
        args: &[&dyn TraceValue],
        body: F,
    ) -> Result<R, E>
    where
        R: TraceValue,
        E: Display,
        F: FnOnce() -> Result<R, E>,
    {
        let Some(log) = self.active(method) else {
            return body();
        };

        let location = Location::caller();
        let guard = enter(log, location, method, args);
        let result = body();
        guard.disarm();

        match &result {
            Ok(ret) => log.trace(location, || {
                format::exiting(method, args, Some(ret as &dyn TraceValue))
            }),
            Err(failure) => log.trace(location, || format::throwing(method, failure)),
        }
        result
    }

    /// Trace a constructor. No return value is reported.
    #[track_caller]
    pub fn construct<T, F>(&self, args: &[&dyn TraceValue], body: F) -> T
    where
        F: FnOnce() -> T,
    {
        let Some(log) = self.active(CONSTRUCTOR) else {
            return body();
        };

        let location = Location::caller();
        let guard = enter(log, location, CONSTRUCTOR, args);
        let value = body();
        guard.disarm();

        log.trace(location, || format::exiting(CONSTRUCTOR, args, None));
        value
    }

    /// Trace a fallible constructor
    #[track_caller]
    pub fn construct_result<T, E, F>(&self, args: &[&dyn TraceValue], body: F) -> Result<T, E>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        let Some(log) = self.active(CONSTRUCTOR) else {
            return body();
        };

        let location = Location::caller();
        let guard = enter(log, location, CONSTRUCTOR, args);
        let result = body();
        guard.disarm();

        match &result {
            Ok(_) => log.trace(location, || format::exiting(CONSTRUCTOR, args, None)),
            Err(failure) => log.trace(location, || format::throwing(CONSTRUCTOR, failure)),
        }
        result
    }
}

fn enter<'a>(
    log: &'a Logger,
    location: &'static Location<'static>,
    method: &'a str,
    args: &[&dyn TraceValue],
) -> ThrowOnUnwind<'a> {
    log.trace(location, || format::entering(method, args));
    ThrowOnUnwind {
        log,
        location,
        method,
    }
}

/// Emits a throwing event if dropped while a panic unwinds out of the body.
/// Disarmed on normal return, so the panic itself is never caught.
struct ThrowOnUnwind<'a> {
    log: &'a Logger,
    location: &'static Location<'static>,
    method: &'a str,
}

impl ThrowOnUnwind<'_> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for ThrowOnUnwind<'_> {
    fn drop(&mut self) {
        let method = self.method;
        self.log
            .trace(self.location, || format::throwing(method, &PANICKED));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelConfig;
    use crate::logging_facility::MemorySink;
    use crate::severity::Severity;

    #[test]
    fn test_untraced_unit_never_creates_logger() {
        let sink = Arc::new(MemorySink::new(LevelConfig::new(Severity::TRACE)));
        let tracer = UnitTracer::untraced("tracer_tests::Hidden").with_sink(sink.clone());

        assert_eq!(tracer.call("run", &[], || 7), 7);
        assert!(tracer.logger().is_none());
        assert!(!tracer.is_initialized());
        assert_eq!(sink.enabled_checks(), 0);
    }

    #[test]
    fn test_logger_bound_to_unit_name() {
        let sink = Arc::new(MemorySink::new(LevelConfig::new(Severity::TRACE)));
        let tracer = UnitTracer::new("tracer_tests::Visible").with_sink(sink);

        assert!(!tracer.is_initialized());
        let log = tracer.logger().unwrap();
        assert_eq!(log.unit(), "tracer_tests::Visible");
        assert!(tracer.is_initialized());
    }

    #[test]
    fn test_constructor_reports_no_return_value() {
        let sink = Arc::new(MemorySink::new(LevelConfig::new(Severity::TRACE)));
        let tracer = UnitTracer::new("tracer_tests::Point").with_sink(sink.clone());

        let p = tracer.construct(&[&1, &2], || (1, 2));
        assert_eq!(p, (1, 2));
        assert_eq!(
            sink.messages(),
            vec![
                "Entering new: Arguments => 1, 2".to_string(),
                "Exiting new: Arguments => 1, 2, Returns => N/A".to_string(),
            ]
        );
    }
}
