//! Leveled logging facade
//!
//! Every call takes a closure producing the message instead of the message
//! itself. The sink's enablement check runs first; on a disabled path the
//! closure is never invoked, so formatting costs nothing.
//!
//! ```
//! use std::sync::Arc;
//! use tracelog_core::logging_facility::MemorySink;
//! use tracelog_core::{LevelConfig, Logger, Severity};
//!
//! let sink = Arc::new(MemorySink::new(LevelConfig::new(Severity::INFO)));
//! let log = Logger::with_sink("my_demo::App", sink.clone());
//!
//! log.info(|| "Universal manager is on.");
//! log.debug(|| -> String { unreachable!("DEBUG is disabled") });
//!
//! assert_eq!(sink.records().len(), 1);
//! ```

use std::error::Error;
use std::fmt::{self, Display};
use std::panic::Location;
use std::sync::Arc;

use crate::redaction::{PassThrough, Redactor};
use crate::severity::Severity;
use crate::sink::{global_sink, LogEvent, Sink};

/// Logger bound to the identity of one code unit
#[derive(Clone)]
pub struct Logger {
    unit: Arc<str>,
    sink: Arc<dyn Sink>,
    redactor: Arc<dyn Redactor>,
}

impl Logger {
    /// Logger for an explicit identity, writing to the process-wide sink
    pub fn get(identity: impl Into<Arc<str>>) -> Self {
        Self::with_sink(identity, global_sink())
    }

    /// Logger named after `T`'s qualified type name
    pub fn for_type<T: ?Sized>() -> Self {
        Self::get(std::any::type_name::<T>())
    }

    /// Logger writing to an explicit sink
    pub fn with_sink(identity: impl Into<Arc<str>>, sink: Arc<dyn Sink>) -> Self {
        Self {
            unit: identity.into(),
            sink,
            redactor: Arc::new(PassThrough),
        }
    }

    /// Replace the redaction hook
    pub fn with_redactor(mut self, redactor: Arc<dyn Redactor>) -> Self {
        self.redactor = redactor;
        self
    }

    /// Identity attached to every event from this logger
    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.sink.is_enabled(&self.unit, severity)
    }

    /// A serious failure of something important that has to be dealt with.
    ///
    /// `log.error(|| format!("All hell broke loose. {}", reason));`
    #[track_caller]
    pub fn error<F, M>(&self, producer: F)
    where
        F: FnOnce() -> M,
        M: Display,
    {
        self.log(Severity::ERROR, producer, None, Location::caller());
    }

    /// Same as [`Logger::error`], attaching the failure that caused it.
    #[track_caller]
    pub fn error_with<F, M>(&self, producer: F, failure: &(dyn Error + 'static))
    where
        F: FnOnce() -> M,
        M: Display,
    {
        self.log(Severity::ERROR, producer, Some(failure), Location::caller());
    }

    /// An unusual or unexpected situation with no real harm done.
    #[track_caller]
    pub fn warn<F, M>(&self, producer: F)
    where
        F: FnOnce() -> M,
        M: Display,
    {
        self.log(Severity::WARN, producer, None, Location::caller());
    }

    /// Same as [`Logger::warn`], attaching a failure. Prefer the plain form
    /// when nothing actually failed.
    #[track_caller]
    pub fn warn_with<F, M>(&self, producer: F, failure: &(dyn Error + 'static))
    where
        F: FnOnce() -> M,
        M: Display,
    {
        self.log(Severity::WARN, producer, Some(failure), Location::caller());
    }

    /// Routine milestones: a service started, a user was added.
    #[track_caller]
    pub fn info<F, M>(&self, producer: F)
    where
        F: FnOnce() -> M,
        M: Display,
    {
        self.log(Severity::INFO, producer, None, Location::caller());
    }

    /// Low level detail for developers diagnosing the application.
    #[track_caller]
    pub fn debug<F, M>(&self, producer: F)
    where
        F: FnOnce() -> M,
        M: Display,
    {
        self.log(Severity::DEBUG, producer, None, Location::caller());
    }

    /// Finer than DEBUG: raw payloads such as full request and response
    /// bodies. Not for flow tracing.
    #[track_caller]
    pub fn diag<F, M>(&self, producer: F)
    where
        F: FnOnce() -> M,
        M: Display,
    {
        self.log(Severity::DIAG, producer, None, Location::caller());
    }

    /// Call flow tracing; reserved for the instrumentation module, which
    /// passes the traced call site as `location`.
    pub(crate) fn trace<F, M>(&self, location: &'static Location<'static>, producer: F)
    where
        F: FnOnce() -> M,
        M: Display,
    {
        self.log(Severity::TRACE, producer, None, location);
    }

    /// Run the producer and pass the rendered message through the
    /// redaction hook.
    fn filter<F, M>(&self, producer: F) -> String
    where
        F: FnOnce() -> M,
        M: Display,
    {
        self.redactor.redact(producer().to_string())
    }

    fn log<F, M>(
        &self,
        severity: Severity,
        producer: F,
        failure: Option<&(dyn Error + 'static)>,
        location: &'static Location<'static>,
    ) where
        F: FnOnce() -> M,
        M: Display,
    {
        if !self.sink.is_enabled(&self.unit, severity) {
            return;
        }

        let message = self.filter(producer);
        self.sink.emit(&LogEvent {
            severity,
            unit: &self.unit,
            message: &message,
            failure,
            location,
        });
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("unit", &self.unit).finish()
    }
}
