//! tracelog core - leveled logging facade with call instrumentation
//!
//! This crate provides:
//! - A severity model with explicit ranks, including the custom `DIAG` level
//!   between DEBUG and TRACE
//! - A logging facade whose calls take message-producing closures, invoked
//!   only after the sink reports the level enabled
//! - A redaction hook applied to every message before emission
//! - Per-unit call tracers emitting entering/exiting/throwing events
//! - A `tracing` bridge sink, an in-memory sink and the logging facility
//!   that initializes them
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tracelog_core::logging_facility::MemorySink;
//! use tracelog_core::{LevelConfig, Logger, Severity};
//!
//! let sink = Arc::new(MemorySink::new(LevelConfig::new(Severity::DIAG)));
//! let log = Logger::with_sink("my_demo::Client", sink.clone());
//!
//! log.diag(|| format!("System responded with - {}", "<body/>"));
//! assert_eq!(sink.records()[0].severity, Severity::DIAG);
//! ```

pub mod config;
pub mod errors;
pub mod facade;
pub mod instrument;
pub mod logging_facility;
pub mod redaction;
pub mod severity;
pub mod sink;

// Re-export commonly used types
pub use config::{LevelConfig, TraceLogConfig};
pub use errors::{ErrorKind, Result, TraceLogError};
pub use facade::Logger;
pub use instrument::{TraceValue, UnitTracer};
pub use severity::Severity;
pub use sink::{global_sink, install_sink, LogEvent, Sink, TracingSink};
pub use tracelog_core_types::Sensitive;
