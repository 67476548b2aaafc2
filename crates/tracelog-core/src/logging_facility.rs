//! Logging facility for tracelog
//!
//! This module wires the facade to the outside world:
//! - Single initialization point via `init(profile)`
//! - Declaration macros (`declare_tracer!`, `traced!`)
//! - In-memory sink for buffering and deterministic assertions
//! - Test capture mode for events bridged into `tracing`
//!
//! # Usage
//!
//! ```rust
//! use tracelog_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod memory_sink;
pub mod test_capture;

pub use init::{init, Profile};
pub use memory_sink::{CapturedRecord, MemorySink};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
