//! Core types shared across tracelog facilities
//!
//! This crate provides the leaf types used by both the logging facade and
//! the call instrumentation:
//!
//! - **Sensitive data**: `Sensitive<T>` marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod sensitive;

pub use sensitive::{Sensitive, SENSITIVE_VALUE_REPLACEMENT};
