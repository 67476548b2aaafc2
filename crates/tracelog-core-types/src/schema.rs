//! Canonical schema constants for structured logging and call tracing
//!
//! These constants keep field names and message fragments consistent between
//! the facade, the sink bridge and the test capture layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_SEVERITY: &str = "severity";
pub const FIELD_FAILURE: &str = "failure";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_CALLER_FILE: &str = "caller_file";
pub const FIELD_CALLER_LINE: &str = "caller_line";

// Canonical call tracing events
pub const EVENT_ENTERING: &str = "Entering";
pub const EVENT_EXITING: &str = "Exiting";
pub const EVENT_THROWING: &str = "Throwing";

// Call tracing message fragments
pub const ARGUMENTS: &str = ": Arguments =>";
pub const RETURNS: &str = ", Returns =>";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NULL_VALUE: &str = "null";

/// `tracing` target used by the bridge sink
pub const BRIDGE_TARGET: &str = "tracelog";

/// Environment variable holding level directives
pub const ENV_LEVEL: &str = "TRACELOG_LEVEL";
