//! Call instrumentation
//!
//! A unit declares one [`UnitTracer`] and routes its methods through it.
//! Each traced call emits at TRACE level, through the unit's own logger:
//!
//! - `Entering {method}: Arguments => a, b` before the body runs
//! - `Exiting {method}: Arguments => a, b, Returns => r` on normal return
//! - `Throwing {method} - {failure}` when the body returns `Err` or panics
//!
//! Messages are built inside the logger's producer closure, so nothing is
//! formatted unless TRACE is enabled for the unit. Failures and panics reach
//! the caller exactly as the body produced them.

use std::sync::OnceLock;

use crate::errors::{Result, TraceLogError};

pub mod format;
pub mod scope;
pub mod tracer;
pub mod value;

pub use scope::{Exclusion, InstrumentationConfig};
pub use tracer::{UnitTracer, CONSTRUCTOR};
pub use value::{AsDebug, AsDisplay, TraceValue};

static CONFIG: OnceLock<InstrumentationConfig> = OnceLock::new();

/// Install the process-wide instrumentation settings.
///
/// # Errors
///
/// `AlreadyConfigured` if settings were installed, or the defaults were
/// already in use by a traced call.
pub fn configure(config: InstrumentationConfig) -> Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| TraceLogError::AlreadyConfigured)
}

/// The active settings; defaults trace every unit.
pub fn config() -> &'static InstrumentationConfig {
    CONFIG.get_or_init(InstrumentationConfig::default)
}
