//! Initialization ordering against the process-wide default sink.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use tracelog_core::logging_facility::{init, Profile};
use tracelog_core::{Logger, Severity};

#[test]
fn test_init_after_default_sink_applies_profile_threshold() {
    // Materializes the default sink at INFO before any init
    let early = Logger::get("init_tests::Early");

    init(Profile::Development);

    let late = Logger::get("init_tests::Late");
    assert!(late.is_enabled(Severity::DEBUG));
    assert!(early.is_enabled(Severity::DEBUG));
    assert!(!late.is_enabled(Severity::DIAG));
}
