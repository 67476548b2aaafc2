//! `init(Profile::Test)` followed by test capture, in a binary of its own so
//! nothing installs a subscriber first.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use tracelog_core::logging_facility::test_capture::init_test_capture;
use tracelog_core::logging_facility::{init, Profile};
use tracelog_core::Logger;

#[test]
fn test_init_then_capture() {
    init(Profile::Test);
    let capture = init_test_capture();

    // The global sink comes from init at the Test profile's TRACE threshold
    let log = Logger::get("profile_tests::App");
    log.debug(|| "captured after init");
    log.diag(|| "payload <ok/>");

    capture.assert_event_exists("profile_tests::App", "DEBUG");
    capture.assert_event_exists("profile_tests::App", "DIAG");
}
