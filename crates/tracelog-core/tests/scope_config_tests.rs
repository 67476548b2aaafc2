#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Once;

use tracelog_core::instrument::{self, Exclusion, UnitTracer};
use tracelog_core::TraceLogConfig;

use common::memory_sink;

fn configure() {
    static CONFIGURE: Once = Once::new();
    CONFIGURE.call_once(|| {
        let config = TraceLogConfig::from_toml_str(
            r#"
            scope = ["my_demo1", "my_demo2"]
            exclude_units = ["my_demo2::secrets"]
            exclude_methods = ["my_demo1::App1::poll"]
            "#,
        )
        .unwrap();
        instrument::configure(config.instrumentation()).unwrap();
    });
}

#[test]
fn test_units_outside_scope_are_not_traced() {
    configure();
    let sink = memory_sink("trace");
    let outside = UnitTracer::new("my_demo::App").with_sink(sink.clone());

    outside.call("get_greeting", &[], || "hi".to_string());

    assert!(sink.records().is_empty());
    assert!(outside.logger().is_none());
    assert_eq!(outside.exclusion("get_greeting"), Some(Exclusion::OutOfScope));
}

#[test]
fn test_units_inside_scope_are_traced() {
    configure();
    let sink = memory_sink("trace");
    let inside = UnitTracer::new("my_demo1::App1").with_sink(sink.clone());

    inside.call("get_greeting", &[], || "hi".to_string());
    inside.call("poll", &[], || ());

    assert_eq!(
        sink.messages(),
        vec![
            "Entering get_greeting: Arguments => N/A".to_string(),
            "Exiting get_greeting: Arguments => N/A, Returns => hi".to_string(),
        ]
    );
}

#[test]
fn test_configured_unit_exclusion() {
    configure();
    let sink = memory_sink("trace");
    let vault = UnitTracer::new("my_demo2::secrets::Vault").with_sink(sink.clone());

    vault.call("open", &[], || ());

    assert!(sink.records().is_empty());
    assert_eq!(vault.exclusion("open"), Some(Exclusion::UntracedUnit));
}

#[test]
fn test_configure_only_once() {
    configure();
    let err = instrument::configure(Default::default()).unwrap_err();
    assert_eq!(err.code(), "ERR_ALREADY_INSTALLED");
}

#[test]
fn test_configured_unit_exclusion_covers_nested_units() {
    configure();
    let sink = memory_sink("trace");
    let inner = UnitTracer::new("my_demo2::secrets::Vault::Inner").with_sink(sink.clone());

    inner.call("open", &[], || ());

    assert!(sink.records().is_empty());
    assert_eq!(inner.exclusion("open"), Some(Exclusion::UntracedUnit));
}
