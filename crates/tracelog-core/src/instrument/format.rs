//! Entering / exiting / throwing message builders
//!
//! Values are inserted positionally into the template. An empty argument
//! list renders `N/A` for the whole section; an absent value inside a
//! non-empty list renders `null` in its slot.

use std::fmt::{Display, Write};

use tracelog_core_types::schema::{
    ARGUMENTS, EVENT_ENTERING, EVENT_EXITING, EVENT_THROWING, NOT_AVAILABLE, RETURNS,
};

use super::value::{Rendered, TraceValue};

/// `Entering {method}: Arguments => a, b`
pub fn entering(method: &str, args: &[&dyn TraceValue]) -> String {
    let mut msg = format!("{EVENT_ENTERING} {method}");
    push_arguments(&mut msg, args);
    msg
}

/// `Exiting {method}: Arguments => a, b, Returns => r`
pub fn exiting(method: &str, args: &[&dyn TraceValue], returned: Option<&dyn TraceValue>) -> String {
    let mut msg = format!("{EVENT_EXITING} {method}");
    push_arguments(&mut msg, args);
    msg.push_str(RETURNS);
    match returned.filter(|r| !r.is_absent()) {
        Some(r) => {
            let _ = write!(msg, " {}", Rendered(r));
        }
        None => {
            msg.push(' ');
            msg.push_str(NOT_AVAILABLE);
        }
    }
    msg
}

/// `Throwing {method} - {failure}`
pub fn throwing(method: &str, failure: &dyn Display) -> String {
    format!("{EVENT_THROWING} {method} - {failure}")
}

fn push_arguments(msg: &mut String, args: &[&dyn TraceValue]) {
    msg.push_str(ARGUMENTS);
    if args.is_empty() {
        msg.push(' ');
        msg.push_str(NOT_AVAILABLE);
        return;
    }
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            msg.push(',');
        }
        let _ = write!(msg, " {}", Rendered(*arg));
    }
}
