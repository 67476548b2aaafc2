//! Rendering of argument and return values into trace messages

use std::borrow::Cow;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;
use std::sync::Arc;

use tracelog_core_types::schema::NULL_VALUE;
use tracelog_core_types::Sensitive;

/// A value that can appear in an argument list or as a return value.
///
/// `None` and `()` are *absent*: as a return value they render the `N/A`
/// marker, inside an argument list they render `null`.
pub trait TraceValue {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn is_absent(&self) -> bool {
        false
    }
}

/// Display adapter for a `TraceValue`
pub(crate) struct Rendered<'a>(pub &'a dyn TraceValue);

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_trace(f)
    }
}

macro_rules! trace_value_via_display {
    ($($t:ty),* $(,)?) => {
        $(
            impl TraceValue for $t {
                fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    Display::fmt(self, f)
                }
            }
        )*
    };
}

trace_value_via_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String,
);

impl TraceValue for Cow<'_, str> {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl TraceValue for () {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(NULL_VALUE)
    }

    fn is_absent(&self) -> bool {
        true
    }
}

impl<T: TraceValue> TraceValue for Option<T> {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(v) => v.fmt_trace(f),
            None => f.write_str(NULL_VALUE),
        }
    }

    fn is_absent(&self) -> bool {
        match self {
            Some(v) => v.is_absent(),
            None => true,
        }
    }
}

impl<T> TraceValue for Sensitive<T> {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl<T: TraceValue> TraceValue for [T] {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            v.fmt_trace(f)?;
        }
        f.write_str("]")
    }
}

impl<T: TraceValue> TraceValue for Vec<T> {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt_trace(f)
    }
}

macro_rules! trace_value_via_deref {
    ($($ptr:ident),*) => {
        $(
            impl<T: TraceValue + ?Sized> TraceValue for $ptr<T> {
                fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    (**self).fmt_trace(f)
                }

                fn is_absent(&self) -> bool {
                    (**self).is_absent()
                }
            }
        )*
    };
}

trace_value_via_deref!(Box, Rc, Arc);

impl<T: TraceValue + ?Sized> TraceValue for &T {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_trace(f)
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: TraceValue + ?Sized> TraceValue for &mut T {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_trace(f)
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

/// Traces any `Display` type
pub struct AsDisplay<T>(pub T);

impl<T: Display> TraceValue for AsDisplay<T> {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Traces any `Debug` type
pub struct AsDebug<T>(pub T);

impl<T: Debug> TraceValue for AsDebug<T> {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}
