//! Declaration macros
//!
//! These macros keep tracer declarations and traced calls uniform.

/// Declare a `static` [`UnitTracer`](crate::instrument::UnitTracer)
///
/// # Example
///
/// ```
/// # use tracelog_core::declare_tracer;
/// declare_tracer!(TRACER);                                 // unit = module_path!()
/// declare_tracer!(APP, "my_demo::App");
/// declare_tracer!(VAULT, "my_demo::Vault", untraced);
/// declare_tracer!(pub(crate) POLLER, "my_demo::Poller", exclude = ["heartbeat"]);
/// # assert!(VAULT.is_untraced());
/// ```
#[macro_export]
macro_rules! declare_tracer {
    ($vis:vis $name:ident) => {
        $vis static $name: $crate::instrument::UnitTracer =
            $crate::instrument::UnitTracer::new(module_path!());
    };
    ($vis:vis $name:ident, $unit:expr) => {
        $vis static $name: $crate::instrument::UnitTracer =
            $crate::instrument::UnitTracer::new($unit);
    };
    ($vis:vis $name:ident, $unit:expr, untraced) => {
        $vis static $name: $crate::instrument::UnitTracer =
            $crate::instrument::UnitTracer::untraced($unit);
    };
    ($vis:vis $name:ident, $unit:expr, exclude = [$($method:expr),* $(,)?]) => {
        $vis static $name: $crate::instrument::UnitTracer =
            $crate::instrument::UnitTracer::excluding($unit, &[$($method),*]);
    };
}

/// Route a method body through a tracer
///
/// # Example
///
/// ```
/// # use tracelog_core::{declare_tracer, traced};
/// declare_tracer!(TRACER, "my_demo::Calc");
///
/// fn add(a: i32, b: i32) -> i32 {
///     traced!(TRACER, "add", [a, b], || a + b)
/// }
/// # assert_eq!(add(2, 3), 5);
/// ```
#[macro_export]
macro_rules! traced {
    ($tracer:expr, $method:expr, [$($arg:expr),* $(,)?], $body:expr) => {
        $tracer.call(
            $method,
            &[$(&$arg as &dyn $crate::instrument::TraceValue),*],
            $body,
        )
    };
}
