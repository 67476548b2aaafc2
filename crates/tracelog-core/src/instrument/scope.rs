//! Scope resolution: which unit/method pairs get traced

use serde::{Deserialize, Serialize};

use crate::config::prefix_matches;

/// Units of this crate are never traced; tracing the tracer would recurse.
const SELF_CRATE: &str = env!("CARGO_CRATE_NAME");

/// Why a method is not traced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// The unit carries the untraced marker
    UntracedUnit,
    /// The method is on the unit's exclusion list or the configured one
    UntracedMethod,
    /// `to_string` / `fmt`: tracing them can recurse through formatting
    ToStringShaped,
    /// Generated accessor names (`access$*`, `__*`)
    SynthesizedAccessor,
    /// A unit of the instrumentation itself
    SelfInstrumentation,
    /// Outside the configured scope prefixes
    OutOfScope,
}

/// Process-wide instrumentation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentationConfig {
    /// Unit prefixes to trace; empty means every unit
    pub scope: Vec<String>,
    /// Units treated as if marked untraced
    pub exclude_units: Vec<String>,
    /// Method names, bare (`heartbeat`) or qualified (`my_demo::App::heartbeat`)
    pub exclude_methods: Vec<String>,
}

impl InstrumentationConfig {
    pub fn in_scope(&self, unit: &str) -> bool {
        self.scope.is_empty() || self.scope.iter().any(|p| prefix_matches(p, unit))
    }

    pub fn excludes_unit(&self, unit: &str) -> bool {
        self.exclude_units.iter().any(|p| prefix_matches(p, unit))
    }

    pub fn excludes_method(&self, unit: &str, method: &str) -> bool {
        self.exclude_methods.iter().any(|entry| {
            entry == method
                || entry
                    .strip_suffix(method)
                    .and_then(|head| head.strip_suffix("::"))
                    .is_some_and(|owner| owner == unit)
        })
    }
}

pub fn is_to_string_shaped(method: &str) -> bool {
    matches!(method, "to_string" | "fmt")
}

pub fn is_synthesized_accessor(method: &str) -> bool {
    method.starts_with("access$") || method.starts_with("__")
}

pub fn is_self_instrumentation(unit: &str) -> bool {
    prefix_matches(SELF_CRATE, unit)
}

/// Unit declaration as seen by the scope rules
#[derive(Debug, Clone, Copy)]
pub struct UnitDecl<'a> {
    pub unit: &'a str,
    pub untraced: bool,
    pub excluded_methods: &'a [&'a str],
}

/// Decide whether `method` of `decl` is traced; `None` means it is.
///
/// Unit-level reasons win over method-level ones.
pub fn resolve(
    decl: &UnitDecl<'_>,
    method: &str,
    config: &InstrumentationConfig,
) -> Option<Exclusion> {
    resolve_unit(decl, config).or_else(|| {
        if decl.excluded_methods.iter().any(|m| *m == method)
            || config.excludes_method(decl.unit, method)
        {
            Some(Exclusion::UntracedMethod)
        } else if is_to_string_shaped(method) {
            Some(Exclusion::ToStringShaped)
        } else if is_synthesized_accessor(method) {
            Some(Exclusion::SynthesizedAccessor)
        } else {
            None
        }
    })
}

/// Unit-level part of [`resolve`]
pub fn resolve_unit(decl: &UnitDecl<'_>, config: &InstrumentationConfig) -> Option<Exclusion> {
    if decl.untraced || config.excludes_unit(decl.unit) {
        Some(Exclusion::UntracedUnit)
    } else if is_self_instrumentation(decl.unit) {
        Some(Exclusion::SelfInstrumentation)
    } else if !config.in_scope(decl.unit) {
        Some(Exclusion::OutOfScope)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(unit: &'static str) -> UnitDecl<'static> {
        UnitDecl {
            unit,
            untraced: false,
            excluded_methods: &[],
        }
    }

    #[test]
    fn test_plain_method_is_traced() {
        let config = InstrumentationConfig::default();
        assert_eq!(resolve(&decl("my_demo1::App1"), "get_greeting", &config), None);
    }

    #[test]
    fn test_marked_unit_hides_every_method() {
        let config = InstrumentationConfig::default();
        let marked = UnitDecl {
            untraced: true,
            ..decl("my_demo1::Vault")
        };
        for method in ["new", "open", "to_string"] {
            assert_eq!(resolve(&marked, method, &config), Some(Exclusion::UntracedUnit));
        }
    }

    #[test]
    fn test_marked_method() {
        let config = InstrumentationConfig::default();
        let d = UnitDecl {
            excluded_methods: &["heartbeat"],
            ..decl("my_demo1::App1")
        };
        assert_eq!(resolve(&d, "heartbeat", &config), Some(Exclusion::UntracedMethod));
        assert_eq!(resolve(&d, "get_greeting", &config), None);
    }

    #[test]
    fn test_structural_exclusions() {
        let config = InstrumentationConfig::default();
        let d = decl("my_demo1::App1");
        assert_eq!(resolve(&d, "to_string", &config), Some(Exclusion::ToStringShaped));
        assert_eq!(resolve(&d, "fmt", &config), Some(Exclusion::ToStringShaped));
        assert_eq!(
            resolve(&d, "access$000", &config),
            Some(Exclusion::SynthesizedAccessor)
        );
        assert_eq!(
            resolve(&d, "__field_get", &config),
            Some(Exclusion::SynthesizedAccessor)
        );
    }

    #[test]
    fn test_own_units_excluded() {
        let config = InstrumentationConfig::default();
        assert_eq!(
            resolve(&decl("tracelog_core::facade::Logger"), "info", &config),
            Some(Exclusion::SelfInstrumentation)
        );
        assert_eq!(resolve(&decl("tracelog_core_ext::Thing"), "run", &config), None);
    }

    #[test]
    fn test_scope_prefixes() {
        let config = InstrumentationConfig {
            scope: vec!["my_demo1".to_string(), "my_demo2".to_string()],
            ..Default::default()
        };
        assert_eq!(resolve(&decl("my_demo2::App2"), "run", &config), None);
        assert_eq!(
            resolve(&decl("my_demo::App"), "run", &config),
            Some(Exclusion::OutOfScope)
        );
    }

    #[test]
    fn test_configured_exclusions() {
        let config = InstrumentationConfig {
            exclude_units: vec!["my_demo1::secrets".to_string()],
            exclude_methods: vec!["my_demo1::App1::poll".to_string(), "tick".to_string()],
            ..Default::default()
        };
        assert_eq!(
            resolve(&decl("my_demo1::secrets::Vault"), "open", &config),
            Some(Exclusion::UntracedUnit)
        );
        assert_eq!(
            resolve(&decl("my_demo1::App1"), "poll", &config),
            Some(Exclusion::UntracedMethod)
        );
        assert_eq!(resolve(&decl("my_demo1::App2"), "poll", &config), None);
        assert_eq!(
            resolve(&decl("my_demo2::App2"), "tick", &config),
            Some(Exclusion::UntracedMethod)
        );
    }
}
