use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracelog_core::instrument::TraceValue;
use tracelog_core::logging_facility::MemorySink;
use tracelog_core::LevelConfig;

/// Create an in-memory sink from level directives
#[allow(dead_code)]
pub fn memory_sink(directives: &str) -> Arc<MemorySink> {
    Arc::new(MemorySink::new(LevelConfig::parse(directives).unwrap()))
}

/// Trace value counting how often it gets rendered
#[allow(dead_code)]
#[derive(Default)]
pub struct RenderCounter {
    renders: AtomicUsize,
}

#[allow(dead_code)]
impl RenderCounter {
    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

impl TraceValue for RenderCounter {
    fn fmt_trace(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.renders.fetch_add(1, Ordering::SeqCst);
        f.write_str("counter")
    }
}

/// Failure type with an identity of its own
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingError {
    pub code: u32,
}

impl fmt::Display for GreetingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "greeting failed with code {}", self.code)
    }
}

impl std::error::Error for GreetingError {}
