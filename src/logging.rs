//! Diagnostics collaborator injected into the ledger components.

use std::sync::{Arc, Mutex};

/// Sink for the informational, warning, and error messages emitted by the core.
pub trait Diagnostics: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

pub type SharedDiagnostics = Arc<dyn Diagnostics>;

/// Forwards diagnostics to the `tracing` subscriber installed by [`crate::init`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn info(&self, message: &str) {
        tracing::info!(target: "expense_ledger", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "expense_ledger", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "expense_ledger", "{message}");
    }
}

pub fn tracing_diagnostics() -> SharedDiagnostics {
    Arc::new(TracingDiagnostics)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Keeps every message in memory. Used by tests to assert on emitted diagnostics.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<(Level, String)>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(entry_level, _)| *entry_level == level)
            .map(|(_, message)| message)
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push((level, message.to_string()));
        }
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}
