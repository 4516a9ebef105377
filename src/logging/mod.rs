//! Logging collaborator boundary.
//!
//! The dispatcher reports per-message failures through a [`LogSink`] it is
//! handed at construction. [`TracingLogSink`] routes entries to the
//! `tracing` subscriber; tests usually swap in
//! [`crate::mocks::MockLogSink`].

use std::fmt;

use crate::errors::DispatchError;

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl Severity {
    /// Returns the level name.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Sink for failure diagnostics, supplied by the environment.
///
/// Invoked from concurrent workers, so implementations must be
/// `Send + Sync` and must not block for long.
pub trait LogSink: Send + Sync + fmt::Debug {
    /// Records one entry with full error detail.
    fn log(&self, severity: Severity, message: &str, error: &DispatchError);
}

/// [`LogSink`] implementation backed by the `tracing` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl TracingLogSink {
    /// Creates a new tracing-backed sink.
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingLogSink {
    fn log(&self, severity: Severity, message: &str, error: &DispatchError) {
        match severity {
            Severity::Debug => tracing::debug!(error = %error, "{message}"),
            Severity::Info => tracing::info!(error = %error, "{message}"),
            Severity::Warn => tracing::warn!(error = %error, "{message}"),
            Severity::Error => tracing::error!(error = %error, "{message}"),
        }
    }
}
