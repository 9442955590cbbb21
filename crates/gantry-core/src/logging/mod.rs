//! # Gantry Core Logging
//!
//! The orchestrator reports through a [`LogSink`] with three severities:
//! informational notices, warnings for non-fatal start failures and ignored
//! duplicate declarations, and errors for fatal resolve/construct/init
//! failures. [`LogFacadeSink`] forwards to the `log` facade; [`MemorySink`]
//! keeps everything in memory for inspection.
use std::fmt::{self, Debug};
use std::sync::{Mutex, PoisonError};

use crate::kernel::constants::LOG_TARGET;

/// Severity of a sink message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Destination for orchestrator notices.
pub trait LogSink: Debug + Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);

    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => self.info(message),
            Severity::Warning => self.warning(message),
            Severity::Error => self.error(message),
        }
    }
}

/// Sink that forwards to the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacadeSink;

impl LogSink for LogFacadeSink {
    fn info(&self, message: &str) {
        log::info!(target: LOG_TARGET, "{}", message);
    }

    fn warning(&self, message: &str) {
        log::warn!(target: LOG_TARGET, "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: LOG_TARGET, "{}", message);
    }
}

/// Sink that records every message, optionally forwarding to another sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(Severity, String)>>,
    forward: Option<LogFacadeSink>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and also forward to the `log` facade.
    pub fn forwarding() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            forward: Some(LogFacadeSink),
        }
    }

    fn record(&self, severity: Severity, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((severity, message.to_string()));
        if let Some(forward) = &self.forward {
            forward.log(severity, message);
        }
    }

    /// All recorded messages, oldest first.
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Recorded messages of one severity.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(recorded, _)| *recorded == severity)
            .map(|(_, message)| message)
            .collect()
    }

    /// Whether a message of `severity` containing `needle` was recorded.
    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.messages(severity).iter().any(|message| message.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn info(&self, message: &str) {
        self.record(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.record(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(Severity::Error, message);
    }
}
