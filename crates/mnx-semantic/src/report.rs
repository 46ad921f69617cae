//! The diagnostic-sink contract and an in-memory sink.
//!
//! The pipeline never swallows a violation: every non-fatal finding
//! produces exactly one diagnostic, delivered to the sink the caller
//! supplies. The sink decides display and aggregation; the pipeline only
//! decides severity.

use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity.
///
/// Any error-severity diagnostic marks the document's overall result as
/// failed; info and warning do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// Where diagnostics go.
///
/// The pipeline calls this once per violation and once per pass summary.
/// Which document is "current" is communicated to the sink out of band,
/// before the run starts.
pub trait DiagnosticSink {
    fn report(&self, message: &str, severity: Severity);
}

/// One recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Sink that records diagnostics in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|d| d.message.clone())
            .collect()
    }

    pub fn has_error(&self) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, message: &str, severity: Severity) {
        self.entries.borrow_mut().push(Diagnostic {
            severity,
            message: message.to_string(),
        });
    }
}

/// Pass-local emitter: forwards to the sink and counts error-severity
/// diagnostics so the pipeline can produce its boolean verdict.
pub(crate) struct Emitter<'a> {
    sink: &'a dyn DiagnosticSink,
    errors: usize,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self { sink, errors: 0 }
    }

    pub(crate) fn info(&mut self, message: &str) {
        self.sink.report(message, Severity::Info);
    }

    pub(crate) fn warning(&mut self, message: &str) {
        self.sink.report(message, Severity::Warning);
    }

    pub(crate) fn error(&mut self, message: &str) {
        self.errors += 1;
        self.sink.report(message, Severity::Error);
    }

    pub(crate) fn error_count(&self) -> usize {
        self.errors
    }
}
