//! # mnx-cli — command-line driver
//!
//! Resolves input arguments to a list of documents, decides the logging
//! destination, and runs the two validation stages over each document in
//! order: the JSON Schema stage first, then (unless `--schema-only`) the
//! semantic passes. Each document is validated start-to-finish before the
//! next begins; a fatal structural error aborts only the document that
//! raised it.

pub mod discover;
pub mod sink;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use mnx_model::Document;
use mnx_schema::{MnxSchema, SchemaError};
use mnx_semantic::{DiagnosticSink, Severity};

use crate::sink::ConsoleSink;

/// Program name used for log directories, file names, and banners.
pub const PROGRAM_NAME: &str = "mnx-validate";

/// Resolved command-line options.
#[derive(Debug, Default)]
pub struct Options {
    /// Input files, directories, or wildcard patterns.
    pub inputs: Vec<PathBuf>,
    /// Recursively search subdirectories of input directories.
    pub recursive: bool,
    /// Alternative schema document instead of the embedded one.
    pub schema: Option<PathBuf>,
    /// Skip the semantic passes.
    pub schema_only: bool,
    /// `--log` flag: outer `Some` when given, inner path when one was
    /// supplied with it.
    pub log: Option<Option<PathBuf>>,
    /// Force stderr output, overriding any other logging options.
    pub no_log: bool,
    /// Suppress info-severity messages.
    pub quiet: bool,
}

/// Run a validation session over every resolved input.
///
/// Returns the process exit code: 0 when no error-severity diagnostic was
/// emitted for any document, 1 otherwise. Operational failures (unreadable
/// schema, nonexistent input path) are returned as errors.
pub fn run(opts: &Options) -> Result<u8> {
    let schema = match &opts.schema {
        Some(path) => MnxSchema::from_path(path)
            .with_context(|| format!("failed to load schema from {}", path.display()))?,
        None => MnxSchema::embedded().context("failed to compile the embedded MNX schema")?,
    };

    let mut files = Vec::new();
    let mut multi_file_input = false;
    for pattern in &opts.inputs {
        multi_file_input |= pattern.is_dir() || discover::has_wildcard(pattern);
        files.extend(discover::collect_inputs(pattern, opts.recursive)?);
    }
    files.sort();
    files.dedup();
    multi_file_input |= files.len() > 1;

    tracing::debug!(count = files.len(), "resolved input files");

    let sink = match resolve_log_destination(opts, multi_file_input)? {
        Some(path) => ConsoleSink::with_log_file(opts.quiet, &path, &command_line())?,
        None => ConsoleSink::new(opts.quiet),
    };

    for file in &files {
        sink.begin_file(file);
        process_file(file, &schema, opts.schema_only, &sink);
    }
    sink.finish();

    Ok(if sink.error_occurred() { 1 } else { 0 })
}

/// Validate one document and deliver every outcome through the sink.
///
/// Never returns an error: unreadable files, parse failures, schema
/// violations, and fatal structural errors all become error-severity
/// diagnostics attributed to the current document, and processing
/// continues with the next input.
pub fn process_file(
    path: &Path,
    schema: &MnxSchema,
    schema_only: bool,
    sink: &dyn DiagnosticSink,
) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            sink.report(&format!("Unable to open JSON file: {e}"), Severity::Error);
            return;
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            sink.report(&format!("Parsing error: {e}"), Severity::Error);
            sink.report("is not valid against the MNX schema.", Severity::Error);
            return;
        }
    };

    match schema.validate(&value) {
        Ok(()) => sink.report("is valid against the MNX schema.", Severity::Info),
        Err(SchemaError::ValidationFailed { violations }) => {
            for violation in violations.violations() {
                sink.report(&violation.to_string(), Severity::Error);
            }
            sink.report("is not valid against the MNX schema.", Severity::Error);
            return;
        }
        Err(other) => {
            sink.report(&other.to_string(), Severity::Error);
            return;
        }
    }

    if schema_only {
        return;
    }

    let doc = Document::new(&value);
    if let Err(e) = mnx_semantic::validate(&doc, sink) {
        sink.report(&e.to_string(), Severity::Error);
    }
}

/// Decide where diagnostics go: a log file (explicitly requested, or the
/// default for multi-file runs) or stderr only.
fn resolve_log_destination(opts: &Options, multi_file_input: bool) -> Result<Option<PathBuf>> {
    if opts.no_log {
        return Ok(None);
    }
    let default_dir = || PathBuf::from(format!("{PROGRAM_NAME}-logs"));
    let requested = match &opts.log {
        Some(Some(path)) => Some(path.clone()),
        Some(None) => Some(default_dir()),
        None if multi_file_input => Some(default_dir()),
        None => None,
    };
    let Some(mut path) = requested else {
        return Ok(None);
    };
    // Relative log paths are relative to the top-level input location.
    if path.is_relative() {
        path = default_log_base(opts).join(path);
    }
    if create_directory_if_needed(&path)? {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        path.push(format!("{PROGRAM_NAME}-{stamp}.log"));
    }
    Ok(Some(path))
}

/// Directory that anchors relative log paths: the first input if it is a
/// directory, otherwise its parent.
fn default_log_base(opts: &Options) -> PathBuf {
    let Some(first) = opts.inputs.first() else {
        return PathBuf::from(".");
    };
    if first.is_dir() {
        return first.clone();
    }
    match first.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Create `path` as a directory when it denotes one.
///
/// Returns true when the path is a directory and a timestamped log-file
/// name should be appended; a path with an extension is treated as a
/// log-file path and only its parent directories are created.
fn create_directory_if_needed(path: &Path) -> Result<bool> {
    let exists = path.exists();
    if !exists {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    if path.is_dir() || (!exists && path.extension().is_none()) {
        std::fs::create_dir_all(path)?;
        return Ok(true);
    }
    Ok(false)
}

fn command_line() -> String {
    std::env::args().collect::<Vec<_>>().join(" ")
}
