//! Console and log-file diagnostic sink.
//!
//! One sink lives for the whole session and is told which document is
//! current before each file is processed, so every diagnostic line carries
//! the file it belongs to. When a log file is attached, messages go there
//! with a timestamp prefix; error-severity messages are echoed to stderr
//! as well so failures are visible without opening the log.

use std::cell::{Cell, RefCell};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use mnx_semantic::{DiagnosticSink, Severity};

use crate::PROGRAM_NAME;

pub struct ConsoleSink {
    quiet: bool,
    log: Option<RefCell<File>>,
    current_file: RefCell<String>,
    errors: Cell<usize>,
}

impl ConsoleSink {
    /// Sink that writes to stderr only.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            log: None,
            current_file: RefCell::new(String::new()),
            errors: Cell::new(0),
        }
    }

    /// Sink that tees to a log file, opened in append mode.
    ///
    /// Appending to an existing file inserts a blank separator line first;
    /// then the session start banner and the invoking command line are
    /// written.
    pub fn with_log_file(quiet: bool, path: &Path, command_line: &str) -> anyhow::Result<Self> {
        let appending = path.is_file();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let sink = Self {
            quiet,
            log: Some(RefCell::new(file)),
            current_file: RefCell::new(String::new()),
            errors: Cell::new(0),
        };
        if appending {
            sink.announce("");
        }
        sink.announce("======= START =======");
        sink.announce(&format!(
            "{PROGRAM_NAME} executed with the following arguments:"
        ));
        sink.announce(command_line);
        Ok(sink)
    }

    /// Whether any error-severity diagnostic was reported this session.
    pub fn error_occurred(&self) -> bool {
        self.errors.get() > 0
    }

    /// Announce the start of one document: a framed `Processing File`
    /// header, after which diagnostics are attributed to that file.
    pub fn begin_file(&self, path: &Path) {
        self.current_file.borrow_mut().clear();
        let header = format!("Processing File: {}", path.display());
        let delimiter = "=".repeat(header.chars().count());
        self.announce("");
        self.announce(&delimiter);
        self.announce(&header);
        self.announce(&delimiter);
        *self.current_file.borrow_mut() = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    /// Close the session: the end banner, written only when logging to a
    /// file.
    pub fn finish(&self) {
        if self.log.is_some() {
            self.current_file.borrow_mut().clear();
            self.announce("");
            self.announce(&format!("{PROGRAM_NAME} processing complete"));
            self.announce("======== END ========");
        }
    }

    /// A message that bypasses `--quiet`: session banners and file headers.
    fn announce(&self, message: &str) {
        self.emit(message, Severity::Info, true);
    }

    fn emit(&self, message: &str, severity: Severity, always_show: bool) {
        if !always_show && severity == Severity::Info && self.quiet {
            return;
        }
        if severity == Severity::Error {
            self.errors.set(self.errors.get() + 1);
        }
        let tag = match severity {
            Severity::Info => "",
            Severity::Warning => "[WARNING] ",
            Severity::Error => "[ERROR] ",
        };
        let current = self.current_file.borrow();
        let prefix = if current.is_empty() {
            String::new()
        } else {
            format!("{current} ")
        };
        if let Some(log) = &self.log {
            let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut log = log.borrow_mut();
            let _ = writeln!(log, "[{stamp}] {prefix}{tag}{message}");
            // Errors are echoed to stderr even when logging to a file.
            if severity != Severity::Error {
                return;
            }
        }
        eprintln!("{prefix}{tag}{message}");
    }
}

impl DiagnosticSink for ConsoleSink {
    fn report(&self, message: &str, severity: Severity) {
        self.emit(message, severity, false);
    }
}
