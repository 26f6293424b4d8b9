//! Alert levels and the injectable log sink used across a verification run.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Severity of a logged message, ordered lowest to highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Verbose,
    #[default]
    Normal,
    Passed,
    Warning,
    Failed,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Verbose => "verbose",
            AlertLevel::Normal => "normal",
            AlertLevel::Passed => "passed",
            AlertLevel::Warning => "warning",
            AlertLevel::Failed => "failed",
        }
    }

    /// Verdict used in report file names.
    pub fn verdict(&self) -> &'static str {
        match self {
            AlertLevel::Failed => "FAILED",
            AlertLevel::Warning => "WARNING",
            AlertLevel::Passed => "PASSED",
            _ => "UNKNOWN",
        }
    }
}

/// Receiver for live log lines.
pub trait AlertSink {
    fn record(&self, message: &str, level: AlertLevel);
}

pub struct ConsoleSink;

impl AlertSink for ConsoleSink {
    fn record(&self, message: &str, level: AlertLevel) {
        match level {
            AlertLevel::Failed => eprintln!("[FAIL] {message}"),
            AlertLevel::Warning => eprintln!("[WARN] {message}"),
            AlertLevel::Passed => println!("[ OK ] {message}"),
            AlertLevel::Normal => println!("{message}"),
            AlertLevel::Verbose => {}
        }
    }
}

/// Sink that drops everything.
pub struct NullSink;

impl AlertSink for NullSink {
    fn record(&self, _message: &str, _level: AlertLevel) {}
}

/// Per-run severity tracker and report-line collector. The error lock is set
/// for every concrete discrepancy; ending locked but below `Failed` is an
/// internal inconsistency.
pub struct Logger<'a> {
    sink: &'a dyn AlertSink,
    level: AlertLevel,
    report_lines: Vec<String>,
    error_locked: bool,
}

impl<'a> Logger<'a> {
    pub fn new(sink: &'a dyn AlertSink) -> Self {
        Self {
            sink,
            level: AlertLevel::Normal,
            report_lines: Vec::new(),
            error_locked: false,
        }
    }

    pub fn record(&mut self, message: impl AsRef<str>, level: AlertLevel) {
        self.raise(level);
        self.sink.record(message.as_ref(), level);
    }

    /// Like `record`, but the line is kept for the report file.
    pub fn report(&mut self, message: impl Into<String>, level: AlertLevel) {
        let message = message.into();
        self.raise(level);
        self.sink.record(&message, level);
        self.report_lines.push(message);
    }

    pub fn lock_error(&mut self) {
        self.error_locked = true;
    }

    pub fn level(&self) -> AlertLevel {
        self.level
    }

    pub fn error_locked(&self) -> bool {
        self.error_locked
    }

    pub fn report_lines(&self) -> &[String] {
        &self.report_lines
    }

    pub fn check_consistency(&self) -> Result<()> {
        if self.error_locked && self.level < AlertLevel::Failed {
            anyhow::bail!(
                "internal consistency fault: error lock is set but the alert level is {}",
                self.level.as_str()
            );
        }
        Ok(())
    }

    fn raise(&mut self, level: AlertLevel) {
        if level > self.level {
            self.level = level;
        }
    }
}
