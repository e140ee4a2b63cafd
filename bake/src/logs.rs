//! Run logging.
//!
//! The pipeline reports progress and per-row decisions as [`LogEntry`]
//! values through an injected [`LogSink`]. The CLI picks a console or JSON
//! sink; tests collect entries with [`MemoryLog`].

use serde::Serialize;
use std::cell::RefCell;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    pub indent: u8,
    /// Input line the entry is about, for per-row decisions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u64>,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), indent: 0, row: None }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_row(mut self, row: u64) -> Self {
        self.row = Some(row);
        self
    }
}

/// Destination for log entries.
pub trait LogSink {
    fn log(&self, entry: LogEntry);
}

/// Human-readable lines on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLog;

impl LogSink for ConsoleLog {
    fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
        };
        let indent = "   ".repeat(entry.indent as usize);
        match entry.row {
            Some(row) => eprintln!("{}{} [row {}] {}", indent, prefix, row, entry.message),
            None => eprintln!("{}{} {}", indent, prefix, entry.message),
        }
    }
}

/// One JSON object per line on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLog;

impl LogSink for JsonLog {
    fn log(&self, entry: LogEntry) {
        if let Ok(line) = serde_json::to_string(&entry) {
            eprintln!("{}", line);
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl LogSink for NullLog {
    fn log(&self, _entry: LogEntry) {}
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the entries logged so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Entries about a given input line.
    pub fn for_row(&self, row: u64) -> Vec<LogEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.row == Some(row))
            .cloned()
            .collect()
    }
}

impl LogSink for MemoryLog {
    fn log(&self, entry: LogEntry) {
        self.entries.borrow_mut().push(entry);
    }
}
