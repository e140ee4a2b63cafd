//! End-to-end bake: read, filter, explode, remap, write.
//!
//! # Example
//!
//! ```rust,ignore
//! use clickup_bake::{run, Config, ConsoleLog};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let summary = run(&config, &ConsoleLog)?;
//!     println!("Wrote {} tasks", summary.records_written);
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::path::PathBuf;

use super::phases::resolve_phases;
use super::remap::{remap, OutputRecord};
use super::status::is_released;
use crate::config::{Config, EmptyPhasePolicy, ReleaseFilter};
use crate::error::BakeResult;
use crate::logs::{LogEntry, LogSink};
use crate::mapping::{PHASE_COLUMN, STATUS_COLUMN};
use crate::parser::{parse_csv_file, Table};
use crate::writer::{write_accepted_file, write_rejected_file};

/// Row-level behavior of a transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub release_filter: ReleaseFilter,
    pub empty_phase: EmptyPhasePolicy,
}

impl From<&Config> for TransformOptions {
    fn from(config: &Config) -> Self {
        Self {
            release_filter: config.release_filter,
            empty_phase: config.empty_phase,
        }
    }
}

/// A row turned away by the release filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based input line
    pub line: u64,
    /// Normalized values, aligned to the input header
    pub values: Vec<String>,
    /// The raw status that failed the check
    pub status: String,
}

/// Result of transforming a table
#[derive(Debug, Default)]
pub struct TransformResult {
    /// Output rows, in input order
    pub records: Vec<OutputRecord>,
    /// Rows excluded by the release filter, in input order
    pub rejected: Vec<RejectedRow>,
    /// Input rows seen
    pub rows_read: usize,
    /// Input rows that passed the filter
    pub rows_accepted: usize,
}

impl TransformResult {
    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!(
            "Read {} rows: {} accepted, {} rejected, {} tasks",
            self.rows_read,
            self.rows_accepted,
            self.rejected.len(),
            self.records.len()
        )
    }
}

/// Transform every row of a parsed table.
///
/// Each row is either rejected by the release filter or exploded into one
/// output record per phase. The decision for every row is logged with its
/// input line.
pub fn transform_table(
    table: &Table,
    options: &TransformOptions,
    log: &dyn LogSink,
) -> TransformResult {
    let mut result = TransformResult::default();

    for record in table.records() {
        result.rows_read += 1;
        let line = record.line();

        if options.release_filter.is_filtering() {
            let status = record.get_or_empty(STATUS_COLUMN);
            if !is_released(status) {
                log.log(
                    LogEntry::warning(format!("skipped: {} '{}' is not released", STATUS_COLUMN, status))
                        .with_indent(1)
                        .with_row(line),
                );
                result.rejected.push(RejectedRow {
                    line,
                    values: record.aligned_values().into_iter().map(str::to_string).collect(),
                    status: status.to_string(),
                });
                continue;
            }
        }

        result.rows_accepted += 1;
        let phases = resolve_phases(record.get_or_empty(PHASE_COLUMN), options.empty_phase);

        let message = if phases.is_empty() {
            format!("no {} value, no tasks written", PHASE_COLUMN)
        } else {
            format!("{} task(s): {}", phases.len(), phases.join(" | "))
        };
        log.log(LogEntry::info(message).with_indent(1).with_row(line));

        result
            .records
            .extend(phases.iter().map(|phase| remap(&record, phase)));
    }

    result
}

/// What a run did, as written by `--summary`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub source: PathBuf,
    pub dest: PathBuf,
    /// Only set when the release filter is active
    pub skipped: Option<PathBuf>,
    pub encoding: String,
    pub rows_read: usize,
    pub rows_accepted: usize,
    pub rows_rejected: usize,
    pub records_written: usize,
    pub release_filter: ReleaseFilter,
    pub empty_phase: EmptyPhasePolicy,
}

/// Run a full bake.
///
/// The input is read and transformed before any output file is created.
/// The rejected table is written only when the release filter is active.
pub fn run(config: &Config, log: &dyn LogSink) -> BakeResult<RunSummary> {
    log.log(LogEntry::info(format!("📖 Reading {}", config.source_csv.display())));
    let table = parse_csv_file(&config.source_csv, config.delimiter)?;
    log.log(LogEntry::success(format!("Detected encoding: {}", table.encoding)));
    log.log(LogEntry::success(format!(
        "Read {} rows, {} columns",
        table.rows.len(),
        table.headers.len()
    )));

    let mut expected = vec![PHASE_COLUMN];
    if config.release_filter.is_filtering() {
        expected.push(STATUS_COLUMN);
    }
    for column in expected {
        if !table.headers.iter().any(|h| h == column) {
            log.log(LogEntry::warning(format!("Input has no '{}' column", column)));
        }
    }

    log.log(LogEntry::info(format!(
        "⚙️  Transforming (release filter: {}, empty phase: {})",
        config.release_filter, config.empty_phase
    )));
    let options = TransformOptions::from(config);
    let result = transform_table(&table, &options, log);
    log.log(LogEntry::success(result.summary()));

    write_accepted_file(&config.dest_csv, &result.records)?;
    log.log(LogEntry::success(format!(
        "Output written to '{}'",
        config.dest_csv.display()
    )));

    let skipped = if config.release_filter.is_filtering() {
        write_rejected_file(&config.skipped_csv, &table.headers, &result.rejected)?;
        log.log(LogEntry::success(format!(
            "Skipped rows written to '{}'",
            config.skipped_csv.display()
        )));
        Some(config.skipped_csv.clone())
    } else {
        None
    };

    Ok(RunSummary {
        source: config.source_csv.clone(),
        dest: config.dest_csv.clone(),
        skipped,
        encoding: table.encoding,
        rows_read: result.rows_read,
        rows_accepted: result.rows_accepted,
        rows_rejected: result.rejected.len(),
        records_written: result.records.len(),
        release_filter: config.release_filter,
        empty_phase: config.empty_phase,
    })
}
