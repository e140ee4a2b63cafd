//! # clickup-bake - reshape activity exports for ClickUp import
//!
//! Reads an activity CSV export, maps its columns onto the fixed 22-column
//! ClickUp task layout, writes one task per `LC Phase` value and optionally
//! keeps only released rows.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐     ┌────────────────────┐
//! │ source.csv  │────▶│   Parser    │────▶│    Transform     │────▶│ clickup_ready.csv  │
//! │ (BOM/UTF8)  │     │ (normalize) │     │ filter + explode │     │ skipped_rows.csv   │
//! └─────────────┘     └─────────────┘     └──────────────────┘     └────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use clickup_bake::{run, Config, ConsoleLog};
//!
//! let config = Config::from_env()?;
//! let summary = run(&config, &ConsoleLog)?;
//! println!("Wrote {} tasks", summary.records_written);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Run configuration
//! - [`mapping`] - Target schema and column mapping
//! - [`parser`] - CSV input
//! - [`transform`] - Filter, phase explosion, remap and pipeline
//! - [`writer`] - CSV output
//! - [`logs`] - Log entries and sinks

pub mod config;
pub mod error;
pub mod logs;
pub mod mapping;
pub mod parser;
pub mod transform;
pub mod writer;

// =============================================================================
// Re-exports - Errors and configuration
// =============================================================================

pub use config::{Config, Delimiter, EmptyPhasePolicy, ReleaseFilter};
pub use error::{BakeError, ConfigError, CsvError, WriteError};

// =============================================================================
// Re-exports - Schema
// =============================================================================

pub use mapping::{mapping_description, target_headers, COLUMN_MAPPING, PHASE_COLUMN, STATUS_COLUMN};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{detect_delimiter, normalize_field, parse_bytes, parse_csv_file, Record, Table};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    explode_phases, is_released, parse_list, remap, run, transform_table, OutputRecord,
    RejectedRow, RunSummary, TransformOptions, TransformResult,
};

// =============================================================================
// Re-exports - Logging
// =============================================================================

pub use logs::{ConsoleLog, JsonLog, LogEntry, LogLevel, LogSink, MemoryLog, NullLog};
