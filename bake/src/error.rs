//! Error types for the bake pipeline.
//!
//! - [`ConfigError`] - invalid configuration values
//! - [`CsvError`] - reading and decoding the input table
//! - [`WriteError`] - writing the output tables
//! - [`BakeError`] - top-level run errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building a [`crate::config::Config`].
///
/// These are always raised before any file is opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `RELEASE_FILTER` is neither `released` nor `all`.
    #[error("Invalid RELEASE_FILTER '{0}': expected 'released' or 'all'")]
    InvalidReleaseFilter(String),

    /// `EMPTY_PHASE` is neither `blank` nor `skip`.
    #[error("Invalid EMPTY_PHASE '{0}': expected 'blank' or 'skip'")]
    InvalidEmptyPhase(String),

    /// `CSV_DELIMITER` is not a single ASCII character, `tab` or `auto`.
    #[error("Invalid CSV_DELIMITER '{0}': expected a single character, 'tab' or 'auto'")]
    InvalidDelimiter(String),
}

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading the input table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed CSV.
    #[error("Invalid CSV format: {0}")]
    ParseError(#[from] csv::Error),

    /// The content could not be decoded to text.
    #[error("Failed to decode input: {0}")]
    EncodingError(String),

    /// No header row.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// CSV Writing Errors
// =============================================================================

/// Errors while writing the accepted or rejected table.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create or flush the file.
    #[error("Failed to write file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to encode a record.
    #[error("Failed to write CSV record: {0}")]
    CsvError(#[from] csv::Error),
}

// =============================================================================
// Run Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum BakeError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Output error.
    #[error("Output error: {0}")]
    Write(#[from] WriteError),

    /// Summary serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Summary file error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for reading the input table.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for writing output tables.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for a full run.
pub type BakeResult<T> = Result<T, BakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // ConfigError -> BakeError
        let config_err = ConfigError::InvalidReleaseFilter("archived".into());
        let bake_err: BakeError = config_err.into();
        assert!(bake_err.to_string().contains("archived"));

        // CsvError -> BakeError
        let bake_err: BakeError = CsvError::NoHeaders.into();
        assert!(bake_err.to_string().contains("No headers"));
    }

    #[test]
    fn test_config_error_names_raw_value() {
        let err = ConfigError::InvalidEmptyPhase(" Maybe ".into());
        assert!(err.to_string().contains("' Maybe '"));
    }
}
