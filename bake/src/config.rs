//! Run configuration.
//!
//! A [`Config`] is built once at startup from a key lookup (the process
//! environment, optionally overlaid with CLI flags) and passed by value into
//! [`crate::transform::pipeline::run`]. Nothing below this module reads the
//! environment.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};

/// Environment key for the input path.
pub const SOURCE_CSV_KEY: &str = "SOURCE_CSV";
/// Environment key for the accepted output path.
pub const DEST_CSV_KEY: &str = "DEST_CSV";
/// Environment key for the rejected output path.
pub const SKIPPED_CSV_KEY: &str = "SKIPPED_CSV";
/// Environment key for the release filter.
pub const RELEASE_FILTER_KEY: &str = "RELEASE_FILTER";
/// Environment key for the empty-phase policy.
pub const EMPTY_PHASE_KEY: &str = "EMPTY_PHASE";
/// Environment key for the input delimiter.
pub const CSV_DELIMITER_KEY: &str = "CSV_DELIMITER";

const DEFAULT_SOURCE_CSV: &str = "source.csv";
const DEFAULT_DEST_CSV: &str = "clickup_ready.csv";
const DEFAULT_SKIPPED_CSV: &str = "skipped_rows.csv";

// =============================================================================
// Release filter
// =============================================================================

/// Which rows are expanded into the accepted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseFilter {
    /// Only rows whose `Release Status` is released; the rest are rejected.
    Released,
    /// Every row.
    #[default]
    All,
}

impl ReleaseFilter {
    /// Whether rows can be rejected, and so a rejected sink is needed.
    pub fn is_filtering(self) -> bool {
        matches!(self, ReleaseFilter::Released)
    }
}

impl FromStr for ReleaseFilter {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "released" => Ok(ReleaseFilter::Released),
            "all" => Ok(ReleaseFilter::All),
            _ => Err(ConfigError::InvalidReleaseFilter(raw.to_string())),
        }
    }
}

impl fmt::Display for ReleaseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseFilter::Released => write!(f, "released"),
            ReleaseFilter::All => write!(f, "all"),
        }
    }
}

// =============================================================================
// Empty phase policy
// =============================================================================

/// What to emit when a row's `LC Phase` holds no tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyPhasePolicy {
    /// One output row with an empty `LC Phase`.
    #[default]
    Blank,
    /// No output rows.
    Skip,
}

impl FromStr for EmptyPhasePolicy {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "blank" => Ok(EmptyPhasePolicy::Blank),
            "skip" => Ok(EmptyPhasePolicy::Skip),
            _ => Err(ConfigError::InvalidEmptyPhase(raw.to_string())),
        }
    }
}

impl fmt::Display for EmptyPhasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyPhasePolicy::Blank => write!(f, "blank"),
            EmptyPhasePolicy::Skip => write!(f, "skip"),
        }
    }
}

// =============================================================================
// Delimiter
// =============================================================================

/// Field delimiter of the input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// A fixed single-byte delimiter.
    Fixed(u8),
    /// Pick from the first line (see [`crate::parser::detect_delimiter`]).
    Auto,
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Fixed(b',')
    }
}

impl FromStr for Delimiter {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // A bare space or tab is itself the delimiter; otherwise padding goes.
        let value = match raw.trim() {
            "" => raw.trim_matches(|c: char| c == '\r' || c == '\n'),
            trimmed => trimmed,
        };
        match value.to_lowercase().as_str() {
            "auto" => return Ok(Delimiter::Auto),
            "tab" | "\\t" | "\t" => return Ok(Delimiter::Fixed(b'\t')),
            _ => {}
        }

        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() && c != '"' => Ok(Delimiter::Fixed(c as u8)),
            _ => Err(ConfigError::InvalidDelimiter(raw.to_string())),
        }
    }
}

// =============================================================================
// Config
// =============================================================================

/// Everything a run needs, resolved and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source_csv: PathBuf,
    pub dest_csv: PathBuf,
    pub skipped_csv: PathBuf,
    pub release_filter: ReleaseFilter,
    pub empty_phase: EmptyPhasePolicy,
    pub delimiter: Delimiter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_csv: PathBuf::from(DEFAULT_SOURCE_CSV),
            dest_csv: PathBuf::from(DEFAULT_DEST_CSV),
            skipped_csv: PathBuf::from(DEFAULT_SKIPPED_CSV),
            release_filter: ReleaseFilter::default(),
            empty_phase: EmptyPhasePolicy::default(),
            delimiter: Delimiter::default(),
        }
    }
}

impl Config {
    /// Build from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys take their defaults;
    /// set keys are validated and the first invalid one is reported.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(SOURCE_CSV_KEY) {
            config.source_csv = PathBuf::from(path);
        }
        if let Some(path) = lookup(DEST_CSV_KEY) {
            config.dest_csv = PathBuf::from(path);
        }
        if let Some(path) = lookup(SKIPPED_CSV_KEY) {
            config.skipped_csv = PathBuf::from(path);
        }
        if let Some(raw) = lookup(RELEASE_FILTER_KEY) {
            config.release_filter = raw.parse()?;
        }
        if let Some(raw) = lookup(EMPTY_PHASE_KEY) {
            config.empty_phase = raw.parse()?;
        }
        if let Some(raw) = lookup(CSV_DELIMITER_KEY) {
            config.delimiter = raw.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.source_csv, PathBuf::from("source.csv"));
        assert_eq!(config.dest_csv, PathBuf::from("clickup_ready.csv"));
        assert_eq!(config.skipped_csv, PathBuf::from("skipped_rows.csv"));
        assert_eq!(config.release_filter, ReleaseFilter::All);
        assert_eq!(config.empty_phase, EmptyPhasePolicy::Blank);
        assert_eq!(config.delimiter, Delimiter::Fixed(b','));
    }

    #[test]
    fn test_release_filter_case_and_whitespace() {
        let config = Config::from_lookup(lookup_from(&[("RELEASE_FILTER", "  ReLeAsEd \n")])).unwrap();
        assert_eq!(config.release_filter, ReleaseFilter::Released);
        assert!(config.release_filter.is_filtering());
        assert!(!ReleaseFilter::All.is_filtering());
    }

    #[test]
    fn test_invalid_release_filter_names_value() {
        let err = Config::from_lookup(lookup_from(&[("RELEASE_FILTER", "archived")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidReleaseFilter("archived".into()));
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn test_empty_release_filter_is_invalid() {
        let err = Config::from_lookup(lookup_from(&[("RELEASE_FILTER", "")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidReleaseFilter(String::new()));
    }

    #[test]
    fn test_paths_and_policy() {
        let config = Config::from_lookup(lookup_from(&[
            ("SOURCE_CSV", "in/export.csv"),
            ("DEST_CSV", "out/ready.csv"),
            ("SKIPPED_CSV", "out/skipped.csv"),
            ("EMPTY_PHASE", "Skip"),
        ]))
        .unwrap();
        assert_eq!(config.source_csv, PathBuf::from("in/export.csv"));
        assert_eq!(config.dest_csv, PathBuf::from("out/ready.csv"));
        assert_eq!(config.skipped_csv, PathBuf::from("out/skipped.csv"));
        assert_eq!(config.empty_phase, EmptyPhasePolicy::Skip);
    }

    #[test]
    fn test_invalid_empty_phase() {
        let err = Config::from_lookup(lookup_from(&[("EMPTY_PHASE", "none")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidEmptyPhase("none".into()));
    }

    #[test]
    fn test_delimiter_values() {
        assert_eq!("auto".parse::<Delimiter>().unwrap(), Delimiter::Auto);
        assert_eq!("TAB".parse::<Delimiter>().unwrap(), Delimiter::Fixed(b'\t'));
        assert_eq!(";".parse::<Delimiter>().unwrap(), Delimiter::Fixed(b';'));
        assert_eq!(" ; ".parse::<Delimiter>().unwrap(), Delimiter::Fixed(b';'));
        assert_eq!(" Auto\n".parse::<Delimiter>().unwrap(), Delimiter::Auto);
        assert_eq!(" ".parse::<Delimiter>().unwrap(), Delimiter::Fixed(b' '));
        assert_eq!("\t".parse::<Delimiter>().unwrap(), Delimiter::Fixed(b'\t'));
        assert!(";;".parse::<Delimiter>().is_err());
        assert!(" ; , ".parse::<Delimiter>().is_err());
        assert!("\"".parse::<Delimiter>().is_err());
        assert!("".parse::<Delimiter>().is_err());
    }
}
