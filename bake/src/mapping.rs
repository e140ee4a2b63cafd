//! Target schema for the ClickUp task import.
//!
//! The mapping is compiled in: each of the 22 target columns appears exactly
//! once, in output order, paired with the input column it is read from.
//! `None` means the column is always written blank.

/// Input column holding the lifecycle phase (possibly a bracketed list).
pub const PHASE_COLUMN: &str = "LC Phase";

/// Input column holding the release status.
pub const STATUS_COLUMN: &str = "Release Status";

/// Target column -> source column, in output order.
pub const COLUMN_MAPPING: &[(&str, Option<&str>)] = &[
    ("Task Name", Some("Activity")),
    ("Priority", None),
    ("ID", Some("ID")),
    ("Assignee", None),
    ("Responsible Resource", None),
    ("Start Date", None),
    ("Sprints", None),
    ("Due Date", None),
    ("Comment Count", None),
    ("Dependencies", None),
    ("Stream", Some("Stream")),
    ("SH Fundamental", Some("Fundamental?")),
    ("LC Phase", Some(PHASE_COLUMN)),
    ("Aimed Outcome", Some("Outcome")),
    ("Link to Deliverable", None),
    ("Topic", Some("Topic")),
    ("Topic NEW", Some("Topic_NEW")),
    ("Guidance", Some("Guidance")),
    ("Lists", None),
    ("Outcome old", None),
    ("Work Streams LAN", Some("Stream")),
    ("Description", Some("Description")),
];

/// Number of target columns.
pub const TARGET_WIDTH: usize = COLUMN_MAPPING.len();

/// Target header names in output order.
pub fn target_headers() -> impl Iterator<Item = &'static str> {
    COLUMN_MAPPING.iter().map(|(target, _)| *target)
}

/// Source column for a target column, if the target exists and is mapped.
pub fn source_for(target: &str) -> Option<&'static str> {
    COLUMN_MAPPING
        .iter()
        .find(|(t, _)| *t == target)
        .and_then(|(_, source)| *source)
}

/// Human-readable listing of the mapping, one target per line.
pub fn mapping_description() -> String {
    let width = target_headers().map(str::len).max().unwrap_or(0);
    COLUMN_MAPPING
        .iter()
        .enumerate()
        .map(|(i, (target, source))| {
            let source = source.map_or_else(|| "(blank)".to_string(), |s| format!("\"{}\"", s));
            format!("[{:2}] {:<width$} <- {}", i + 1, target, source, width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_twenty_two_unique_targets() {
        assert_eq!(TARGET_WIDTH, 22);
        let unique: HashSet<&str> = target_headers().collect();
        assert_eq!(unique.len(), TARGET_WIDTH);
    }

    #[test]
    fn test_header_order() {
        let headers: Vec<&str> = target_headers().collect();
        assert_eq!(headers.first(), Some(&"Task Name"));
        assert_eq!(headers[12], "LC Phase");
        assert_eq!(headers.last(), Some(&"Description"));
    }

    #[test]
    fn test_stream_feeds_two_targets() {
        assert_eq!(source_for("Stream"), Some("Stream"));
        assert_eq!(source_for("Work Streams LAN"), Some("Stream"));
    }

    #[test]
    fn test_blank_targets() {
        for target in ["Priority", "Assignee", "Start Date", "Lists", "Outcome old"] {
            assert_eq!(source_for(target), None, "{} should be blank", target);
        }
        assert_eq!(source_for("Not A Column"), None);
    }

    #[test]
    fn test_description_lists_every_target() {
        let description = mapping_description();
        assert_eq!(description.lines().count(), TARGET_WIDTH);
        assert!(description.contains("SH Fundamental"));
        assert!(description.contains("\"Fundamental?\""));
        assert!(description.contains("(blank)"));
    }
}
