//! Map one input record onto the target schema.

use crate::mapping::{COLUMN_MAPPING, PHASE_COLUMN};
use crate::parser::Record;

/// One row of the target schema, values in [`COLUMN_MAPPING`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    values: Vec<String>,
}

impl OutputRecord {
    /// Values in target header order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value of a target column by name.
    pub fn get(&self, target: &str) -> Option<&str> {
        COLUMN_MAPPING
            .iter()
            .position(|(t, _)| *t == target)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// `(target, value)` pairs in target header order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        COLUMN_MAPPING
            .iter()
            .zip(&self.values)
            .map(|((target, _), value)| (*target, value.as_str()))
    }
}

/// Build the output row for one phase of a record.
///
/// The phase column takes `phase`; other mapped columns copy the record's
/// trimmed value (empty when absent); unmapped columns are blank.
pub fn remap(record: &Record<'_>, phase: &str) -> OutputRecord {
    let values = COLUMN_MAPPING
        .iter()
        .map(|(_, source)| match source {
            Some(src) if *src == PHASE_COLUMN => phase.to_string(),
            Some(src) => record.get_or_empty(src).trim().to_string(),
            None => String::new(),
        })
        .collect();

    OutputRecord { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{target_headers, TARGET_WIDTH};
    use crate::parser::{Row, Table};

    fn table(headers: &[&str], values: &[&str]) -> Table {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            vec![Row {
                line: 2,
                values: values.iter().map(|v| v.to_string()).collect(),
            }],
        )
    }

    #[test]
    fn test_full_row() {
        let table = table(
            &["Activity", "ID", "Stream", "Fundamental?", "LC Phase", "Outcome",
              "Topic", "Topic_NEW", "Guidance", "Description", "Release Status"],
            &["Write docs", "A-1", "Platform", "Yes", "[\"Design\"]", "Docs live",
              "Docs", "Documentation", "See wiki", "All the docs", "Released"],
        );
        let record = table.records().next().unwrap();
        let out = remap(&record, "Design");

        assert_eq!(out.values().len(), TARGET_WIDTH);
        assert_eq!(out.get("Task Name"), Some("Write docs"));
        assert_eq!(out.get("ID"), Some("A-1"));
        assert_eq!(out.get("SH Fundamental"), Some("Yes"));
        assert_eq!(out.get("LC Phase"), Some("Design"));
        assert_eq!(out.get("Aimed Outcome"), Some("Docs live"));
        assert_eq!(out.get("Topic NEW"), Some("Documentation"));
        assert_eq!(out.get("Description"), Some("All the docs"));
    }

    #[test]
    fn test_stream_duplicated() {
        let table = table(&["Stream"], &["Platform"]);
        let out = remap(&table.records().next().unwrap(), "");
        assert_eq!(out.get("Stream"), Some("Platform"));
        assert_eq!(out.get("Work Streams LAN"), Some("Platform"));
    }

    #[test]
    fn test_unmapped_and_missing_are_blank() {
        // Unmapped input columns never leak, mapped but absent ones are empty
        let table = table(&["Priority", "Assignee"], &["High", "sam"]);
        let out = remap(&table.records().next().unwrap(), "Build");

        assert_eq!(out.get("Priority"), Some(""));
        assert_eq!(out.get("Assignee"), Some(""));
        assert_eq!(out.get("Task Name"), Some(""));
        assert_eq!(out.get("LC Phase"), Some("Build"));
    }

    #[test]
    fn test_values_trimmed() {
        // as left by normalize_field on `" \"  Plan  \" "`
        let table = table(&["Activity"], &["  Plan  "]);
        let record = table.records().next().unwrap();
        assert_eq!(remap(&record, "").get("Task Name"), Some("Plan"));
    }

    #[test]
    fn test_iter_follows_header_order() {
        let table = table(&["ID"], &["7"]);
        let out = remap(&table.records().next().unwrap(), "");
        let targets: Vec<&str> = out.iter().map(|(t, _)| t).collect();
        assert_eq!(targets, target_headers().collect::<Vec<_>>());
    }
}
