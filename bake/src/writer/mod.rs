//! CSV output for the accepted and rejected tables.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::WriteResult;
use crate::mapping::target_headers;
use crate::transform::{OutputRecord, RejectedRow};

fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(out)
}

/// Write the target header followed by every output record.
pub fn write_accepted<W: Write>(out: W, records: &[OutputRecord]) -> WriteResult<()> {
    let mut wtr = csv_writer(out);

    wtr.write_record(target_headers())?;
    for record in records {
        wtr.write_record(record.values())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the input header followed by every rejected row.
pub fn write_rejected<W: Write>(out: W, headers: &[String], rows: &[RejectedRow]) -> WriteResult<()> {
    let mut wtr = csv_writer(out);

    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(&row.values)?;
    }

    wtr.flush()?;
    Ok(())
}

/// [`write_accepted`] to a new file, replacing any existing one.
pub fn write_accepted_file(path: &Path, records: &[OutputRecord]) -> WriteResult<()> {
    let file = File::create(path)?;
    write_accepted(BufWriter::new(file), records)
}

/// [`write_rejected`] to a new file, replacing any existing one.
pub fn write_rejected_file(path: &Path, headers: &[String], rows: &[RejectedRow]) -> WriteResult<()> {
    let file = File::create(path)?;
    write_rejected(BufWriter::new(file), headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Row, Table};
    use crate::transform::remap;

    fn output_records() -> Vec<OutputRecord> {
        let table = Table::new(
            vec!["Activity".into(), "Description".into()],
            vec![Row { line: 2, values: vec!["Plan, then build".into(), "say \"hi\"".into()] }],
        );
        let record = table.records().next().unwrap();
        vec![remap(&record, "Design"), remap(&record, "Build")]
    }

    #[test]
    fn test_accepted_header_and_quoting() {
        let mut buf = Vec::new();
        write_accepted(&mut buf, &output_records()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();

        assert!(lines[0].starts_with("Task Name,Priority,ID,Assignee,"));
        assert!(lines[0].ends_with("Work Streams LAN,Description"));
        assert!(lines[1].starts_with("\"Plan, then build\",,,"));
        assert!(lines[1].ends_with("\"say \"\"hi\"\"\""));
        assert!(lines[1].contains(",Design,"));
        assert!(lines[2].contains(",Build,"));
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_accepted_header_only() {
        let mut buf = Vec::new();
        write_accepted(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.matches("\r\n").count(), 1);
    }

    #[test]
    fn test_rejected_uses_input_header() {
        let headers = vec!["ID".to_string(), "Release Status".to_string()];
        let rows = vec![RejectedRow {
            line: 3,
            values: vec!["7".into(), "Draft".into()],
            status: "Draft".into(),
        }];

        let mut buf = Vec::new();
        write_rejected(&mut buf, &headers, &rows).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "ID,Release Status\r\n7,Draft\r\n");
    }
}
