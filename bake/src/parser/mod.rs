//! CSV input with encoding and delimiter handling.
//!
//! Reads the whole input, strips a byte-order marker, decodes to text and
//! splits it into a header plus rows with the `csv` crate. Every header name
//! and field value is normalized (whitespace, then surrounding double quotes
//! stripped) on the way in. No ClickUp-specific logic here.

use encoding_rs::Encoding;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

use crate::config::Delimiter;
use crate::error::{CsvError, CsvResult};

/// Strip surrounding whitespace, then surrounding double quotes.
pub fn normalize_field(raw: &str) -> &str {
    raw.trim().trim_matches('"')
}

/// One data row, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line of the row in the input file.
    pub line: u64,
    /// Normalized values, positionally aligned with the header.
    /// May be shorter or longer than the header.
    pub values: Vec<String>,
}

/// A parsed input table with metadata
#[derive(Debug, Clone)]
pub struct Table {
    /// Normalized column headers, in input order
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<Row>,
    /// Detected or used encoding
    pub encoding: String,
    /// Used delimiter
    pub delimiter: u8,
    /// Header name -> position (last occurrence wins)
    index: HashMap<String, usize>,
}

impl Table {
    /// Build a table from already-normalized headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self {
            headers,
            rows,
            encoding: "utf-8".to_string(),
            delimiter: b',',
            index,
        }
    }

    /// Iterate rows as name-addressable records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |row| Record { table: self, row })
    }

    /// Rows as JSON objects keyed by header.
    pub fn to_json(&self) -> Vec<Value> {
        self.records()
            .map(|record| {
                let obj: Map<String, Value> = self
                    .headers
                    .iter()
                    .zip(record.aligned_values())
                    .map(|(h, v)| (h.clone(), Value::String(v.to_string())))
                    .collect();
                Value::Object(obj)
            })
            .collect()
    }
}

/// A borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a Table,
    row: &'a Row,
}

impl<'a> Record<'a> {
    /// 1-based input line.
    pub fn line(&self) -> u64 {
        self.row.line
    }

    /// Value of a column, `None` if the header lacks it or the row is short.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = *self.table.index.get(column)?;
        self.row.values.get(idx).map(String::as_str)
    }

    /// Value of a column, empty when missing.
    pub fn get_or_empty(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or("")
    }

    /// Values padded or truncated to the header width.
    pub fn aligned_values(&self) -> Vec<&'a str> {
        (0..self.table.headers.len())
            .map(|i| self.row.values.get(i).map_or("", String::as_str))
            .collect()
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to text.
///
/// A byte-order marker decides the encoding and is dropped. Otherwise valid
/// UTF-8 is taken as is, and anything else goes through chardet.
pub fn decode_content(bytes: &[u8]) -> CsvResult<(String, String)> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            return Err(CsvError::EncodingError(format!(
                "invalid {} after byte-order marker",
                encoding.name()
            )));
        }
        return Ok((text.into_owned(), encoding.name().to_lowercase()));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok((text.to_string(), "utf-8".to_string()));
    }

    // Not UTF-8, so a UTF-8 guess is wrong; UTF-16 guesses would garble the
    // ASCII delimiters.
    let label = detect_encoding(bytes);
    let encoding = Encoding::for_label(label.as_bytes())
        .filter(|e| e.is_ascii_compatible() && e.name() != "UTF-8")
        .unwrap_or(encoding_rs::WINDOWS_1252);
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    Ok((text.into_owned(), encoding.name().to_lowercase()))
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [b';', b',', b'\t', b'|'];
    let mut best_sep = b',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.bytes().filter(|b| *b == sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse decoded CSV text.
///
/// Empty lines are skipped by the reader; a line of empty fields is a row.
pub fn parse_str(content: &str, delimiter: u8) -> CsvResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header_record = records.next().ok_or(CsvError::NoHeaders)??;
    let headers: Vec<String> = header_record
        .iter()
        .map(|h| normalize_field(h).to_string())
        .collect();

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        let values: Vec<String> = record
            .iter()
            .map(|v| normalize_field(v).to_string())
            .collect();

        let line = record.position().map_or(0, csv::Position::line);
        rows.push(Row { line, values });
    }

    let mut table = Table::new(headers, rows);
    table.delimiter = delimiter;
    Ok(table)
}

/// Parse raw bytes, decoding and resolving the delimiter.
pub fn parse_bytes(bytes: &[u8], delimiter: Delimiter) -> CsvResult<Table> {
    let (content, encoding) = decode_content(bytes)?;

    let delimiter = match delimiter {
        Delimiter::Fixed(d) => d,
        Delimiter::Auto => detect_delimiter(&content),
    };

    let mut table = parse_str(&content, delimiter)?;
    table.encoding = encoding;
    Ok(table)
}

/// Parse a CSV file.
///
/// # Example
/// ```ignore
/// let table = parse_csv_file("source.csv", Delimiter::Auto)?;
/// println!("Encoding: {}, Delimiter: '{}'", table.encoding, table.delimiter as char);
/// println!("Rows: {}", table.rows.len());
/// ```
pub fn parse_csv_file<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> CsvResult<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, delimiter)
}
