use std::path::Path;

use thiserror::Error;

use crate::core::sample::SampleRecord;
use crate::utils::validation::check_sample_limit;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid CSV: {0}")]
    InvalidFormat(String),

    #[error("Too many samples in file (limit reached after {0} rows)")]
    TooManySamples(usize),
}

/// Outcome of ingesting one CSV document
#[derive(Debug)]
pub struct IngestReport {
    /// Successfully parsed records, in file order
    pub records: Vec<SampleRecord>,

    /// Rows dropped because they were malformed
    pub skipped: usize,
}

/// Parse a sample metadata CSV file with columns: id, region, age, seed
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse
/// errors if the content is invalid.
pub fn parse_csv_file(path: &Path) -> Result<IngestReport, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_csv_text(&content)
}

/// Parse sample metadata CSV text with columns: id, region, age, seed
///
/// Malformed rows are skipped (and counted in the report), not fatal.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if no valid sample rows are found,
/// or `ParseError::TooManySamples` if the row limit is exceeded.
pub fn parse_csv_text(text: &str) -> Result<IngestReport, ParseError> {
    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.trim().to_lowercase()).unwrap_or_default();
            if first == "id" || first == "sample_id" {
                continue;
            }
        }

        // Line numbers in warnings are 1-based for user friendliness
        let line_num = i + 1;

        let Some(record) = parse_row(&fields) else {
            tracing::warn!("Skipping malformed row on line {line_num}: '{line}'");
            skipped += 1;
            continue;
        };

        if check_sample_limit(records.len()).is_some() {
            return Err(ParseError::TooManySamples(records.len()));
        }

        records.push(record);
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No valid sample rows found in file".to_string(),
        ));
    }

    Ok(IngestReport { records, skipped })
}

/// Parse one data row. Returns None for rows that cannot form a record.
fn parse_row(fields: &[&str]) -> Option<SampleRecord> {
    if fields.len() < 4 {
        return None;
    }

    let id = fields[0].trim();
    if id.is_empty() {
        return None;
    }

    let region = fields[1].trim();
    let age: u32 = fields[2].trim().parse().ok()?;
    let seed_tag = fields[3].trim();

    Some(SampleRecord::new(id, region, age, seed_tag))
}
