use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{IngestError, RawRow, RawValue};

/// Fields a line needs to be considered a data or header row.
pub const MIN_FIELDS: usize = 3;

/// Parse comma-separated text into untyped rows.
///
/// No header is assumed and fields are trimmed. Lines without any non-empty
/// field, and lines with fewer than [`MIN_FIELDS`] fields (titles, instrument
/// banners), are skipped. Longer rows are kept as they are.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawRow>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut short_lines = 0;
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < MIN_FIELDS {
            short_lines += 1;
            continue;
        }
        rows.push(record.iter().map(RawValue::parse).collect());
    }

    if short_lines > 0 {
        log::debug!("Ignored {} lines with fewer than {} fields", short_lines, MIN_FIELDS);
    }
    log::debug!("Parsed {} CSV rows", rows.len());
    Ok(rows)
}

/// Parse a CSV file from disk.
pub fn read_csv_file<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>, IngestError> {
    let file = File::open(path)?;
    parse_csv(BufReader::new(file))
}
