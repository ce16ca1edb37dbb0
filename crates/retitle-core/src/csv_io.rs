//! Catalog export reader and import writer
//!
//! Input is a headered CSV export in which only the handle and title
//! columns matter. Rows may have any number of other columns. Output is a
//! two-column `Handle,Title` import file.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::{Error, FinalRecord, RawRecord, Result};

/// Header names to bind handle and title from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub handle: String,
    pub title: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            handle: "Handle".to_string(),
            title: "Title".to_string(),
        }
    }
}

/// Read every data row as a [`RawRecord`]
///
/// Empty titles are kept; the pipeline decides what to skip.
///
/// # Errors
/// `MissingColumn` when a header is absent, `MalformedRow` when a row is
/// too short to hold a required field.
pub fn read_records<R: Read>(reader: R, columns: &Columns) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };
    let handle_idx = find(&columns.handle)?;
    let title_idx = find(&columns.title)?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        let handle = row
            .get(handle_idx)
            .ok_or_else(|| malformed(line, &columns.handle))?;
        let title = row
            .get(title_idx)
            .ok_or_else(|| malformed(line, &columns.title))?;
        records.push(RawRecord::new(handle, title));
    }
    Ok(records)
}

fn malformed(line: u64, column: &str) -> Error {
    Error::MalformedRow {
        line,
        column: column.to_string(),
    }
}

pub fn read_path(path: &Path, columns: &Columns) -> Result<Vec<RawRecord>> {
    let file = File::open(path)?;
    read_records(file, columns)
}

/// Write the `Handle,Title` header and one row per record, in order
pub fn write_records<W: Write>(writer: W, records: &[FinalRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(["Handle", "Title"])?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_path(path: &Path, records: &[FinalRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_records(file, records)
}
