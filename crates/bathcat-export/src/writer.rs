//! CSV output in the import format: `;` delimited, every field quoted,
//! header row first.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use crate::error::ExportError;
use crate::rows::ExportRow;

pub const DELIMITER: u8 = b';';

/// Writes the header row followed by one record per row.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] or [`ExportError::Io`] if writing fails.
pub fn write_rows<W: Write, R: ExportRow>(out: W, rows: &[R]) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    writer.write_record(R::HEADERS)?;
    for row in rows {
        writer.write_record(row.record())?;
    }
    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes `rows` to it.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created, or any error
/// from [`write_rows`].
pub fn write_csv_file<R: ExportRow>(path: &Path, rows: &[R]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_rows(file, rows)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote csv file");
    Ok(())
}
