//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::core::models::OutputConfig;
use crate::error::{PropchatError, Result};
use crate::record::{COLUMNS, Record};

/// Writes records to a CSV file.
///
/// # Format
/// - Delimiter: from `OutputConfig` (default `,`)
/// - Header row: the record columns in output order
/// - List fields joined with `", "`, absent values empty
/// - Encoding: UTF-8
pub fn write_csv(records: &[Record], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(records, file, config)
}

/// Converts records to a CSV string.
pub fn to_csv(records: &[Record], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(records: &[Record], sink: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(sink);

    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }

    writer
        .into_inner()
        .map_err(|e| PropchatError::Io(e.into_error()))?
        .flush()?;
    Ok(())
}
