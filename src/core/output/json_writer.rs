//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::record::Record;

/// Writes records to a JSON array file.
///
/// Each element is a flat object with the record columns as keys:
/// ```json
/// [
///   {
///     "unique_id": "PRO1",
///     "file_source": "_chat.txt",
///     "status": "للبيع",
///     "region": "حي 19, مجاورة 1",
///     "property_type": "land",
///     ...
///   }
/// ]
/// ```
pub fn write_json(records: &[Record], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    if config.pretty {
        serde_json::to_writer_pretty(&mut writer, records)?;
    } else {
        serde_json::to_writer(&mut writer, records)?;
    }
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSON array string.
pub fn to_json(records: &[Record], config: &OutputConfig) -> Result<String> {
    let json = if config.pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(json)
}
