//! JSON Lines (JSONL) output writer.
//!
//! One record per line, suited to streaming consumers and bulk loaders.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::record::Record;

/// Writes records to a JSONL file.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"unique_id":"PRO1","file_source":"_chat.txt",...}
/// {"unique_id":"PRO2","file_source":"_chat.txt",...}
/// ```
pub fn write_jsonl(records: &[Record], output_path: &str, _config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(records, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[Record], _config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(records, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(records: &[Record], mut sink: W) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut sink, record)?;
        sink.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pipeline;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    fn records() -> Vec<Record> {
        Pipeline::new().unwrap().process_str(
            "_chat.txt",
            "[24/05/2025, 1:39:50 AM] Ali: شقة للايجار\nبالتجمع الخامس\n[24/05/2025, 1:40:00 AM] Bob: hi",
        )
    }

    #[test]
    fn test_write_jsonl_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&records(), path, &OutputConfig::new()).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["unique_id"], "PRO1");
        assert_eq!(first["message_backup"], "شقة للايجار\nبالتجمع الخامس");
        assert_eq!(first["region"], "التجمع الخامس");
        assert_eq!(first["status"], "للايجار");
        assert_eq!(first["property_type"], "apartment");

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["unique_id"], "PRO2");
    }

    #[test]
    fn test_jsonl_no_array_brackets() {
        let content = to_jsonl(&records(), &OutputConfig::new()).unwrap();
        assert!(!content.starts_with('['));
        assert!(content.ends_with('\n'));
        assert_eq!(content.lines().count(), 2);
    }
}
