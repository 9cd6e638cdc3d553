//! Output format selection.
//!
//! [`OutputFormat`] is the library-side format enum; the CLI maps its own
//! argument type onto it. Writers are dispatched through [`write_to_format`]
//! and [`to_format_string`] so callers never touch feature gates directly.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> propchat::Result<()> {
//! use propchat::format::{OutputFormat, to_format_string};
//! use propchat::core::models::OutputConfig;
//! use propchat::Pipeline;
//!
//! let records = Pipeline::new()?.process_str("_chat.txt", "[24/05/2025, 1:39:50 AM] Ali: أرض للبيع");
//!
//! let jsonl = to_format_string(&records, OutputFormat::Jsonl, &OutputConfig::new())?;
//! assert_eq!(jsonl.lines().count(), 1);
//!
//! let format = OutputFormat::from_path("whatsapp_chats.json")?;
//! assert_eq!(format, OutputFormat::Json);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::models::OutputConfig;
use crate::error::{PropchatError, Result};
use crate::record::Record;

/// Output format for annotated records.
///
/// ```rust
/// use propchat::format::OutputFormat;
///
/// let format: OutputFormat = "ndjson".parse().unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Header row plus one row per record (default)
    #[default]
    Csv,

    /// One JSON array holding every record
    Json,

    /// One JSON object per line
    Jsonl,
}

impl OutputFormat {
    /// Every supported format.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl];

    /// Returns the file extension for this format (without dot).
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Cargo feature that compiles the writer for this format.
    pub fn feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Whether the writer for this format is compiled in.
    pub fn is_available(self) -> bool {
        match self {
            OutputFormat::Csv => cfg!(feature = "csv-output"),
            OutputFormat::Json | OutputFormat::Jsonl => cfg!(feature = "json-output"),
        }
    }

    /// Detects the format from a path's extension.
    ///
    /// ```rust
    /// use propchat::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/records.JSONL").unwrap(), OutputFormat::Jsonl);
    /// assert!(OutputFormat::from_path("records.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        ext.parse().map_err(|_| {
            PropchatError::invalid_format(
                "output",
                format!("Unknown file extension '.{ext}'. Expected one of: csv, json, jsonl"),
            )
        })
    }

    fn unavailable(self) -> PropchatError {
        PropchatError::invalid_format(
            "output",
            format!("{self} output requires the '{}' feature", self.feature()),
        )
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PropchatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(PropchatError::invalid_format(
                "output",
                format!("Unknown format '{s}'. Expected one of: csv, json, jsonl, ndjson"),
            )),
        }
    }
}

/// Writes records to `path` in the given format.
///
/// # Errors
///
/// Returns [`PropchatError::InvalidFormat`] if the format's writer is not
/// compiled in, or the writer's error if the file cannot be written.
#[allow(unused_variables)]
pub fn write_to_format(
    records: &[Record],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.unavailable()),
    }
}

/// Renders records to a string in the given format.
#[allow(unused_variables)]
pub fn to_format_string(
    records: &[Record],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.unavailable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("ndjson".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        let err = "xlsx".parse::<OutputFormat>().unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("whatsapp_chats.csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("/tmp/a.b/out.json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_path("no_extension").is_err());
    }

    #[test]
    fn test_format_display_and_extension() {
        for format in OutputFormat::ALL {
            assert_eq!(format.extension().parse::<OutputFormat>().unwrap(), format);
            assert_eq!(format.to_string().to_lowercase(), format.extension());
        }
    }

    #[test]
    fn test_default_is_csv() {
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_to_format_string_dispatch() {
        let records = crate::Pipeline::new()
            .unwrap()
            .process_str("_chat.txt", "[24/05/2025, 1:39:50 AM] Ali: hi");
        let config = OutputConfig::new();

        let csv = to_format_string(&records, OutputFormat::Csv, &config).unwrap();
        assert!(csv.starts_with("unique_id,"));
        let json = to_format_string(&records, OutputFormat::Json, &config).unwrap();
        assert!(json.starts_with('['));
        let jsonl = to_format_string(&records, OutputFormat::Jsonl, &config).unwrap();
        assert!(jsonl.starts_with('{'));
        assert!(OutputFormat::ALL.iter().all(|f| f.is_available()));
    }
}
