//! Command-line interface definition using clap.
//!
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - `--format` values, convertible to [`crate::format::OutputFormat`]
//!
//! The argument type also knows how to turn itself into the library
//! configuration, so the binary stays a thin loop over sources:
//!
//! ```rust
//! use clap::Parser;
//! use propchat::cli::Args;
//!
//! let args = Args::parse_from(["propchat", "_chat.txt", "-f", "jsonl", "-vv"]);
//! assert_eq!(args.output_path(), "whatsapp_chats.jsonl");
//! assert_eq!(args.log_filter(), "propchat=debug");
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ExtractionConfig, RuleExtensions};
use crate::core::models::OutputConfig;
use crate::error::{PropchatError, Result};

/// Output file used when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "whatsapp_chats.csv";

/// Extract property listings from WhatsApp group exports
/// into one annotated table.
#[derive(Parser, Debug, Clone)]
#[command(name = "propchat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    propchat _chat.txt
    propchat group_a.txt group_b.txt -o listings.csv
    propchat _chat.txt --format jsonl --redact-phones
    propchat _chat.txt --rules extra_rules.json -vv")]
pub struct Args {
    /// Exported transcripts, processed in order
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// JSON file with extra rules appended to the built-in tables
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Remove phone numbers from the cleaned message column
    #[arg(long)]
    pub redact_phones: bool,

    /// CSV field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Output path, with the extension following `--format` when the
    /// default output is in use.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        let format: crate::format::OutputFormat = self.format.into();
        format!("whatsapp_chats.{}", format.extension())
    }

    /// Log filter for the `-v` count; `RUST_LOG` overrides it.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "propchat=warn",
            1 => "propchat=info",
            2 => "propchat=debug",
            _ => "propchat=trace",
        }
    }

    /// Builds the extraction settings, appending `--rules` if given.
    ///
    /// # Errors
    ///
    /// Fails if the rules file cannot be read or parsed.
    pub fn extraction_config(&self) -> Result<ExtractionConfig> {
        let mut config = ExtractionConfig::new().with_redact_phones(self.redact_phones);
        if let Some(path) = &self.rules {
            config.extend(RuleExtensions::from_path(path)?);
        }
        Ok(config)
    }

    /// Builds the writer settings.
    ///
    /// # Errors
    ///
    /// Returns [`PropchatError::InvalidFormat`] if the delimiter is not a
    /// single-byte ASCII character.
    pub fn output_config(&self) -> Result<OutputConfig> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                PropchatError::invalid_format(
                    "csv",
                    format!("delimiter '{}' is not an ASCII character", self.delimiter),
                )
            })?;
        Ok(OutputConfig::new().with_delimiter(delimiter))
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Spreadsheet-friendly table (default)
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// One JSON record per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
