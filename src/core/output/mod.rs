//! Output format writers.
//!
//! This module provides writers for [`Record`](crate::Record) slices:
//! - [`write_csv`] / [`to_csv`] - CSV with a header row - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one record per line - requires `json-output` feature
//!
//! All three share the same flat field layout and column order.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> propchat::Result<()> {
//! use propchat::core::output::{write_csv, write_json, write_jsonl, to_csv};
//! use propchat::core::models::OutputConfig;
//! use propchat::Pipeline;
//!
//! let mut pipeline = Pipeline::new()?;
//! let records = pipeline.process_file("_chat.txt")?;
//!
//! let config = OutputConfig::new();
//! write_csv(&records, "whatsapp_chats.csv", &config)?;
//! write_json(&records, "whatsapp_chats.json", &config)?;
//! write_jsonl(&records, "whatsapp_chats.jsonl", &config)?;
//!
//! let csv_string = to_csv(&records, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
