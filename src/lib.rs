//! # propchat
//!
//! Turns exported WhatsApp group transcripts about real estate into one
//! annotated table of listings.
//!
//! ## Overview
//!
//! Every message in a transcript becomes one [`Record`] carrying:
//! - the original message and a cleaned copy without emoji or media placeholders
//! - up to two distinct phone numbers
//! - business-intent keywords (sale, wanted, rent, ...)
//! - place names (cities, numbered districts, compass sectors)
//! - a single property type (apartment, villa, land, commercial)
//!
//! Arabic and English text are both recognized, including Arabic-Indic digits.
//!
//! ## Quick Start
//!
//! ```rust
//! use propchat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut pipeline = Pipeline::new()?;
//!     let records = pipeline.process_str(
//!         "_chat.txt",
//!         "[24/05/2025, 1:39:50 AM] محمد فرج: للبيع في حي 19 مجاورة 1 مساحة 276\n\
//!          للتواصل 01092400709",
//!     );
//!
//!     let record = &records[0];
//!     assert_eq!(record.unique_id, "PRO1");
//!     assert_eq!(record.sender_phone.as_deref(), Some("01092400709"));
//!     assert_eq!(record.region, ["حي 19", "مجاورة 1"]);
//!     assert_eq!(record.property_type, Some(PropertyType::Land));
//!     Ok(())
//! }
//! ```
//!
//! ## Processing files
//!
//! ```rust,no_run
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> propchat::Result<()> {
//! use propchat::prelude::*;
//!
//! let mut pipeline = Pipeline::new()?;
//! let mut records = pipeline.process_file("group_a/_chat.txt")?;
//! records.extend(pipeline.process_file("group_b/_chat.txt")?);
//!
//! write_csv(&records, "whatsapp_chats.csv", &OutputConfig::new())?;
//! println!("{}", pipeline.stats());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`text`] - line normalization and emoji/placeholder stripping
//! - [`parsing`] - header grammar and the line-to-message [`Segmenter`](parsing::Segmenter)
//! - [`extract`] - phone, status, region and property extractors
//! - [`core`] - record assembly, the [`Pipeline`], statistics and writers
//! - [`config`] - [`ExtractionConfig`](config::ExtractionConfig) and JSON rule extensions
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`error`] - [`PropchatError`], [`Result`]
//! - `cli` - clap argument types (feature `cli`)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod format;
pub mod message;
pub mod parsing;
pub mod record;
pub mod text;

pub use crate::core::Pipeline;
pub use error::{PropchatError, Result};
pub use message::Message;
pub use record::Record;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use propchat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Message, Pipeline, Record};

    pub use crate::error::{PropchatError, Result};

    pub use crate::config::{ExtractionConfig, RuleExtensions};

    pub use crate::extract::{Analysis, Analyzer, PhoneNumber, PropertyType, StatusCategory};

    pub use crate::core::{OutputConfig, ProcessingStats, RecordAssembler};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
