//! Record assembly and output.
//!
//! - [`assembler`] - turns analyzed messages into [`Record`](crate::Record)s
//! - [`pipeline`] - segmentation, analysis and assembly wired together
//! - [`processor`] - run statistics
//! - [`models`] - writer settings
//! - [`output`] - format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> propchat::Result<()> {
//! use propchat::core::{OutputConfig, Pipeline, to_csv};
//!
//! let mut pipeline = Pipeline::new()?;
//! let records = pipeline.process_str("_chat.txt", "[24/05/2025, 1:39:50 AM] Ali: شقة للبيع");
//! let csv = to_csv(&records, &OutputConfig::new())?;
//! assert!(csv.contains("PRO1"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

pub mod assembler;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod processor;

pub use assembler::{ID_PREFIX, RecordAssembler, clean_sender_name};
pub use models::OutputConfig;
pub use pipeline::Pipeline;
pub use processor::ProcessingStats;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
