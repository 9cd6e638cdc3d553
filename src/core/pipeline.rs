//! End-to-end driver: transcript lines in, records out.
//!
//! A [`Pipeline`] holds the compiled extractors and a single
//! [`RecordAssembler`]. Sources are processed one at a time in the order
//! they are given; ids continue from one source to the next.
//!
//! # Example
//!
//! ```rust
//! use propchat::Pipeline;
//!
//! let mut pipeline = Pipeline::new().unwrap();
//!
//! let first = pipeline.process_str("group_a.txt", "[24/05/2025, 1:39:50 AM] Ali: شقة للبيع");
//! let second = pipeline.process_str("group_b.txt", "[25/05/2025, 9:00:00 PM] Omar: مطلوب فيلا");
//!
//! assert_eq!(first[0].unique_id, "PRO1");
//! assert_eq!(second[0].unique_id, "PRO2");
//! assert_eq!(pipeline.stats().total_records, 2);
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::error::{PropchatError, Result};
use crate::extract::Analyzer;
use crate::message::{RawLine, numbered_lines};
use crate::parsing::Segmenter;
use crate::record::Record;

use super::assembler::RecordAssembler;
use super::processor::ProcessingStats;

/// Message segmentation, extraction and assembly for a run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    analyzer: Analyzer,
    assembler: RecordAssembler,
}

impl Pipeline {
    /// Creates a pipeline with the built-in tables.
    ///
    /// # Errors
    ///
    /// Fails only if a built-in pattern does not compile.
    pub fn new() -> Result<Self> {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Creates a pipeline for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PropchatError::InvalidRule`] if a configured pattern does
    /// not compile.
    pub fn with_config(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            analyzer: Analyzer::new(config)?,
            assembler: RecordAssembler::new(),
        })
    }

    /// Returns the compiled extractors.
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Lazily turns the lines of one source into records.
    ///
    /// Records are assembled as the iterator is driven, so ids are assigned
    /// in emission order.
    pub fn records<'a, I>(&'a mut self, source: &str, lines: I) -> impl Iterator<Item = Record> + 'a
    where
        I: IntoIterator<Item = RawLine>,
        I::IntoIter: 'a,
    {
        let analyzer = &self.analyzer;
        let assembler = &mut self.assembler;
        Segmenter::new(source, lines.into_iter()).map(move |message| {
            let analysis = analyzer.analyze(&message);
            assembler.assemble(&message, analysis)
        })
    }

    /// Processes the lines of one source.
    pub fn process_lines<I>(&mut self, source: &str, lines: I) -> Vec<Record>
    where
        I: IntoIterator<Item = RawLine>,
    {
        let mut segmenter = Segmenter::new(source, lines.into_iter());
        let mut records = Vec::new();
        for message in segmenter.by_ref() {
            let analysis = self.analyzer.analyze(&message);
            records.push(self.assembler.assemble(&message, analysis));
        }

        let counts = segmenter.stats();
        debug!(
            source,
            lines = counts.lines,
            headers = counts.headers,
            continuations = counts.continuations,
            orphans = counts.orphans,
            blank = counts.blank,
            "segmented source"
        );
        info!(source, records = records.len(), orphans = counts.orphans, "processed source");
        records
    }

    /// Processes a transcript held in memory.
    pub fn process_str(&mut self, source: &str, content: &str) -> Vec<Record> {
        self.process_lines(source, numbered_lines(content))
    }

    /// Reads and processes one transcript file.
    ///
    /// The record's `file_source` is the file name.
    ///
    /// # Errors
    ///
    /// Returns [`PropchatError::Io`] if the file cannot be read and
    /// [`PropchatError::Encoding`] if it is not valid UTF-8. Nothing is
    /// assembled for a failed source.
    pub fn process_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<Record>> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|e| {
            warn!(path = %path.display(), "source is not valid UTF-8");
            PropchatError::encoding(path, e)
        })?;

        let source = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(self.process_str(&source, &content))
    }

    /// Statistics so far.
    pub fn stats(&self) -> &ProcessingStats {
        self.assembler.stats()
    }

    /// Clears ids and statistics for a new run.
    pub fn reset(&mut self) {
        self.assembler.reset();
    }

    /// Ends the run and hands back the statistics.
    pub fn finish(self) -> ProcessingStats {
        self.assembler.finish()
    }
}
