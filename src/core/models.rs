//! Output settings.

/// Configuration for the record writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// CSV field delimiter (default: `,`)
    pub delimiter: u8,
    /// Pretty-print JSON arrays (default: true)
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            pretty: true,
        }
    }
}

impl OutputConfig {
    /// Comma-delimited CSV, pretty JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CSV delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Writes JSON arrays on a single line.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}
