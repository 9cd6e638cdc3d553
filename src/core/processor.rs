use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::NaiveDateTime;

use crate::extract::property::PropertyType;
use crate::record::Record;

/// Aggregate counters over a run.
///
/// Owned and updated only by the [`RecordAssembler`](super::RecordAssembler);
/// everything else reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Records assembled
    pub total_records: usize,
    /// Records with at least one phone
    pub with_phone: usize,
    /// Records with a second phone
    pub with_second_phone: usize,
    /// Records with a status keyword
    pub with_status: usize,
    /// Records with a region
    pub with_region: usize,
    /// Records with a property type
    pub with_property_type: usize,
    /// Records whose cleaned message is empty
    pub empty_messages: usize,
    /// Record count per property type
    pub property_types: BTreeMap<PropertyType, usize>,
    senders: HashSet<String>,
    /// Earliest parseable message time
    pub first_timestamp: Option<NaiveDateTime>,
    /// Latest parseable message time
    pub last_timestamp: Option<NaiveDateTime>,
}

impl ProcessingStats {
    /// Creates empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one record into the counters.
    ///
    /// `sender_key` identifies the sender for the distinct-sender count.
    pub fn record(&mut self, record: &Record, sender_key: &str, timestamp: Option<NaiveDateTime>) {
        self.total_records += 1;
        if record.sender_phone.is_some() {
            self.with_phone += 1;
        }
        if record.sender_phone_2.is_some() {
            self.with_second_phone += 1;
        }
        if !record.status.is_empty() {
            self.with_status += 1;
        }
        if !record.region.is_empty() {
            self.with_region += 1;
        }
        if let Some(property) = record.property_type {
            self.with_property_type += 1;
            *self.property_types.entry(property).or_insert(0) += 1;
        }
        if record.message.is_empty() {
            self.empty_messages += 1;
        }
        if !sender_key.is_empty() {
            self.senders.insert(sender_key.to_string());
        }
        if let Some(ts) = timestamp {
            self.first_timestamp = Some(self.first_timestamp.map_or(ts, |t| t.min(ts)));
            self.last_timestamp = Some(self.last_timestamp.map_or(ts, |t| t.max(ts)));
        }
    }

    /// Number of distinct senders seen.
    pub fn distinct_senders(&self) -> usize {
        self.senders.len()
    }

    fn write_count(&self, f: &mut fmt::Formatter<'_>, label: &str, count: usize) -> fmt::Result {
        writeln!(f, "   {label:<14} {count} ({:.1}%)", self.percentage(count))
    }

    /// `count` as a percentage of all records.
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        count as f64 / self.total_records as f64 * 100.0
    }
}

impl fmt::Display for ProcessingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   {:<14} {}", "Records:", self.total_records)?;
        self.write_count(f, "With phone:", self.with_phone)?;
        self.write_count(f, "Two phones:", self.with_second_phone)?;
        self.write_count(f, "With status:", self.with_status)?;
        self.write_count(f, "With region:", self.with_region)?;
        self.write_count(f, "With type:", self.with_property_type)?;
        for (property, count) in &self.property_types {
            writeln!(f, "     {:<12} {count}", property.as_str())?;
        }
        self.write_count(f, "Empty:", self.empty_messages)?;
        writeln!(f, "   {:<14} {}", "Senders:", self.distinct_senders())?;
        if let (Some(first), Some(last)) = (self.first_timestamp, self.last_timestamp) {
            writeln!(
                f,
                "   {:<14} {} .. {}",
                "Date range:",
                first.format("%Y-%m-%d %H:%M"),
                last.format("%Y-%m-%d %H:%M")
            )?;
        }
        Ok(())
    }
}
