//! Record assembly.
//!
//! The assembler is the only stateful stage of the pipeline. It owns the
//! `PRO<n>` counter and the [`ProcessingStats`]; every record of a run goes
//! through the same assembler, so ids stay unique and strictly increasing
//! across sources.

use tracing::trace;

use crate::extract::Analysis;
use crate::extract::phone::{MAX_PHONES, push_distinct};
use crate::message::Message;
use crate::record::Record;
use crate::text::strip_emoji;

use super::processor::ProcessingStats;

/// Prefix of every record id.
pub const ID_PREFIX: &str = "PRO";

/// Turns analyzed messages into numbered records.
///
/// # Example
///
/// ```rust
/// use propchat::config::ExtractionConfig;
/// use propchat::core::RecordAssembler;
/// use propchat::extract::Analyzer;
/// use propchat::Message;
///
/// let analyzer = Analyzer::new(&ExtractionConfig::default()).unwrap();
/// let mut assembler = RecordAssembler::new();
///
/// let msg = Message::new("_chat.txt", "10/06/2025", "5:22:03 AM", "+20 103 011 4411", "Hello everyone", 1);
/// let record = assembler.assemble(&msg, analyzer.analyze(&msg));
///
/// assert_eq!(record.unique_id, "PRO1");
/// assert_eq!(record.sender_name, "");
/// assert_eq!(record.sender_phone.as_deref(), Some("+201030114411"));
/// assert_eq!(assembler.stats().with_phone, 1);
/// ```
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    next_id: u64,
    stats: ProcessingStats,
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordAssembler {
    /// Creates an assembler whose first record is `PRO1`.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            stats: ProcessingStats::new(),
        }
    }

    /// Builds the next record and folds it into the statistics.
    pub fn assemble(&mut self, message: &Message, analysis: Analysis) -> Record {
        let unique_id = format!("{ID_PREFIX}{}", self.next_id);
        self.next_id += 1;

        let sender_is_phone = analysis.sender_phone.is_some();
        let mut phones = Vec::with_capacity(MAX_PHONES);
        if let Some(sender_phone) = analysis.sender_phone {
            phones.push(sender_phone);
        }
        for phone in analysis.phones {
            if phones.len() == MAX_PHONES {
                break;
            }
            push_distinct(&mut phones, phone);
        }
        let mut numbers = phones.into_iter().map(|p| p.number);

        let sender_name = if sender_is_phone {
            String::new()
        } else {
            clean_sender_name(message.sender())
        };

        let record = Record {
            unique_id,
            file_source: message.source.clone(),
            date: message.date.clone(),
            time: message.time.clone(),
            sender_name,
            sender_phone: numbers.next(),
            sender_phone_2: numbers.next(),
            message: analysis.cleaned,
            message_backup: message.body.clone(),
            status: analysis.status,
            region: analysis.region,
            property_type: analysis.property_type,
            line_number: message.line_number,
        };

        let sender_key = if record.sender_name.is_empty() {
            record.sender_phone.as_deref().unwrap_or_default()
        } else {
            record.sender_name.as_str()
        };
        self.stats.record(&record, sender_key, message.timestamp());

        trace!(
            id = %record.unique_id,
            source = %record.file_source,
            line = record.line_number,
            "assembled record"
        );
        record
    }

    /// Id the next record will get.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Statistics so far.
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Starts a new run: ids restart at `PRO1`, counters are cleared.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Ends the run and hands back the statistics.
    pub fn finish(self) -> ProcessingStats {
        self.stats
    }
}

/// Cleans a display name.
///
/// Removes leading `~` markers and emoji, and collapses whitespace.
///
/// ```rust
/// use propchat::core::assembler::clean_sender_name;
///
/// assert_eq!(clean_sender_name("~ Ahmed  Samir 🏠"), "Ahmed Samir");
/// assert_eq!(clean_sender_name("محمد فرج"), "محمد فرج");
/// ```
pub fn clean_sender_name(raw: &str) -> String {
    let trimmed = raw.trim().trim_start_matches('~');
    strip_emoji(trimmed)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PhoneNumber;
    use crate::extract::phone::PhoneFormat;
    use crate::extract::property::PropertyType;

    fn phone(number: &str) -> PhoneNumber {
        PhoneNumber {
            number: number.to_string(),
            national: number.trim_start_matches("+20").trim_start_matches('0').to_string(),
            format: PhoneFormat::LocalMobile,
        }
    }

    fn message(sender: &str, body: &str) -> Message {
        Message::new("a.txt", "24/05/2025", "1:39:50 AM", sender, body, 3)
    }

    #[test]
    fn test_sequential_ids() {
        let mut assembler = RecordAssembler::new();
        let msg = message("Ali", "hi");
        let ids: Vec<String> = (0..3)
            .map(|_| assembler.assemble(&msg, Analysis::default()).unique_id)
            .collect();
        assert_eq!(ids, ["PRO1", "PRO2", "PRO3"]);
        assert_eq!(assembler.next_id(), 4);
    }

    #[test]
    fn test_fields_copied() {
        let mut assembler = RecordAssembler::new();
        let msg = message("~ Ali", "Hello 😊 World 🌍");
        let analysis = Analysis {
            cleaned: "Hello  World ".into(),
            status: vec!["للبيع".into()],
            property_type: Some(PropertyType::Villa),
            ..Analysis::default()
        };
        let record = assembler.assemble(&msg, analysis);
        assert_eq!(record.sender_name, "Ali");
        assert_eq!(record.message, "Hello  World ");
        assert_eq!(record.message_backup, "Hello 😊 World 🌍");
        assert_eq!(record.line_number, 3);
        assert_eq!(record.file_source, "a.txt");
        assert_eq!(record.property_type, Some(PropertyType::Villa));
    }

    #[test]
    fn test_body_phones_fill_slots() {
        let mut assembler = RecordAssembler::new();
        let analysis = Analysis {
            phones: vec![phone("01092400709"), phone("01122222222")],
            ..Analysis::default()
        };
        let record = assembler.assemble(&message("Ali", "x"), analysis);
        assert_eq!(record.sender_phone.as_deref(), Some("01092400709"));
        assert_eq!(record.sender_phone_2.as_deref(), Some("01122222222"));
        assert_eq!(assembler.stats().with_second_phone, 1);
    }

    #[test]
    fn test_sender_phone_comes_first_and_dedupes() {
        let mut assembler = RecordAssembler::new();
        let analysis = Analysis {
            sender_phone: Some(phone("+201092400709")),
            phones: vec![phone("01092400709"), phone("01122222222")],
            ..Analysis::default()
        };
        let record = assembler.assemble(&message("+20 109 240 0709", "x"), analysis);
        assert_eq!(record.sender_name, "");
        assert_eq!(record.sender_phone.as_deref(), Some("+201092400709"));
        assert_eq!(record.sender_phone_2.as_deref(), Some("01122222222"));
    }

    #[test]
    fn test_stats_and_reset() {
        let mut assembler = RecordAssembler::new();
        assembler.assemble(&message("Ali", "x"), Analysis::default());
        assembler.assemble(&message("Omar", "y"), Analysis::default());
        assembler.assemble(&message("Ali", "z"), Analysis::default());
        assert_eq!(assembler.stats().total_records, 3);
        assert_eq!(assembler.stats().distinct_senders(), 2);
        assert_eq!(assembler.stats().empty_messages, 3);
        assert!(assembler.stats().first_timestamp.is_some());

        assembler.reset();
        assert_eq!(assembler.next_id(), 1);
        assert_eq!(assembler.finish().total_records, 0);
    }

    #[test]
    fn test_clean_sender_name() {
        assert_eq!(clean_sender_name("~\u{a0}Sara"), "Sara");
        assert_eq!(clean_sender_name("  Mona   Ali "), "Mona Ali");
        assert_eq!(clean_sender_name("🏠🏠"), "");
    }
}
