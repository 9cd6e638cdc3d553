//! The annotated output record.
//!
//! A [`Record`] is what every output layer consumes. Its serialized form is
//! flat so the same value feeds CSV, JSON and JSONL writers:
//!
//! - list fields are joined with [`LIST_SEPARATOR`]
//! - absent values are empty strings
//! - fields appear in declaration order
//!
//! ```text
//! unique_id, file_source, date, time, sender_name, sender_phone,
//! sender_phone_2, message, message_backup, status, region,
//! property_type, line_number
//! ```

use serde::{Serialize, Serializer};

use crate::extract::property::PropertyType;

/// Separator used when a list field is flattened to text.
pub const LIST_SEPARATOR: &str = ", ";

/// Column names in output order.
pub const COLUMNS: [&str; 13] = [
    "unique_id",
    "file_source",
    "date",
    "time",
    "sender_name",
    "sender_phone",
    "sender_phone_2",
    "message",
    "message_backup",
    "status",
    "region",
    "property_type",
    "line_number",
];

/// One fully annotated message.
///
/// Built only by the [`RecordAssembler`](crate::core::RecordAssembler);
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// `PRO<n>`, strictly increasing in emission order
    pub unique_id: String,

    /// Source the message came from
    pub file_source: String,

    /// `DD/MM/YYYY`
    pub date: String,

    /// `H:MM:SS AM|PM`
    pub time: String,

    /// Display name, empty when the sender is a phone number
    pub sender_name: String,

    /// First distinct phone
    #[serde(serialize_with = "serialize_optional")]
    pub sender_phone: Option<String>,

    /// Second distinct phone
    #[serde(serialize_with = "serialize_optional")]
    pub sender_phone_2: Option<String>,

    /// Body after emoji and placeholder removal
    pub message: String,

    /// Body exactly as segmented
    pub message_backup: String,

    /// Status keywords, first occurrence order
    #[serde(serialize_with = "serialize_joined")]
    pub status: Vec<String>,

    /// Region phrases, first occurrence order
    #[serde(serialize_with = "serialize_joined")]
    pub region: Vec<String>,

    /// Highest-priority property type
    #[serde(serialize_with = "serialize_optional")]
    pub property_type: Option<PropertyType>,

    /// Line number of the header line within the source
    pub line_number: usize,
}

impl Record {
    /// Status keywords joined for display.
    pub fn status_text(&self) -> String {
        self.status.join(LIST_SEPARATOR)
    }

    /// Region phrases joined for display.
    pub fn region_text(&self) -> String {
        self.region.join(LIST_SEPARATOR)
    }

    /// Property type label, or `""`.
    pub fn property_type_label(&self) -> &'static str {
        self.property_type.map_or("", PropertyType::as_str)
    }

    /// Returns `true` if at least one phone was found.
    pub fn has_phone(&self) -> bool {
        self.sender_phone.is_some()
    }

    /// Returns the record as string fields in [`COLUMNS`] order.
    pub fn to_row(&self) -> [String; 13] {
        [
            self.unique_id.clone(),
            self.file_source.clone(),
            self.date.clone(),
            self.time.clone(),
            self.sender_name.clone(),
            self.sender_phone.clone().unwrap_or_default(),
            self.sender_phone_2.clone().unwrap_or_default(),
            self.message.clone(),
            self.message_backup.clone(),
            self.status_text(),
            self.region_text(),
            self.property_type_label().to_string(),
            self.line_number.to_string(),
        ]
    }
}

fn serialize_joined<S: Serializer>(items: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&items.join(LIST_SEPARATOR))
}

fn serialize_optional<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: ToString,
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(&v.to_string()),
        None => serializer.serialize_str(""),
    }
}
