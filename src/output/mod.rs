//! Output format writers.
//!
//! - [`write_json`] / [`to_json`] - JSON array of entries - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//!
//! JSON and JSONL share one record shape ([`EntryRecord`]): `timestamp`,
//! `timestamp_text`, `sender`, `message` and `type` are always present, the
//! fact fields only when set.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn main() -> chatscope::Result<()> {
//! use chatscope::assembler::parse_str;
//! use chatscope::config::OutputConfig;
//! use chatscope::output::to_json;
//!
//! let entries = parse_str("1/2/24, 10:00 - Alice: Hello");
//! let json = to_json(&entries, &OutputConfig::new())?;
//! assert!(json.contains(r#""sender":"Alice""#));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "json-output"))]
//! # fn main() {}
//! ```

use serde::Serialize;

use crate::config::OutputConfig;
use crate::entry::{Attachment, ChatEntry, EntryKind, SystemSubtype};

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

pub(crate) const ISO_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S";

/// Flat, borrowed view of an entry as written to JSON.
#[derive(Debug, Serialize)]
pub struct EntryRecord<'a> {
    pub timestamp: Option<String>,
    pub timestamp_text: &'a str,
    pub sender: Option<&'a str>,
    pub message: &'a str,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_subtype: Option<SystemSubtype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_icon: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<&'a Attachment>,
}

impl<'a> EntryRecord<'a> {
    pub fn from_entry(entry: &'a ChatEntry, config: &OutputConfig) -> Self {
        let facts = config.include_facts;
        let status = entry.status().filter(|_| facts);
        Self {
            timestamp: entry
                .timestamp
                .map(|ts| ts.format(ISO_TIMESTAMP).to_string()),
            timestamp_text: &entry.timestamp_text,
            sender: entry.sender(),
            message: &entry.message,
            kind: entry.kind(),
            system_subtype: entry.system_subtype().filter(|_| facts),
            status_label: status.map(|s| s.label()),
            status_icon: status.map(|s| s.icon()),
            attachment: entry.attachment().filter(|_| facts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::parse_str;

    #[test]
    fn test_record_always_has_core_fields() {
        let entries = parse_str("1/13/24, 10:00 - Carol left");
        let record = EntryRecord::from_entry(&entries[0], &OutputConfig::new());
        let value = serde_json::to_value(&record).unwrap();

        let object = value.as_object().unwrap();
        for key in ["timestamp", "timestamp_text", "sender", "message", "type"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert!(value["timestamp"].is_null());
        assert!(value["sender"].is_null());
        assert_eq!(value["type"], "system");
        assert_eq!(value["system_subtype"], "text_leave");
        assert!(!object.contains_key("status_label"));
        assert!(!object.contains_key("attachment"));
    }

    #[test]
    fn test_record_status_and_attachment() {
        let entries = parse_str(
            "1/2/24, 10:00 - Alice: Waiting for this message\n1/2/24, 10:01 - Bob: photo.jpg (1.2 MB)",
        );
        let config = OutputConfig::new();

        let waiting = serde_json::to_value(EntryRecord::from_entry(&entries[0], &config)).unwrap();
        assert_eq!(waiting["timestamp"], "2024-02-01T10:00:00");
        assert_eq!(waiting["status_label"], "Waiting for this message");
        assert_eq!(waiting["status_icon"], "⏳");

        let photo = serde_json::to_value(EntryRecord::from_entry(&entries[1], &config)).unwrap();
        assert_eq!(photo["attachment"]["filename"], "photo.jpg");
        assert_eq!(photo["attachment"]["size"], "1.2 MB");
    }

    #[test]
    fn test_record_without_facts() {
        let entries = parse_str("1/2/24, 10:01 - Bob: photo.jpg (1.2 MB)");
        let config = OutputConfig::new().with_facts(false);
        let value = serde_json::to_value(EntryRecord::from_entry(&entries[0], &config)).unwrap();
        assert!(value.get("attachment").is_none());
        assert_eq!(value["sender"], "Bob");
    }
}
