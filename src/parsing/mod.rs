//! Transcript parsing building blocks.
//!
//! - [`timestamp`] - line grammar and timestamp normalization
//! - [`classify`] - system-notice detection and `sender: body` split
//! - [`subtype`] - ordered subtype rule table
//! - [`facts`] - delivery status and attachment extractors
//!
//! [`classify_entry`] ties them together for one timestamp line.

pub mod classify;
pub mod facts;
pub mod subtype;
pub mod timestamp;

pub use classify::{Classified, SYSTEM_PREFIXES, classify_content, is_system_content};
pub use facts::{extract_attachment, extract_status, format_duration};
pub use subtype::{SUBTYPE_RULES, classify_subtype};
pub use timestamp::{TimestampLine, normalize_timestamp, timestamp_text};

use crate::entry::EntryClass;

/// Classifies the content of a timestamp line.
///
/// Returns the entry class together with the body the entry starts with.
///
/// Message candidates go through two phases. Status and attachment facts are
/// extracted first, then the subtype classifier runs speculatively on the
/// sender and body. If it recognises a notice, a fresh system class is built
/// from the full content and the message facts are dropped.
///
/// # Example
///
/// ```
/// use chatscope::parsing::classify_entry;
/// use chatscope::entry::{EntryClass, SystemSubtype};
///
/// let (class, body) = classify_entry("Dave: This message was deleted");
/// assert_eq!(class, EntryClass::System { subtype: Some(SystemSubtype::TextDelete) });
/// assert_eq!(body, "Dave: This message was deleted");
/// ```
pub fn classify_entry(content: &str) -> (EntryClass, &str) {
    match classify_content(content) {
        Classified::System {
            content,
            origin_sender,
            origin_body,
        } => (
            EntryClass::System {
                subtype: classify_subtype(origin_sender, origin_body),
            },
            content,
        ),
        Classified::Message { sender, body } => {
            let status = extract_status(body);
            let attachment = extract_attachment(body);

            match classify_subtype(Some(sender), body) {
                Some(subtype) => (
                    EntryClass::System {
                        subtype: Some(subtype),
                    },
                    content,
                ),
                None => (
                    EntryClass::Message {
                        sender: sender.to_string(),
                        status,
                        attachment,
                    },
                    body,
                ),
            }
        }
    }
}
