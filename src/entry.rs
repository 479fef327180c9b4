//! Typed chat entries produced by the transcript parser.
//!
//! This module provides [`ChatEntry`], the unit of output of the parser. Every
//! entry carries its timestamp (normalized when possible, always as text) and
//! its body, plus an [`EntryClass`] that says whether it is a user message or a
//! system notice.
//!
//! # Overview
//!
//! The classification is a tagged variant rather than a bag of optional
//! fields, so a system notice can never carry a sender, a delivery status or
//! an attachment:
//!
//! | Variant | Carries |
//! |---------|---------|
//! | [`EntryClass::Message`] | `sender`, optional [`DeliveryStatus`], optional [`Attachment`] |
//! | [`EntryClass::System`] | optional [`SystemSubtype`] |
//!
//! # Examples
//!
//! ```
//! use chatscope::entry::{ChatEntry, EntryKind, SystemSubtype};
//!
//! let msg = ChatEntry::message("1/2/24, 10:00", "Alice", "Hello");
//! assert_eq!(msg.kind(), EntryKind::Message);
//! assert_eq!(msg.sender(), Some("Alice"));
//!
//! let notice = ChatEntry::system("1/2/24, 10:01", "Bob joined using a group link")
//!     .with_subtype(SystemSubtype::TextJoin);
//! assert_eq!(notice.kind(), EntryKind::System);
//! assert!(notice.sender().is_none());
//! ```

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

/// Closed tag distinguishing user messages from system notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Human-authored message with a sender.
    Message,
    /// Automated notice (join, leave, settings change, deletion...).
    System,
}

impl EntryKind {
    /// Returns the serialized name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Message => "message",
            EntryKind::System => "system",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic tag further classifying a system notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemSubtype {
    /// "... requested to join"
    MembershipApprovalRequest,
    /// Joined via link, invite or community
    TextJoin,
    /// Someone was added or invited
    TextAdd,
    /// Someone was removed
    TextRemove,
    /// Someone left
    TextLeave,
    /// Group subject, description or settings changed
    TextChange,
    /// A join request was approved
    MembershipApproval,
    /// A join request was declined
    MembershipApprovalRejected,
    /// A message was deleted
    TextDelete,
    /// Generic system text (encryption notice, missed calls)
    TextSystem,
}

impl SystemSubtype {
    /// Returns the serialized name of this subtype.
    pub fn as_str(self) -> &'static str {
        match self {
            SystemSubtype::MembershipApprovalRequest => "membership_approval_request",
            SystemSubtype::TextJoin => "text_join",
            SystemSubtype::TextAdd => "text_add",
            SystemSubtype::TextRemove => "text_remove",
            SystemSubtype::TextLeave => "text_leave",
            SystemSubtype::TextChange => "text_change",
            SystemSubtype::MembershipApproval => "membership_approval",
            SystemSubtype::MembershipApprovalRejected => "membership_approval_rejected",
            SystemSubtype::TextDelete => "text_delete",
            SystemSubtype::TextSystem => "text_system",
        }
    }
}

impl fmt::Display for SystemSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery-status annotation found in a message body.
///
/// Serialized as a `status_label` / `status_icon` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    /// "Waiting for this message. This may take a while."
    WaitingForMessage,
    /// "Missed voice call"
    MissedVoiceCall,
    /// "You deleted this message"
    DeletedBySender,
    /// "This message was deleted"
    Deleted,
}

impl DeliveryStatus {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            DeliveryStatus::WaitingForMessage => "Waiting for this message",
            DeliveryStatus::MissedVoiceCall => "Missed voice call",
            DeliveryStatus::DeletedBySender => "Deleted by you",
            DeliveryStatus::Deleted => "Deleted",
        }
    }

    /// Short icon paired with the label.
    pub fn icon(self) -> &'static str {
        match self {
            DeliveryStatus::WaitingForMessage => "⏳",
            DeliveryStatus::MissedVoiceCall => "📞",
            DeliveryStatus::DeletedBySender | DeliveryStatus::Deleted => "🗑️",
        }
    }
}

/// Unit of an attachment size expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl SizeUnit {
    /// Parses `KB`, `MB` or `GB` (any case).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "KB" => Some(SizeUnit::Kilobytes),
            "MB" => Some(SizeUnit::Megabytes),
            "GB" => Some(SizeUnit::Gigabytes),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeUnit::Kilobytes => "KB",
            SizeUnit::Megabytes => "MB",
            SizeUnit::Gigabytes => "GB",
        }
    }

    fn multiplier(self) -> f64 {
        match self {
            SizeUnit::Kilobytes => 1024.0,
            SizeUnit::Megabytes => 1024.0 * 1024.0,
            SizeUnit::Gigabytes => 1024.0 * 1024.0 * 1024.0,
        }
    }
}

/// Attachment size as written in the transcript, e.g. `1.2 MB`.
///
/// The numeric text is kept verbatim so that rendering never changes the
/// precision the export used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileSize {
    /// Numeric part exactly as written (`"1.2"`, `"350"`, `"2,5"`).
    pub value: String,
    pub unit: SizeUnit,
}

impl FileSize {
    pub fn new(value: impl Into<String>, unit: SizeUnit) -> Self {
        Self {
            value: value.into(),
            unit,
        }
    }

    /// Approximate size in bytes, if the numeric text parses.
    pub fn bytes(&self) -> Option<f64> {
        let value: f64 = self.value.replace(',', ".").parse().ok()?;
        Some(value * self.unit.multiplier())
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.as_str())
    }
}

impl Serialize for FileSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Structured attachment facts extracted from a message body.
///
/// Only the fields actually present in the body are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FileSize>,

    /// Rendered duration, e.g. `"1h 2m 3s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// Fallback note for a bare attachment marker without a filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Attachment {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.filename.is_none()
            && self.size.is_none()
            && self.duration.is_none()
            && self.note.is_none()
    }
}

/// Classification of an entry, carrying only the facts valid for its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryClass {
    Message {
        sender: String,
        status: Option<DeliveryStatus>,
        attachment: Option<Attachment>,
    },
    System {
        subtype: Option<SystemSubtype>,
    },
}

/// One finished unit of parsed chat history.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    /// Normalized local timestamp; `None` when the source text did not parse.
    pub timestamp: Option<NaiveDateTime>,

    /// Original timestamp text, always present. Used as a fallback grouping key.
    pub timestamp_text: String,

    /// Full body, including continuation lines and preserved blank lines.
    pub message: String,

    pub class: EntryClass,
}

impl ChatEntry {
    /// Creates a message entry with no status or attachment.
    pub fn message(
        timestamp_text: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: None,
            timestamp_text: timestamp_text.into(),
            message: body.into(),
            class: EntryClass::Message {
                sender: sender.into(),
                status: None,
                attachment: None,
            },
        }
    }

    /// Creates an untagged system entry.
    pub fn system(timestamp_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            timestamp_text: timestamp_text.into(),
            message: body.into(),
            class: EntryClass::System { subtype: None },
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_timestamp(mut self, ts: NaiveDateTime) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Sets the subtype. Has no effect on message entries.
    #[must_use]
    pub fn with_subtype(mut self, subtype: SystemSubtype) -> Self {
        if let EntryClass::System { subtype: slot } = &mut self.class {
            *slot = Some(subtype);
        }
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    pub fn kind(&self) -> EntryKind {
        match self.class {
            EntryClass::Message { .. } => EntryKind::Message,
            EntryClass::System { .. } => EntryKind::System,
        }
    }

    pub fn is_message(&self) -> bool {
        self.kind() == EntryKind::Message
    }

    pub fn is_system(&self) -> bool {
        self.kind() == EntryKind::System
    }

    /// Sender display name; only message entries have one.
    pub fn sender(&self) -> Option<&str> {
        match &self.class {
            EntryClass::Message { sender, .. } => Some(sender),
            EntryClass::System { .. } => None,
        }
    }

    pub fn system_subtype(&self) -> Option<SystemSubtype> {
        match self.class {
            EntryClass::System { subtype } => subtype,
            EntryClass::Message { .. } => None,
        }
    }

    pub fn status(&self) -> Option<DeliveryStatus> {
        match self.class {
            EntryClass::Message { status, .. } => status,
            EntryClass::System { .. } => None,
        }
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        match &self.class {
            EntryClass::Message { attachment, .. } => attachment.as_ref(),
            EntryClass::System { .. } => None,
        }
    }

    /// Appends one physical continuation line to the body.
    pub(crate) fn push_continuation(&mut self, line: &str) {
        if self.message.is_empty() {
            self.message.push_str(line);
        } else {
            self.message.push('\n');
            self.message.push_str(line);
        }
    }

    /// Records a blank line inside the body.
    pub(crate) fn push_blank_line(&mut self) {
        self.message.push('\n');
    }
}
