//! System-notice detection and the content classifier.
//!
//! Content is what follows `" - "` on a timestamp line. It is either a system
//! notice (joins, group changes, encryption banner...) or `sender: body`.

use std::sync::OnceLock;

use regex::Regex;

/// Sentinel prefixes of system notices, matched after trimming leading whitespace.
pub const SYSTEM_PREFIXES: &[&str] = &[
    "Messages and calls are end-to-end encrypted",
    "You created the group",
    "You changed",
    "You added",
    "You removed",
    "You left",
    "You invited",
    "You deleted",
    "You turned",
    "You blocked",
    "You unblocked",
    "You made",
    "You enabled",
    "You disabled",
    "You accepted",
    "You rejected",
    "You reported",
    "You requested",
    "You sent",
];

fn system_patterns() -> &'static [Regex] {
    static SYSTEM_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    SYSTEM_PATTERNS.get_or_init(|| {
        [
            r"(?i)\bjoined using a group link\.?$",
            r"(?i)\bjoined using your invite\.?$",
            r"(?i)\bjoined from the community\.?$",
            r"(?i)\brequested to join\.?$",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid system pattern regex"))
        .collect()
    })
}

/// Returns `true` if `content` reads like a system notice.
///
/// Empty content never matches.
pub fn is_system_content(content: &str) -> bool {
    let stripped = content.trim_start();
    if stripped.is_empty() {
        return false;
    }
    SYSTEM_PREFIXES
        .iter()
        .any(|prefix| stripped.starts_with(prefix))
        || system_patterns().iter().any(|re| re.is_match(stripped))
}

const SENDER_DELIMITER: &str = ": ";

/// Result of classifying the content of a timestamp line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified<'a> {
    /// `sender: body` where the body is not a system notice.
    Message { sender: &'a str, body: &'a str },
    /// System notice. The entry body is always the full `content`.
    ///
    /// `origin_sender` / `origin_body` keep the split parts when the notice was
    /// only recognised after splitting, so the subtype classifier can still see
    /// who it was attributed to.
    System {
        content: &'a str,
        origin_sender: Option<&'a str>,
        origin_body: &'a str,
    },
}

impl Classified<'_> {
    pub fn is_system(&self) -> bool {
        matches!(self, Classified::System { .. })
    }
}

/// Decides the kind and sender of a timestamp line's content.
///
/// 1. Content that is itself a system notice is a system entry.
/// 2. Otherwise content is split at the first `": "`; if the body is a system
///    notice the whole entry is still system, else it is a message.
/// 3. Content with no delimiter is unattributed system text.
pub fn classify_content(content: &str) -> Classified<'_> {
    if is_system_content(content) {
        return Classified::System {
            content,
            origin_sender: None,
            origin_body: content,
        };
    }

    match content.split_once(SENDER_DELIMITER) {
        Some((sender, body)) if is_system_content(body) => Classified::System {
            content,
            origin_sender: Some(sender),
            origin_body: body,
        },
        Some((sender, body)) => Classified::Message { sender, body },
        None => Classified::System {
            content,
            origin_sender: None,
            origin_body: content,
        },
    }
}
