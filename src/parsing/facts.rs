//! Secondary facts extracted from message bodies.
//!
//! Both extractors are pure: they read the body and return new values.

use std::sync::OnceLock;

use regex::Regex;

use crate::entry::{Attachment, DeliveryStatus, FileSize, SizeUnit};

fn status_patterns() -> &'static [(Regex, DeliveryStatus)] {
    static STATUS_PATTERNS: OnceLock<Vec<(Regex, DeliveryStatus)>> = OnceLock::new();
    STATUS_PATTERNS.get_or_init(|| {
        [
            (r"\bwaiting for this message\b", DeliveryStatus::WaitingForMessage),
            (r"\bmissed voice call\b", DeliveryStatus::MissedVoiceCall),
            (r"\byou deleted this message\b", DeliveryStatus::DeletedBySender),
            (r"\bthis message was deleted\b", DeliveryStatus::Deleted),
        ]
        .into_iter()
        .map(|(pattern, status)| (Regex::new(pattern).expect("valid status regex"), status))
        .collect()
    })
}

/// Returns the first delivery status whose phrase occurs in the lower-cased body.
pub fn extract_status(body: &str) -> Option<DeliveryStatus> {
    let lower = body.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    status_patterns()
        .iter()
        .find(|(re, _)| re.is_match(&lower))
        .map(|&(_, status)| status)
}

fn filename_re() -> &'static Regex {
    static FILENAME_RE: OnceLock<Regex> = OnceLock::new();
    FILENAME_RE.get_or_init(|| {
        Regex::new(
            r#"(?i)([^\s/\\:*?"<>|()]+\.(?:jpe?g|png|gif|webp|heic|mp4|mov|mkv|avi|3gp|mp3|m4a|aac|wav|opus|ogg|pdf|docx?|pptx?|xlsx?|xlsm|csv|txt|zip|rar|7z|vcf|apk))\b"#,
        )
        .expect("valid filename regex")
    })
}

fn size_re() -> &'static Regex {
    static SIZE_RE: OnceLock<Regex> = OnceLock::new();
    SIZE_RE.get_or_init(|| {
        Regex::new(r"(?i)\((\d+(?:[.,]\d+)?)\s?(KB|MB|GB)\)").expect("valid size regex")
    })
}

fn duration_re() -> &'static Regex {
    static DURATION_RE: OnceLock<Regex> = OnceLock::new();
    DURATION_RE.get_or_init(|| {
        Regex::new(
            r"(?P<open>\()?\b(?:(?P<hours>\d{1,2}):)?(?P<minutes>\d{1,2}):(?P<seconds>\d{2})\b(?P<close>\))?",
        )
        .expect("valid duration regex")
    })
}

/// Generic attachment markers and the note recorded when no filename is present.
const ATTACHMENT_MARKERS: &[(&str, &str)] = &[
    ("(file attached)", "file attached"),
    ("<media omitted>", "media omitted"),
];

/// Extracts filename, size, duration and marker facts from a message body.
///
/// Returns `None` when the body carries none of them.
pub fn extract_attachment(body: &str) -> Option<Attachment> {
    let filename = filename_re()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let size = size_re().captures(body).and_then(|caps| {
        let unit = SizeUnit::parse(caps.get(2)?.as_str())?;
        Some(FileSize::new(caps.get(1)?.as_str(), unit))
    });

    let lower = body.to_lowercase();
    let marker_note = ATTACHMENT_MARKERS
        .iter()
        .find(|(marker, _)| lower.contains(marker))
        .map(|&(_, note)| note.to_string());

    let duration = extract_duration(body, filename.is_some() || marker_note.is_some());

    let attachment = Attachment {
        note: marker_note.filter(|_| filename.is_none()),
        filename,
        size,
        duration,
    };

    (!attachment.is_empty()).then_some(attachment)
}

/// Finds a `[H:]MM:SS` duration.
///
/// A parenthesised duration always counts. A bare one counts only when the
/// body already names a file or carries an attachment marker.
fn extract_duration(body: &str, has_attachment: bool) -> Option<String> {
    duration_re().captures_iter(body).find_map(|caps| {
        let parenthesised = caps.name("open").is_some() && caps.name("close").is_some();
        if !(parenthesised || has_attachment) {
            return None;
        }
        let hours = caps
            .name("hours")
            .map_or(Some(0), |m| m.as_str().parse().ok())?;
        let minutes = caps.name("minutes")?.as_str().parse().ok()?;
        let seconds = caps.name("seconds")?.as_str().parse().ok()?;
        Some(format_duration(hours, minutes, seconds))
    })
}

/// Renders a duration, dropping leading zero components: `1h 2m 3s`, `2m 3s`, `5s`.
pub fn format_duration(hours: u32, minutes: u32, seconds: u32) -> String {
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
