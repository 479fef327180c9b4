//! Timestamp grammar and normalization.
//!
//! Every chat entry starts with a line of the form
//! `D/M/Y, H:MM[ AM|PM] - <content>`. Lines that do not match are
//! continuation candidates, never errors.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

fn message_start_re() -> &'static Regex {
    static MESSAGE_START_RE: OnceLock<Regex> = OnceLock::new();
    MESSAGE_START_RE.get_or_init(|| {
        Regex::new(
            r"^(?P<date>\d{1,2}/\d{1,2}/\d{2,4}), (?P<time>\d{1,2}:\d{2})(?: (?P<period>AM|PM|am|pm))? - (?P<content>.*)$",
        )
        .expect("valid message start regex")
    })
}

/// Raw captures of a timestamp-anchored line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampLine<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub period: Option<&'a str>,
    /// Everything after the first `" - "` separator, verbatim.
    pub content: &'a str,
}

impl<'a> TimestampLine<'a> {
    /// Matches `line` against the anchored timestamp grammar.
    ///
    /// Returns `None` for continuation lines.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = message_start_re().captures(line)?;
        Some(Self {
            date: caps.name("date")?.as_str(),
            time: caps.name("time")?.as_str(),
            period: caps.name("period").map(|m| m.as_str()),
            content: caps.name("content").map_or("", |m| m.as_str()),
        })
    }

    /// Original textual timestamp (see [`timestamp_text`]).
    pub fn timestamp_text(&self) -> String {
        timestamp_text(self.date, self.time, self.period)
    }

    /// Normalized timestamp (see [`normalize_timestamp`]).
    pub fn normalized(&self) -> Option<NaiveDateTime> {
        normalize_timestamp(self.date, self.time, self.period)
    }
}

/// Renders `"<date>, <time>[ <PERIOD>]"` with the period upper-cased.
pub fn timestamp_text(date: &str, time: &str, period: Option<&str>) -> String {
    match period {
        Some(period) => format!("{date}, {time} {}", period.to_uppercase()),
        None => format!("{date}, {time}"),
    }
}

/// Day/month/year formats, two-digit year first.
const PERIOD_FORMATS: &[&str] = &["%d/%m/%y %I:%M %p", "%d/%m/%Y %I:%M %p"];
const CLOCK_FORMATS: &[&str] = &["%d/%m/%y %H:%M", "%d/%m/%Y %H:%M"];

/// Converts raw date/time fragments into a naive local timestamp.
///
/// A period marker selects the 12-hour formats, otherwise the 24-hour ones are
/// used. Returns `None` if no format matches; callers fall back to the
/// timestamp text.
pub fn normalize_timestamp(date: &str, time: &str, period: Option<&str>) -> Option<NaiveDateTime> {
    let (text, formats) = match period {
        Some(period) => (
            format!("{date} {time} {}", period.to_uppercase()),
            PERIOD_FORMATS,
        ),
        None => (format!("{date} {time}"), CLOCK_FORMATS),
    };

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&text, fmt).ok())
}
