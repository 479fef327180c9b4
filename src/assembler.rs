//! Line-by-line entry assembly.
//!
//! [`EntryAssembler`] is a two-state machine: either no entry is open, or one
//! entry is open and receives continuation lines. A timestamp line closes the
//! open entry (handing it back to the caller) and opens a new one.
//!
//! Nothing here fails on malformed input. Lines before the first timestamp
//! are dropped and unparseable timestamps degrade to their text.
//!
//! # Example
//!
//! ```
//! use chatscope::assembler::parse_str;
//! use chatscope::entry::EntryKind;
//!
//! let entries = parse_str("1/2/24, 10:00 - Alice: Hello\nworld");
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].sender(), Some("Alice"));
//! assert_eq!(entries[0].message, "Hello\nworld");
//! assert_eq!(entries[0].kind(), EntryKind::Message);
//! ```

use tracing::debug;

use crate::entry::ChatEntry;
use crate::parsing::{TimestampLine, classify_entry};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Stateful driver turning physical lines into finished entries.
#[derive(Debug, Default)]
pub struct EntryAssembler {
    open: Option<ChatEntry>,
}

impl EntryAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while an entry is being assembled.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Feeds one physical line (without its line terminator).
    ///
    /// Returns the previously open entry when `line` starts a new one.
    pub fn push_line(&mut self, line: &str) -> Option<ChatEntry> {
        if line.is_empty() {
            if let Some(entry) = self.open.as_mut() {
                entry.push_blank_line();
            }
            return None;
        }

        let line = line.trim_start_matches(BYTE_ORDER_MARK);

        if let Some(anchor) = TimestampLine::parse(line) {
            return self.open.replace(build_entry(&anchor));
        }

        match self.open.as_mut() {
            Some(entry) => entry.push_continuation(line),
            None => debug!(line, "dropping line before first timestamp"),
        }
        None
    }

    /// Closes and returns the open entry at end of input.
    pub fn finish(&mut self) -> Option<ChatEntry> {
        self.open.take()
    }
}

fn build_entry(anchor: &TimestampLine<'_>) -> ChatEntry {
    let timestamp_text = anchor.timestamp_text();
    let timestamp = anchor.normalized();
    if timestamp.is_none() {
        debug!(%timestamp_text, "timestamp did not normalize, keeping text only");
    }

    let (class, body) = classify_entry(anchor.content);

    ChatEntry {
        timestamp,
        timestamp_text,
        message: body.to_string(),
        class,
    }
}

/// Iterator adapter yielding finished entries from a line iterator.
///
/// Holds at most one open entry, so memory stays bounded by the longest entry.
#[derive(Debug)]
pub struct Entries<I> {
    lines: I,
    assembler: EntryAssembler,
    done: bool,
}

impl<I> Entries<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            assembler: EntryAssembler::new(),
            done: false,
        }
    }
}

impl<I, S> Iterator for Entries<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = ChatEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for line in self.lines.by_ref() {
            if let Some(entry) = self.assembler.push_line(line.as_ref()) {
                return Some(entry);
            }
        }

        self.done = true;
        self.assembler.finish()
    }
}

/// Lazily assembles entries from any sequence of lines.
pub fn entries<I>(lines: I) -> Entries<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Entries::new(lines.into_iter())
}

/// Assembles all entries from a sequence of lines.
pub fn parse_lines<I>(lines: I) -> Vec<ChatEntry>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries(lines).collect()
}

/// Assembles all entries from transcript text.
pub fn parse_str(text: &str) -> Vec<ChatEntry> {
    parse_lines(text.lines())
}
