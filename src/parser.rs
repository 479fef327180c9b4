//! Transcript loading.
//!
//! [`TranscriptParser`] reads an exported chat transcript either fully into
//! memory or as a lazy stream of entries. Both paths feed the same
//! [`EntryAssembler`], so they produce identical entries.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatscope::Result<()> {
//! use chatscope::parser::TranscriptParser;
//! use std::path::Path;
//!
//! let parser = TranscriptParser::new();
//!
//! // Load everything
//! let entries = parser.parse(Path::new("chat.txt"))?;
//!
//! // Or stream large exports
//! for entry in parser.stream(Path::new("chat.txt"))? {
//!     let entry = entry?;
//!     println!("{}: {}", entry.sender().unwrap_or("[system]"), entry.message);
//! }
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::assembler::{EntryAssembler, parse_str};
use crate::config::ParserConfig;
use crate::entry::ChatEntry;
use crate::error::{ChatscopeError, Result};

/// Loader for exported chat transcripts.
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ParserConfig,
}

impl TranscriptParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Creates a parser with streaming-optimized defaults.
    pub fn with_streaming() -> Self {
        Self::with_config(ParserConfig::streaming())
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses a whole transcript file.
    ///
    /// With `streaming` enabled this delegates to [`stream`](Self::stream)
    /// and collects, so peak memory stays bounded by the entry list.
    pub fn parse(&self, path: &Path) -> Result<Vec<ChatEntry>> {
        if self.config.streaming {
            return self.stream(path)?.collect();
        }

        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|e| ChatscopeError::utf8_in(path, e))?;
        let entries = self.parse_str(&content);
        info!(path = %path.display(), entries = entries.len(), "loaded transcript");
        Ok(entries)
    }

    /// Parses transcript text already in memory.
    pub fn parse_str(&self, content: &str) -> Vec<ChatEntry> {
        let mut entries = parse_str(content);
        if self.config.skip_system {
            entries.retain(ChatEntry::is_message);
        }
        entries
    }

    /// Opens a transcript file for lazy, line-by-line parsing.
    pub fn stream(&self, path: &Path) -> Result<EntryStream<BufReader<File>>> {
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        info!(path = %path.display(), bytes = file_size, "streaming transcript");

        Ok(EntryStream::new(reader, &self.config).with_total_bytes(file_size))
    }

    /// Parses from any buffered reader.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Vec<ChatEntry>> {
        EntryStream::new(reader, &self.config).collect()
    }
}

/// Lazy iterator over entries read from a buffered reader.
///
/// Yields `Err` once if the reader fails (including invalid UTF-8) and then
/// stops.
pub struct EntryStream<R: BufRead> {
    reader: R,
    line_buffer: String,
    assembler: EntryAssembler,
    skip_system: bool,
    bytes_read: u64,
    total_bytes: Option<u64>,
    finished: bool,
}

impl<R: BufRead> EntryStream<R> {
    pub fn new(reader: R, config: &ParserConfig) -> Self {
        Self {
            reader,
            line_buffer: String::with_capacity(4096),
            assembler: EntryAssembler::new(),
            skip_system: config.skip_system,
            bytes_read: 0,
            total_bytes: None,
            finished: false,
        }
    }

    #[must_use]
    pub fn with_total_bytes(mut self, total: u64) -> Self {
        self.total_bytes = Some(total);
        self
    }

    /// Returns the progress as a percentage (0.0 - 100.0), if the size is known.
    pub fn progress(&self) -> Option<f64> {
        self.total_bytes.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.bytes_read as f64 / total as f64) * 100.0
            }
        })
    }

    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    fn keep(&self, entry: &ChatEntry) -> bool {
        !(self.skip_system && entry.is_system())
    }
}

impl<R: BufRead> Iterator for EntryStream<R> {
    type Item = Result<ChatEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => {
                    self.finished = true;
                    match self.assembler.finish() {
                        Some(entry) if self.keep(&entry) => return Some(Ok(entry)),
                        _ => return None,
                    }
                }
                Ok(bytes) => {
                    self.bytes_read += bytes as u64;
                    let line = self
                        .line_buffer
                        .strip_suffix('\n')
                        .map_or(self.line_buffer.as_str(), |l| {
                            l.strip_suffix('\r').unwrap_or(l)
                        });
                    if let Some(entry) = self.assembler.push_line(line) {
                        if self.keep(&entry) {
                            return Some(Ok(entry));
                        }
                    }
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
