//! # Chatscope
//!
//! A Rust library for parsing exported chat transcripts into typed entries.
//!
//! ## Overview
//!
//! A transcript is a plain-text export where each entry starts with a
//! timestamp line such as `1/2/24, 10:00 - Alice: Hello` and may continue
//! over the following lines. Chatscope:
//!
//! - assembles physical lines into entries, keeping multi-line bodies intact
//! - distinguishes user messages from system notices (joins, group changes,
//!   deletions...) and tags notices with a [`SystemSubtype`](entry::SystemSubtype)
//! - extracts delivery status and attachment facts from message bodies
//! - normalizes timestamps when possible, keeping the original text always
//! - computes aggregate [`ChatAnalytics`](analytics::ChatAnalytics)
//! - writes JSON, JSONL or CSV
//!
//! Parsing never fails on malformed content. Only I/O and serialization can
//! return errors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatscope::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let entries = TranscriptParser::new().parse("chat.txt".as_ref())?;
//!
//!     for entry in &entries {
//!         match entry.sender() {
//!             Some(sender) => println!("{sender}: {}", entry.message),
//!             None => println!("[system] {}", entry.message),
//!         }
//!     }
//!
//!     let config = OutputConfig::new().with_pretty(true);
//!     write_to_format(&entries, "chat.json".as_ref(), OutputFormat::Json, &config)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing from memory
//!
//! ```rust
//! use chatscope::assembler::parse_str;
//! use chatscope::entry::SystemSubtype;
//!
//! let entries = parse_str("1/2/24, 10:00 - Bob joined using a group link");
//! assert_eq!(entries[0].system_subtype(), Some(SystemSubtype::TextJoin));
//! ```
//!
//! ## Module Structure
//!
//! - [`entry`] - [`ChatEntry`] and its classification types
//! - [`parsing`] - timestamp grammar, classifiers and fact extractors
//! - [`assembler`] - line-by-line entry assembly
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), file and stream loading
//! - [`analytics`] - aggregate statistics
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`OutputConfig`](config::OutputConfig)
//! - [`output`] / [`format`] - JSON, JSONL and CSV writers
//! - [`error`] - [`ChatscopeError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod analytics;
pub mod assembler;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod output;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use entry::ChatEntry;
pub use error::{ChatscopeError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatscope::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ChatEntry;
    pub use crate::analytics::ChatAnalytics;
    pub use crate::assembler::{EntryAssembler, parse_lines, parse_str};
    pub use crate::config::{OutputConfig, ParserConfig};
    pub use crate::entry::{
        Attachment, DeliveryStatus, EntryClass, EntryKind, FileSize, SizeUnit, SystemSubtype,
    };
    pub use crate::error::{ChatscopeError, Result};
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    pub use crate::parser::{EntryStream, TranscriptParser};

    #[cfg(feature = "csv-output")]
    pub use crate::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, to_jsonl, write_json, write_jsonl};
}
