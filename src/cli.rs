//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - Output format options
//! - [`render_summary`] - The human-readable report printed after parsing

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::analytics::ChatAnalytics;
use crate::config::{OutputConfig, ParserConfig};
use crate::entry::ChatEntry;

/// How many senders the summary lists.
pub const TOP_SENDERS: usize = 5;

/// Parse exported chat transcripts into typed entries, analytics and
/// JSON/CSV exports.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatscope")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatscope chat.txt
    chatscope chat.txt -o chat.json --pretty
    chatscope chat.txt -o chat.csv -f csv --skip-system
    chatscope chat.txt --show 20 --analytics analytics.json")]
pub struct Args {
    /// Path to the exported chat text file
    pub input: PathBuf,

    /// Write parsed entries to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print the first N parsed entries
    #[arg(long, value_name = "N")]
    pub show: Option<usize>,

    /// Write an analytics summary (pretty JSON) to this file
    #[arg(long, value_name = "PATH")]
    pub analytics: Option<PathBuf>,

    /// Drop system entries
    #[arg(long)]
    pub skip_system: bool,

    /// Read the input line by line
    #[arg(long)]
    pub streaming: bool,

    /// Omit subtype, status and attachment fields from output
    #[arg(long)]
    pub no_facts: bool,
}

impl Args {
    pub fn parser_config(&self) -> ParserConfig {
        let base = if self.streaming {
            ParserConfig::streaming()
        } else {
            ParserConfig::new()
        };
        base.with_skip_system(self.skip_system)
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new()
            .with_pretty(self.pretty)
            .with_facts(!self.no_facts)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum OutputFormat {
    /// JSON array of entries (default)
    #[default]
    Json,

    /// JSON Lines - one entry per line
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}

/// Renders the parse summary.
///
/// ```text
/// Parsed 4 entries (3 messages, 1 system events).
/// Top senders:
///   Alice: 2
///   Bob: 1
/// ```
///
/// With `show`, the first N entries follow as
/// `<timestamp_text> - <sender|[system]>: <body on one line>`.
pub fn render_summary(entries: &[ChatEntry], analytics: &ChatAnalytics, show: Option<usize>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Parsed {} entries ({} messages, {} system events).",
        entries.len(),
        analytics.total_messages,
        analytics.total_system
    );

    let top = analytics.top(TOP_SENDERS);
    if !top.is_empty() {
        out.push_str("Top senders:\n");
        for sender in top {
            let _ = writeln!(out, "  {}: {}", sender.sender, sender.count);
        }
    }

    if let Some(limit) = show.filter(|&n| n > 0) {
        let _ = writeln!(out, "\nFirst {limit} entries:");
        for entry in entries.iter().take(limit) {
            let _ = writeln!(
                out,
                "{} - {}: {}",
                entry.timestamp_text,
                entry.sender().unwrap_or("[system]"),
                entry.message.replace('\n', " ")
            );
        }
    }

    out
}
