//! Output format selection.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatscope::Result<()> {
//! use chatscope::assembler::parse_str;
//! use chatscope::config::OutputConfig;
//! use chatscope::format::{OutputFormat, write_to_format};
//! use std::path::Path;
//!
//! let entries = parse_str("1/2/24, 10:00 - Alice: Hello");
//!
//! write_to_format(&entries, Path::new("chat.csv"), OutputFormat::Csv, &OutputConfig::new())?;
//!
//! // Or detect the format from the extension
//! let format = OutputFormat::from_path("chat.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::OutputConfig;
use crate::entry::ChatEntry;
use crate::error::ChatscopeError;

/// Serialized output format for parsed entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// JSON array of entries (default)
    #[default]
    Json,

    /// JSON Lines - one entry per line
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Jsonl, OutputFormat::Csv]
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatscope::format::OutputFormat;
    ///
    /// let format = OutputFormat::from_path("output.jsonl").unwrap();
    /// assert_eq!(format, OutputFormat::Jsonl);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatscopeError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ChatscopeError::invalid_format(
                "output",
                format!(
                    "Unknown file extension: '.{}'. Expected one of: json, jsonl, csv",
                    ext
                ),
            )),
        }
    }

    fn required_feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn missing_feature(format: OutputFormat) -> ChatscopeError {
    ChatscopeError::invalid_format(
        "output",
        format!(
            "Output format {:?} requires the '{}' feature to be enabled",
            format,
            format.required_feature()
        ),
    )
}

/// Writes entries to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    entries: &[ChatEntry],
    path: &Path,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), ChatscopeError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::output::write_json(entries, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::output::write_jsonl(entries, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::write_csv(entries, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts entries to a string in the specified format.
#[allow(unused_variables)]
pub fn to_format_string(
    entries: &[ChatEntry],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, ChatscopeError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::output::to_json(entries, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::output::to_jsonl(entries, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::to_csv(entries, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}
