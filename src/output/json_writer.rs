//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::EntryRecord;
use crate::config::OutputConfig;
use crate::entry::ChatEntry;
use crate::error::Result;

/// Writes entries to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2024-02-01T10:00:00", "timestamp_text": "1/2/24, 10:00", "sender": "Alice", "message": "Hello", "type": "message"}
/// ]
/// ```
pub fn write_json(entries: &[ChatEntry], output_path: &Path, config: &OutputConfig) -> Result<()> {
    let json = to_json(entries, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts entries to a JSON array string.
///
/// Compact unless `config.pretty` is set.
pub fn to_json(entries: &[ChatEntry], config: &OutputConfig) -> Result<String> {
    let records: Vec<EntryRecord<'_>> = entries
        .iter()
        .map(|e| EntryRecord::from_entry(e, config))
        .collect();

    let json = if config.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    Ok(json)
}
