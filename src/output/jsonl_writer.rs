//! JSON Lines (JSONL) output writer.
//!
//! One entry per line, so downstream tools can process exports record by
//! record without loading the whole array.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::EntryRecord;
use crate::config::OutputConfig;
use crate::entry::ChatEntry;
use crate::error::Result;

/// Writes entries to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"timestamp":"2024-02-01T10:00:00","timestamp_text":"1/2/24, 10:00","sender":"Alice","message":"Hello","type":"message"}
/// ```
///
/// `config.pretty` is ignored.
pub fn write_jsonl(entries: &[ChatEntry], output_path: &Path, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, entries, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts entries to a JSONL string.
pub fn to_jsonl(entries: &[ChatEntry], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, entries, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(writer: &mut W, entries: &[ChatEntry], config: &OutputConfig) -> Result<()> {
    for entry in entries {
        serde_json::to_writer(&mut *writer, &EntryRecord::from_entry(entry, config))?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::parse_str;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    const CHAT: &str = "1/2/24, 10:00 - Alice: Hello\nsecond line\n1/2/24, 10:01 - Bob: Hi";

    #[test]
    fn test_write_jsonl_basic() {
        let entries = parse_str(CHAT);
        let temp_file = NamedTempFile::new().unwrap();

        write_jsonl(&entries, temp_file.path(), &OutputConfig::new()).unwrap();

        let file = std::fs::File::open(temp_file.path()).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["sender"], "Alice");
        assert_eq!(first["message"], "Hello\nsecond line");

        let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["sender"], "Bob");
    }

    #[test]
    fn test_to_jsonl_ignores_pretty() {
        let entries = parse_str(CHAT);
        let text = to_jsonl(&entries, &OutputConfig::new().with_pretty(true)).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_to_jsonl_empty() {
        assert_eq!(to_jsonl(&[], &OutputConfig::new()).unwrap(), "");
    }
}
