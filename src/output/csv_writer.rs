//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::ISO_TIMESTAMP;
use crate::config::OutputConfig;
use crate::entry::ChatEntry;
use crate::error::Result;

const HEADER: [&str; 5] = ["Timestamp", "Sender", "Type", "Subtype", "Message"];

/// Writes entries to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Sender`, `Type`, `Subtype`, `Message`
/// - Timestamp is ISO when normalized, otherwise the original text
/// - Sender and Subtype are empty when absent
/// - Encoding: UTF-8
pub fn write_csv(entries: &[ChatEntry], output_path: &Path, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, entries, config)
}

/// Converts entries to a CSV string.
pub fn to_csv(entries: &[ChatEntry], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, entries, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(out: W, entries: &[ChatEntry], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(HEADER)?;
    for entry in entries {
        writer.write_record(build_record(entry, config))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_record(entry: &ChatEntry, config: &OutputConfig) -> [String; 5] {
    let timestamp = entry.timestamp.map_or_else(
        || entry.timestamp_text.clone(),
        |ts| ts.format(ISO_TIMESTAMP).to_string(),
    );
    let subtype = entry
        .system_subtype()
        .filter(|_| config.include_facts)
        .map(|s| s.as_str().to_string())
        .unwrap_or_default();

    [
        timestamp,
        entry.sender().unwrap_or_default().to_string(),
        entry.kind().as_str().to_string(),
        subtype,
        entry.message.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::parse_str;
    use tempfile::NamedTempFile;

    #[test]
    fn test_to_csv_basic() {
        let entries = parse_str("1/2/24, 10:00 - Alice: Hello\n1/2/24, 10:01 - Carol left");
        let csv = to_csv(&entries, &OutputConfig::new()).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Timestamp;Sender;Type;Subtype;Message"));
        assert_eq!(lines.next(), Some("2024-02-01T10:00:00;Alice;message;;Hello"));
        assert_eq!(lines.next(), Some("2024-02-01T10:01:00;;system;text_leave;Carol left"));
    }

    #[test]
    fn test_csv_unparsed_timestamp_and_quoting() {
        let entries = parse_str("1/13/24, 10:00 - Alice: a; b\nc");
        let csv = to_csv(&entries, &OutputConfig::new().with_facts(false)).unwrap();
        assert!(csv.contains("1/13/24, 10:00;Alice;message;;\"a; b\nc\""));
    }

    #[test]
    fn test_write_csv_file() {
        let entries = parse_str("1/2/24, 10:00 - Alice: Hello");
        let temp_file = NamedTempFile::new().unwrap();

        write_csv(&entries, temp_file.path(), &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.starts_with("Timestamp;Sender;Type;Subtype;Message"));
        assert!(content.contains("Alice;message"));
    }
}
