//! Integration tests for transcript parsing with real files

use chatscope::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn group_chat() -> Vec<ChatEntry> {
    TranscriptParser::new()
        .parse(&fixture("group_chat.txt"))
        .unwrap()
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ============================================================================
// Fixture walkthrough
// ============================================================================

mod fixture_tests {
    use super::*;

    #[test]
    fn test_entry_counts() {
        let entries = group_chat();
        assert_eq!(entries.len(), 15);
        assert_eq!(entries.iter().filter(|e| e.is_message()).count(), 7);
        assert_eq!(entries.iter().filter(|e| e.is_system()).count(), 8);
    }

    #[test]
    fn test_preamble_dropped() {
        let entries = group_chat();
        assert!(entries[0].message.starts_with("Messages and calls are end-to-end encrypted"));
        assert_eq!(entries[0].system_subtype(), Some(SystemSubtype::TextSystem));
    }

    #[test]
    fn test_untagged_system_notice() {
        let entries = group_chat();
        assert_eq!(entries[1].message, "You created the group \"Book club\"");
        assert!(entries[1].is_system());
        assert!(entries[1].system_subtype().is_none());
    }

    #[test]
    fn test_multiline_message() {
        let entries = group_chat();
        assert_eq!(entries[2].sender(), Some("Alice"));
        assert_eq!(entries[2].message, "Hello\nworld");
        assert_eq!(
            entries[2].timestamp.unwrap().to_string(),
            "2024-02-01 10:00:00"
        );
    }

    #[test]
    fn test_join_notice() {
        let entries = group_chat();
        assert!(entries[3].sender().is_none());
        assert_eq!(entries[3].system_subtype(), Some(SystemSubtype::TextJoin));
        assert_eq!(entries[3].message, "Bob joined using a group link");
    }

    #[test]
    fn test_attachment_message() {
        let entries = group_chat();
        let attachment = entries[4].attachment().unwrap();
        assert_eq!(attachment.filename.as_deref(), Some("photo.jpg"));
        assert_eq!(attachment.size.as_ref().unwrap().to_string(), "1.2 MB");
    }

    #[test]
    fn test_deletion_reclassified() {
        let entries = group_chat();
        let deleted = &entries[5];
        assert!(deleted.is_system());
        assert!(deleted.sender().is_none());
        assert!(deleted.status().is_none());
        assert_eq!(deleted.system_subtype(), Some(SystemSubtype::TextDelete));
        assert_eq!(deleted.message, "Dave: This message was deleted");
    }

    #[test]
    fn test_blank_line_preserved() {
        let entries = group_chat();
        assert_eq!(entries[6].message, "First paragraph\n\nSecond paragraph");
    }

    #[test]
    fn test_missed_call_reclassified() {
        let entries = group_chat();
        assert!(entries[7].is_system());
        assert_eq!(entries[7].system_subtype(), Some(SystemSubtype::TextSystem));
        assert_eq!(entries[7].message, "Erin: Missed voice call");
    }

    #[test]
    fn test_twelve_hour_clock_and_inner_dash() {
        let entries = group_chat();
        let entry = &entries[8];
        assert_eq!(entry.timestamp_text, "1/2/24, 2:30 PM");
        assert_eq!(entry.timestamp.unwrap().to_string(), "2024-02-01 14:30:00");
        assert_eq!(entry.message, "Afternoon - with a dash");
    }

    #[test]
    fn test_four_digit_year_and_media_marker() {
        let entries = group_chat();
        let entry = &entries[9];
        assert_eq!(entry.timestamp.unwrap().to_string(), "2024-02-13 18:45:00");
        assert_eq!(
            entry.attachment().unwrap().note.as_deref(),
            Some("media omitted")
        );
    }

    #[test]
    fn test_poll_continuations() {
        let entries = group_chat();
        assert_eq!(
            entries[10].message,
            "POLL:\nWhere to meet?\nOPTION: Library (2 votes)"
        );
        assert!(entries[10].is_message());
    }

    #[test]
    fn test_unparseable_date_kept() {
        let entries = group_chat();
        assert!(entries[11].timestamp.is_none());
        assert_eq!(entries[11].timestamp_text, "1/13/24, 10:00");
        assert_eq!(entries[11].sender(), Some("Carol"));
    }

    #[test]
    fn test_membership_notices() {
        let entries = group_chat();
        assert_eq!(entries[12].system_subtype(), Some(SystemSubtype::TextRemove));
        assert_eq!(entries[12].message, "Admin: You removed Dave");
        assert_eq!(entries[13].system_subtype(), Some(SystemSubtype::TextLeave));
        assert_eq!(
            entries[14].system_subtype(),
            Some(SystemSubtype::MembershipApprovalRequest)
        );
    }

    #[test]
    fn test_sender_implies_message_kind() {
        for entry in group_chat() {
            assert_eq!(entry.sender().is_some(), entry.kind() == EntryKind::Message);
            if entry.is_system() {
                assert!(entry.status().is_none());
                assert!(entry.attachment().is_none());
            } else {
                assert!(entry.system_subtype().is_none());
            }
        }
    }
}

// ============================================================================
// Loader modes
// ============================================================================

mod loader_tests {
    use super::*;

    #[test]
    fn test_streaming_matches_in_memory() {
        let path = fixture("group_chat.txt");
        let loaded = TranscriptParser::new().parse(&path).unwrap();
        let streamed: Vec<ChatEntry> = TranscriptParser::with_streaming()
            .stream(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(loaded, streamed);
    }

    #[test]
    fn test_parse_str_matches_file() {
        let path = fixture("group_chat.txt");
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse_str(&text), group_chat());
    }

    #[test]
    fn test_skip_system_filters_after_assembly() {
        let config = ParserConfig::new().with_skip_system(true);
        let entries = TranscriptParser::with_config(config)
            .parse(&fixture("group_chat.txt"))
            .unwrap();
        assert_eq!(entries.len(), 7);
        // Assembly is unaffected: bodies still hold their continuations.
        assert_eq!(entries[0].message, "Hello\nworld");
    }

    #[test]
    fn test_byte_order_mark_file() {
        let file = write_temp("\u{feff}1/2/24, 10:00 - Alice: Hello\n");
        let entries = TranscriptParser::new().parse(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sender(), Some("Alice"));
        assert_eq!(entries[0].timestamp_text, "1/2/24, 10:00");
    }

    #[test]
    fn test_idempotent_parsing() {
        let parser = TranscriptParser::new();
        let path = fixture("group_chat.txt");
        assert_eq!(parser.parse(&path).unwrap(), parser.parse(&path).unwrap());
    }
}

// ============================================================================
// Analytics over the fixture
// ============================================================================

mod analytics_tests {
    use super::*;

    #[test]
    fn test_fixture_analytics() {
        let stats = ChatAnalytics::from_entries(&group_chat());

        assert_eq!(stats.total_entries, 15);
        assert_eq!(stats.total_messages, 7);
        assert_eq!(stats.total_system, 8);
        assert_eq!(stats.unique_senders, 3);
        assert_eq!(stats.top_senders[0].sender, "Alice");
        assert_eq!(stats.top_senders[0].count, 4);

        assert_eq!(stats.date_range.start.as_deref(), Some("2024-02-01"));
        assert_eq!(stats.date_range.end.as_deref(), Some("2024-02-13"));

        assert_eq!(stats.media_count, 1);
        assert_eq!(stats.poll_count, 1);
        assert_eq!(stats.link_count, 0);
        assert_eq!(stats.join_events, 1);
    }

    #[test]
    fn test_fixture_daily_fallback_key() {
        let stats = ChatAnalytics::from_entries(&group_chat());
        let keys: Vec<&str> = stats.daily_counts.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(keys, vec!["1/13/24", "2024-02-01", "2024-02-13"]);
    }
}

// ============================================================================
// Output round trips
// ============================================================================

#[cfg(feature = "json-output")]
mod output_integration {
    use super::*;

    #[test]
    fn test_json_output_from_fixture() {
        let entries = group_chat();
        let json = to_json(&entries, &OutputConfig::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = value.as_array().unwrap();

        assert_eq!(array.len(), 15);
        assert_eq!(array[5]["type"], "system");
        assert_eq!(array[5]["system_subtype"], "text_delete");
        assert!(array[5]["sender"].is_null());
        assert!(array[11]["timestamp"].is_null());
        assert_eq!(array[11]["timestamp_text"], "1/13/24, 10:00");
    }
}
