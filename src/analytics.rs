//! Aggregate statistics over parsed entries.
//!
//! Message-level counters look at message entries only. System entries feed
//! `total_system` and `join_events`.
//!
//! # Example
//!
//! ```rust
//! use chatscope::analytics::ChatAnalytics;
//! use chatscope::assembler::parse_str;
//!
//! let entries = parse_str("1/2/24, 10:00 - Alice: Hello\n1/2/24, 11:00 - Bob: https://example.com");
//! let stats = ChatAnalytics::from_entries(&entries);
//! assert_eq!(stats.total_messages, 2);
//! assert_eq!(stats.link_count, 1);
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::entry::ChatEntry;

const MEDIA_MARKER: &str = "<Media omitted>";
const POLL_PREFIX: &str = "POLL:";
const ISO_DATE: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderCount {
    pub sender: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyCount {
    pub week: String,
    pub count: usize,
}

/// Mean message length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Averages {
    pub characters: f64,
    pub words: f64,
}

/// Summary statistics for one transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatAnalytics {
    pub total_entries: usize,
    pub total_messages: usize,
    pub total_system: usize,
    pub unique_senders: usize,
    pub date_range: DateRange,
    /// Descending by count; ties keep first-appearance order.
    pub top_senders: Vec<SenderCount>,
    pub daily_counts: Vec<DailyCount>,
    /// Always 24 buckets.
    pub hourly_distribution: Vec<HourlyCount>,
    pub weekly_counts: Vec<WeeklyCount>,
    pub averages: Averages,
    pub media_count: usize,
    /// Messages carrying attachment facts.
    pub attachment_count: usize,
    /// Sum of the attachment sizes that state one, in bytes.
    pub attachment_bytes: f64,
    pub link_count: usize,
    pub poll_count: usize,
    pub join_events: usize,
}

impl ChatAnalytics {
    pub fn from_entries(entries: &[ChatEntry]) -> Self {
        let messages: Vec<&ChatEntry> = entries.iter().filter(|e| e.is_message()).collect();
        let total_system = entries.len() - messages.len();

        let top_senders = count_senders(&messages);

        let mut daily: BTreeMap<String, usize> = BTreeMap::new();
        let mut hourly = [0usize; 24];
        let mut weekly: BTreeMap<String, usize> = BTreeMap::new();
        let mut first: Option<NaiveDateTime> = None;
        let mut last: Option<NaiveDateTime> = None;

        for entry in &messages {
            let day = match entry.timestamp {
                Some(ts) => ts.format(ISO_DATE).to_string(),
                None => date_part(&entry.timestamp_text).to_string(),
            };
            *daily.entry(day).or_default() += 1;

            let Some(ts) = entry.timestamp else {
                continue;
            };
            hourly[ts.hour() as usize] += 1;

            let week = ts.iso_week();
            *weekly
                .entry(format!("{}-W{:02}", week.year(), week.week()))
                .or_default() += 1;

            first = Some(first.map_or(ts, |f| f.min(ts)));
            last = Some(last.map_or(ts, |l| l.max(ts)));
        }

        Self {
            total_entries: entries.len(),
            total_messages: messages.len(),
            total_system,
            unique_senders: top_senders.len(),
            date_range: DateRange {
                start: first.map(|ts| ts.format(ISO_DATE).to_string()),
                end: last.map(|ts| ts.format(ISO_DATE).to_string()),
            },
            top_senders,
            daily_counts: daily
                .into_iter()
                .map(|(date, count)| DailyCount { date, count })
                .collect(),
            hourly_distribution: (0u32..)
                .zip(hourly)
                .map(|(hour, count)| HourlyCount { hour, count })
                .collect(),
            weekly_counts: weekly
                .into_iter()
                .map(|(week, count)| WeeklyCount { week, count })
                .collect(),
            averages: averages(&messages),
            media_count: count_bodies(&messages, |m| m.contains(MEDIA_MARKER)),
            attachment_count: messages.iter().filter(|e| e.attachment().is_some()).count(),
            attachment_bytes: messages
                .iter()
                .filter_map(|e| e.attachment()?.size.as_ref()?.bytes())
                .sum(),
            link_count: count_bodies(&messages, |m| {
                m.contains("http://") || m.contains("https://")
            }),
            poll_count: count_bodies(&messages, |m| m.starts_with(POLL_PREFIX)),
            join_events: entries
                .iter()
                .filter(|e| e.is_system() && e.message.contains("joined"))
                .count(),
        }
    }

    /// The `n` most active senders.
    pub fn top(&self, n: usize) -> &[SenderCount] {
        &self.top_senders[..n.min(self.top_senders.len())]
    }
}

fn date_part(timestamp_text: &str) -> &str {
    timestamp_text
        .split_once(',')
        .map_or(timestamp_text, |(date, _)| date)
}

fn count_senders(messages: &[&ChatEntry]) -> Vec<SenderCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<SenderCount> = Vec::new();

    for sender in messages.iter().filter_map(|e| e.sender()) {
        if sender.is_empty() {
            continue;
        }
        match index.get(sender) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(sender, counts.len());
                counts.push(SenderCount {
                    sender: sender.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-appearance order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn averages(messages: &[&ChatEntry]) -> Averages {
    if messages.is_empty() {
        return Averages::default();
    }
    let n = messages.len() as f64;
    let chars: usize = messages.iter().map(|e| e.message.chars().count()).sum();
    let words: usize = messages
        .iter()
        .map(|e| e.message.split_whitespace().count())
        .sum();
    Averages {
        characters: chars as f64 / n,
        words: words as f64 / n,
    }
}

fn count_bodies(messages: &[&ChatEntry], predicate: impl Fn(&str) -> bool) -> usize {
    messages.iter().filter(|e| predicate(&e.message)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::parse_str;

    const CHAT: &str = "\
1/2/24, 10:00 - Messages and calls are end-to-end encrypted.
1/2/24, 10:05 - Alice: Hello there
1/2/24, 10:06 - Bob: <Media omitted>
1/2/24, 22:15 - Alice: https://example.com
8/2/24, 09:00 - Carol joined using a group link
8/2/24, 09:01 - Bob: POLL:
Lunch?
31/2/24, 12:00 - Carol: broken date
";

    #[test]
    fn test_totals() {
        let stats = ChatAnalytics::from_entries(&parse_str(CHAT));
        assert_eq!(stats.total_entries, 7);
        assert_eq!(stats.total_messages, 5);
        assert_eq!(stats.total_system, 2);
        assert_eq!(stats.unique_senders, 3);
        assert_eq!(stats.join_events, 1);
    }

    #[test]
    fn test_top_senders_ties_keep_first_appearance() {
        let stats = ChatAnalytics::from_entries(&parse_str(CHAT));
        let names: Vec<(&str, usize)> = stats
            .top_senders
            .iter()
            .map(|s| (s.sender.as_str(), s.count))
            .collect();
        assert_eq!(names, vec![("Alice", 2), ("Bob", 2), ("Carol", 1)]);
        assert_eq!(stats.top(1).len(), 1);
        assert_eq!(stats.top(10).len(), 3);
    }

    #[test]
    fn test_daily_counts_fall_back_to_text() {
        let stats = ChatAnalytics::from_entries(&parse_str(CHAT));
        let days: Vec<(&str, usize)> = stats
            .daily_counts
            .iter()
            .map(|d| (d.date.as_str(), d.count))
            .collect();
        assert_eq!(
            days,
            vec![("2024-02-01", 3), ("2024-02-08", 1), ("31/2/24", 1)]
        );
    }

    #[test]
    fn test_hourly_and_weekly() {
        let stats = ChatAnalytics::from_entries(&parse_str(CHAT));
        assert_eq!(stats.hourly_distribution.len(), 24);
        assert_eq!(stats.hourly_distribution[10].count, 2);
        assert_eq!(stats.hourly_distribution[22].count, 1);
        assert_eq!(stats.hourly_distribution[9].count, 1);

        let weeks: Vec<&str> = stats.weekly_counts.iter().map(|w| w.week.as_str()).collect();
        assert_eq!(weeks, vec!["2024-W05", "2024-W06"]);
    }

    #[test]
    fn test_date_range_ignores_unparsed() {
        let stats = ChatAnalytics::from_entries(&parse_str(CHAT));
        assert_eq!(stats.date_range.start.as_deref(), Some("2024-02-01"));
        assert_eq!(stats.date_range.end.as_deref(), Some("2024-02-08"));
    }

    #[test]
    fn test_content_counters() {
        let stats = ChatAnalytics::from_entries(&parse_str(CHAT));
        assert_eq!(stats.media_count, 1);
        assert_eq!(stats.link_count, 1);
        assert_eq!(stats.poll_count, 1);
    }

    #[test]
    fn test_attachment_totals() {
        let entries = parse_str(
            "1/2/24, 10:00 - Alice: photo.jpg (1.5 KB)\n\
             1/2/24, 10:01 - Bob: report.pdf (2 KB)\n\
             1/2/24, 10:02 - Carol: <Media omitted>\n\
             1/2/24, 10:03 - Dave: Hello",
        );
        let stats = ChatAnalytics::from_entries(&entries);
        assert_eq!(stats.attachment_count, 3);
        assert!((stats.attachment_bytes - 3584.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input() {
        let stats = ChatAnalytics::from_entries(&[]);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.averages, Averages::default());
        assert_eq!(stats.date_range, DateRange::default());
        assert!(stats.top_senders.is_empty());
        assert_eq!(stats.hourly_distribution.len(), 24);
    }

    #[test]
    fn test_averages() {
        let entries = parse_str("1/2/24, 10:00 - Alice: one two\n1/2/24, 10:01 - Bob: ñ");
        let stats = ChatAnalytics::from_entries(&entries);
        assert!((stats.averages.characters - 4.0).abs() < f64::EPSILON);
        assert!((stats.averages.words - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serializes_series_shape() {
        let stats = ChatAnalytics::from_entries(&parse_str(CHAT));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["hourly_distribution"][0]["hour"], 0);
        assert_eq!(json["top_senders"][0]["sender"], "Alice");
        assert!(json["date_range"]["start"].is_string());
    }
}
