// src/extractors/record.rs
use std::collections::HashSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user agent recovered from the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAgentRecord {
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_info: Option<String>,
}

impl UserAgentRecord {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            share_percentage: None,
            device: None,
            browser_info: None,
        }
    }
}

/// Output shape of a record: the full object, or just the identifier string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserAgentEntry {
    Detailed(UserAgentRecord),
    Bare(String),
}

/// Selects the output shape and whether repeated identifiers are suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionMode {
    pub rich_fields: bool,
    pub deduplicate: bool,
}

impl ExtractionMode {
    pub const RICH: Self = Self { rich_fields: true, deduplicate: false };
    pub const UNIQUE_BARE: Self = Self { rich_fields: false, deduplicate: true };

    /// Applies dedup (first occurrence wins, exact match) and then the output shape.
    pub fn shape(self, records: Vec<UserAgentRecord>) -> Vec<UserAgentEntry> {
        let mut seen = HashSet::new();
        records
            .into_iter()
            .filter(|record| !record.user_agent.is_empty())
            .filter(|record| !self.deduplicate || seen.insert(record.user_agent.clone()))
            .map(|record| {
                if self.rich_fields {
                    UserAgentEntry::Detailed(record)
                } else {
                    UserAgentEntry::Bare(record.user_agent)
                }
            })
            .collect()
    }
}

/// Extracted entries for one category plus the metadata written alongside them.
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub label: String,
    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
    pub entries: Vec<UserAgentEntry>,
    pub include_count: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(uas: &[&str]) -> Vec<UserAgentRecord> {
        uas.iter()
            .enumerate()
            .map(|(i, ua)| UserAgentRecord {
                share_percentage: Some(i as f64),
                ..UserAgentRecord::new(*ua)
            })
            .collect()
    }

    fn user_agent(entry: &UserAgentEntry) -> &str {
        match entry {
            UserAgentEntry::Detailed(record) => &record.user_agent,
            UserAgentEntry::Bare(user_agent) => user_agent,
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_in_order() {
        let input = records(&["B", "A", "B", "a", "A", "C"]);
        let shaped = ExtractionMode::UNIQUE_BARE.shape(input);
        let uas: Vec<&str> = shaped.iter().map(user_agent).collect();
        assert_eq!(uas, vec!["B", "A", "a", "C"]);
        assert!(shaped.iter().all(|e| matches!(e, UserAgentEntry::Bare(_))));
    }

    #[test]
    fn test_dedup_survivor_carries_first_fields() {
        let mode = ExtractionMode { rich_fields: true, deduplicate: true };
        let shaped = mode.shape(records(&["X", "Y", "X"]));
        assert_eq!(shaped.len(), 2);
        match &shaped[0] {
            UserAgentEntry::Detailed(record) => assert_eq!(record.share_percentage, Some(0.0)),
            other => panic!("expected detailed entry, got {:?}", other),
        }
    }

    #[test]
    fn test_rich_mode_keeps_duplicates_and_drops_empty() {
        let shaped = ExtractionMode::RICH.shape(records(&["X", "", "X"]));
        assert_eq!(shaped.len(), 2);
        assert!(shaped.iter().all(|e| matches!(e, UserAgentEntry::Detailed(_))));
    }

    #[test]
    fn test_record_serialization_skips_absent_fields() {
        let record = UserAgentRecord {
            browser_info: Some("Chrome 134".to_string()),
            ..UserAgentRecord::new("Mozilla/5.0")
        };
        let json = serde_json::to_value(UserAgentEntry::Detailed(record)).unwrap();
        assert_eq!(json, serde_json::json!({ "user_agent": "Mozilla/5.0", "browser_info": "Chrome 134" }));

        let bare = serde_json::to_value(UserAgentEntry::Bare("Mozilla/5.0".to_string())).unwrap();
        assert_eq!(bare, serde_json::json!("Mozilla/5.0"));
    }
}
