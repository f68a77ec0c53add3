// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use crate::extractors::{ResultSet, UserAgentEntry};
use crate::utils::error::StorageError;

/// On-disk shape of one category file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub scraped_at: String,
    pub scraped_from: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub user_agents: Vec<UserAgentEntry>,
}

impl From<&ResultSet> for Envelope {
    fn from(set: &ResultSet) -> Self {
        Self {
            scraped_at: set.scraped_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            scraped_from: set.source_url.clone(),
            kind: set.label.clone(),
            count: set.include_count.then_some(set.entries.len()),
            user_agents: set.entries.clone(),
        }
    }
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes `set` as pretty JSON (2-space indent, UTF-8 unescaped) to `relative_path`.
    pub fn save_result_set(&self, set: &ResultSet, relative_path: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .map_err(StorageError::IoError)?;
        }

        let json = serde_json::to_string_pretty(&Envelope::from(set))
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved {} user agents to {}", set.entries.len(), file_path.display());

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::extractors::UserAgentRecord;

    fn result_set(entries: Vec<UserAgentEntry>, include_count: bool) -> ResultSet {
        ResultSet {
            label: "latest_iphone".to_string(),
            source_url: "https://useragents.me".to_string(),
            scraped_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 5).unwrap(),
            entries,
            include_count,
        }
    }

    #[test]
    fn test_save_and_reparse_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();

        let record = UserAgentRecord {
            share_percentage: Some(12.5),
            device: Some("iPhone – 16".to_string()),
            browser_info: Some("Safari".to_string()),
            ..UserAgentRecord::new("Mozilla/5.0 (iPhone; CPU iPhone OS 18_3 like Mac OS X)")
        };
        let set = result_set(vec![UserAgentEntry::Detailed(record)], true);

        let path = storage.save_result_set(&set, "latest/iphone.json").unwrap();
        assert_eq!(path, dir.path().join("out/latest/iphone.json"));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("iPhone – 16"), "non-ASCII must not be escaped");
        assert!(text.contains("\n  \"scraped_at\": \"2026-03-01T12:30:05.000000Z\""));

        let reparsed: Envelope = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, Envelope::from(&set));
        assert_eq!(reparsed.kind, "latest_iphone");
        assert_eq!(reparsed.count, Some(1));
    }

    #[test]
    fn test_bare_entries_without_count() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let set = result_set(vec![UserAgentEntry::Bare("UA-1".to_string()), UserAgentEntry::Bare("UA-2".to_string())], false);

        let path = storage.save_result_set(&set, "common/mobile.json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert!(value.get("count").is_none());
        assert_eq!(value["type"], "latest_iphone");
        assert_eq!(value["user_agents"], serde_json::json!(["UA-1", "UA-2"]));
    }
}
