use crate::domain::model::HistoryEntry;
use crate::domain::ports::HistoryStore;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// 以 JSON 陣列保存預測紀錄，最新的在最前面
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonHistoryStore {
    fn entries(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read(&self.path)?;
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&data)?)
    }

    fn record(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.entries()?;
        entries.insert(0, entry);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json)?;
        tracing::debug!(
            "History now holds {} entries at {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PatientRecord;
    use tempfile::TempDir;

    fn entry(date: &str, risk: f64) -> HistoryEntry {
        HistoryEntry {
            name: "Guest".to_string(),
            date: date.to_string(),
            timestamp: 0,
            risk,
            risk_category: None,
            record: PatientRecord::default(),
        }
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(temp_dir.path().join("history.json"));
        assert!(store.entries().unwrap().is_empty());
    }

    #[test]
    fn test_record_prepends_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new(temp_dir.path().join("nested/history.json"));

        store.record(entry("2024-01-01", 0.3)).unwrap();
        store.record(entry("2024-02-01", 0.2)).unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, "2024-02-01");
        assert_eq!(entries[1].date, "2024-01-01");
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonHistoryStore::new(path);
        assert!(store.entries().is_err());
    }
}
