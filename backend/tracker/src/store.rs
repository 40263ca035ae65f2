//! History persistence: one JSON array in one file.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use prestigebot_core::{History, HistoryStore, TrackerError};
use tokio::fs;
use tracing::{debug, info};

/// Flat JSON file store with full-rewrite semantics.
///
/// Writes go to `<path>.tmp` first and are renamed over the target so a
/// crash mid-write never leaves a truncated history behind.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn storage_err(action: &str, path: &Path, err: impl std::fmt::Display) -> TrackerError {
    TrackerError::Storage(format!("Failed to {action} {}: {err}", path.display()))
}

#[async_trait]
impl HistoryStore for JsonFileStore {
    async fn load(&self) -> Result<History, TrackerError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "History file does not exist; starting empty");
                return Ok(History::new());
            }
            Err(e) => return Err(storage_err("read", &self.path, e)),
        };

        let history: History =
            serde_json::from_str(&raw).map_err(|e| storage_err("parse", &self.path, e))?;
        debug!(path = %self.path.display(), records = history.len(), "Loaded history");
        Ok(history)
    }

    async fn save(&self, history: &History) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_err("create directory", parent, e))?;
        }

        let json = serde_json::to_string_pretty(history)
            .map_err(|e| storage_err("serialize history for", &self.path, e))?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json.as_bytes())
            .await
            .map_err(|e| storage_err("write", &tmp_path, e))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| storage_err("replace", &self.path, e))?;

        info!(path = %self.path.display(), records = history.len(), "Wrote history");
        Ok(())
    }
}

/// Process-local store for tests and dry runs.
#[derive(Default)]
pub struct MemoryHistoryStore {
    history: RwLock<History>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: History) -> Self {
        Self {
            history: RwLock::new(history),
        }
    }

    pub fn snapshot(&self) -> History {
        self.history.read().map(|h| h.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self) -> Result<History, TrackerError> {
        self.history
            .read()
            .map(|h| h.clone())
            .map_err(|_| TrackerError::Storage("history lock poisoned".into()))
    }

    async fn save(&self, history: &History) -> Result<(), TrackerError> {
        let mut guard = self
            .history
            .write()
            .map_err(|_| TrackerError::Storage("history lock poisoned".into()))?;
        *guard = history.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use prestigebot_core::Record;

    fn sample() -> History {
        History::from(vec![
            Record::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(), 100),
            Record::new(Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(), 250),
        ])
    }

    #[tokio::test]
    async fn missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("prestige_data.json"));
        let history = store.load().await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_returns_same_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("prestige_data.json"));
        store.save(&sample()).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, sample());
        assert!(!store.tmp_path().exists());
    }

    #[tokio::test]
    async fn save_rewrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("prestige_data.json"));
        store.save(&sample()).await.unwrap();
        store.save(&History::new()).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn loads_file_written_by_legacy_bot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prestige_data.json");
        std::fs::write(
            &path,
            r#"[{"timestamp": "2024-05-01T10:00:00.000001", "prestige": 500}]"#,
        )
        .unwrap();

        let history = JsonFileStore::new(&path).load().await.unwrap();
        assert_eq!(history.latest().map(|r| r.prestige), Some(500));
    }

    #[tokio::test]
    async fn corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prestige_data.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, TrackerError::Storage(_)));
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryHistoryStore::new();
        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await.unwrap().len(), 2);
        assert_eq!(store.snapshot(), sample());
    }
}
