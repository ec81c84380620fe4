use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::event::Event;
use crate::error::{StoreError, StoreResult};

pub const EVENTS_KEY: &str = "events";

/// Device-local key-value storage: one JSON object of string keys to
/// string values, rewritten whole on every change.
pub struct Store {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl Store {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let items = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        info!(path = %path.display(), keys = items.len(), "opened store");
        Ok(Self { path, items })
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("planner-tui").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub async fn set_item(&mut self, key: &str, value: impl Into<String>) -> StoreResult<()> {
        let mut items = self.items.clone();
        items.insert(key.to_string(), value.into());
        self.commit(items).await
    }

    pub async fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        let mut items = self.items.clone();
        items.remove(key);
        self.commit(items).await
    }

    /// Memory only takes `items` once they are on disk.
    async fn commit(&mut self, items: BTreeMap<String, String>) -> StoreResult<()> {
        self.flush(&items).await?;
        self.items = items;
        Ok(())
    }

    /// Decode the JSON text stored under `key`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        self.get_item(key)
            .map(|text| {
                serde_json::from_str(text).map_err(|source| StoreError::InvalidValue {
                    key: key.to_string(),
                    source,
                })
            })
            .transpose()
    }

    pub async fn set_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StoreResult<()> {
        let text = serde_json::to_string(value)?;
        self.set_item(key, text).await
    }

    pub fn load_events(&self) -> StoreResult<Vec<Event>> {
        Ok(self.get_json(EVENTS_KEY)?.unwrap_or_default())
    }

    pub async fn save_events(&mut self, events: &[Event]) -> StoreResult<()> {
        self.set_json(EVENTS_KEY, events).await?;
        debug!(count = events.len(), "saved events");
        Ok(())
    }

    async fn flush(&self, items: &BTreeMap<String, String>) -> StoreResult<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Accent, Priority, TimeSlot};

    fn sample_event() -> Event {
        Event {
            title: "Design Meeting".to_string(),
            slot: TimeSlot::ALL[0],
            day: 15,
            month: 7,
            year: 2024,
            owner: "alice@example.com".to_string(),
            priority: Priority::TopPriority,
            participants: vec!["A".to_string()],
            color: Accent::Blush,
        }
    }

    #[tokio::test]
    async fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("nested").join("storage.json")).await.unwrap();
        assert!(store.get_item("activeUser").is_none());
        assert!(store.load_events().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_items_and_events_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner").join("storage.json");

        let mut store = Store::open(&path).await.unwrap();
        store.set_item("activeUser", "alice@example.com").await.unwrap();
        store.save_events(&[sample_event()]).await.unwrap();

        let reopened = Store::open(&path).await.unwrap();
        assert_eq!(reopened.get_item("activeUser"), Some("alice@example.com"));
        assert_eq!(reopened.load_events().unwrap(), vec![sample_event()]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove_item() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = Store::open(&path).await.unwrap();
        store.set_item("activeUser", "bob@example.com").await.unwrap();
        store.remove_item("activeUser").await.unwrap();

        let reopened = Store::open(&path).await.unwrap();
        assert!(reopened.get_item("activeUser").is_none());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_items_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = Store::open(&path).await.unwrap();
        store.set_item("userName", "Alice").await.unwrap();

        // A directory where the temp file goes makes every write fail
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();

        let err = store.set_item("activeUser", "alice@example.com").await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(store.get_item("activeUser").is_none());

        assert!(store.remove_item("userName").await.is_err());
        assert_eq!(store.get_item("userName"), Some("Alice"));

        let reopened = Store::open(&path).await.unwrap();
        assert!(reopened.get_item("activeUser").is_none());
        assert_eq!(reopened.get_item("userName"), Some("Alice"));
    }

    #[tokio::test]
    async fn test_events_with_unknown_slot_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(
            &path,
            r#"{"events": "[{\"title\":\"x\",\"slot\":\"09:00 - 09:30\",\"day\":1,\"month\":0,\"year\":2024,\"owner\":\"a\"}]"}"#,
        )
        .unwrap();

        let store = Store::open(&path).await.unwrap();
        let err = store.load_events().unwrap_err();
        assert!(matches!(err, StoreError::InvalidValue { ref key, .. } if key == "events"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(Store::open(&path).await, Err(StoreError::Corrupt { .. })));
    }
}
