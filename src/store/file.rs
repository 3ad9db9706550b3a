//! JSON file snapshot store.
//!
//! Writes go to a sibling temporary file which is synced and then renamed
//! over the target, so a crash mid-write leaves the previous snapshot in
//! place.

use std::fs;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::SnapshotStore;
use crate::error::StoreError;

/// Pretty-printed JSON snapshot at a fixed path.
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    /// Store at `path`. The parent directory is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<T: Serialize + DeserializeOwned> SnapshotStore<T> for JsonFileStore<T> {
    fn save(&mut self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(value)?;
        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(&temp, &self.path)?;

        debug!(path = %self.path.display(), bytes = json.len(), "snapshot saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<T>, StoreError> {
        let json = match fs::read(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&json)?))
    }

    fn delete(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRules;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonFileStore<GameRules> = JsonFileStore::new(dir.path().join("rules.json"));

        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store: JsonFileStore<GameRules> = JsonFileStore::new(dir.path().join("nested/rules.json"));
        let rules = GameRules::builder().entry_minimum_score(350).build().unwrap();

        store.save(&rules).unwrap();
        assert!(store.exists());
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().unwrap(), Some(rules));

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"entryMinimumScore\": 350"));

        store.delete().unwrap();
        assert!(!store.exists());
        store.delete().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store: JsonFileStore<GameRules> = JsonFileStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Serialization(_))));
    }
}
