//! In-memory snapshot store.
//!
//! Keeps the bincode encoding rather than the value, so a save/load cycle
//! exercises the same serialization path as a real store and hands back an
//! independent copy.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::SnapshotStore;
use crate::error::StoreError;

/// Bincode-encoded snapshot held in memory.
#[derive(Debug)]
pub struct MemoryStore<T> {
    bytes: Option<Vec<u8>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MemoryStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: None,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> SnapshotStore<T> for MemoryStore<T> {
    fn save(&mut self, value: &T) -> Result<(), StoreError> {
        self.bytes = Some(bincode::serialize(value)?);
        Ok(())
    }

    fn load(&self) -> Result<Option<T>, StoreError> {
        self.bytes
            .as_deref()
            .map(|bytes| bincode::deserialize(bytes))
            .transpose()
            .map_err(StoreError::from)
    }

    fn delete(&mut self) -> Result<(), StoreError> {
        self.bytes = None;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.bytes.is_some()
    }
}
