//! Snapshot stores.
//!
//! The engine persists exactly two things, the current game and the saved
//! rules, each as a single snapshot slot. [`SnapshotStore`] is that slot.
//!
//! - [`MemoryStore`]: bincode bytes in memory (tests, embedding)
//! - [`JsonFileStore`]: pretty JSON on disk, written atomically

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// A single-slot snapshot store.
///
/// `load` returns `Ok(None)` when nothing has been saved. Errors are passed
/// through to the caller unchanged; stores never retry.
pub trait SnapshotStore<T> {
    /// Replace the stored snapshot.
    fn save(&mut self, value: &T) -> Result<(), StoreError>;

    /// Read the stored snapshot, if any.
    fn load(&self) -> Result<Option<T>, StoreError>;

    /// Remove the stored snapshot. Deleting an empty slot succeeds.
    fn delete(&mut self) -> Result<(), StoreError>;

    /// Is a snapshot stored?
    fn exists(&self) -> bool;
}

impl<T, S> SnapshotStore<T> for &mut S
where
    S: SnapshotStore<T> + ?Sized,
{
    fn save(&mut self, value: &T) -> Result<(), StoreError> {
        (**self).save(value)
    }

    fn load(&self) -> Result<Option<T>, StoreError> {
        (**self).load()
    }

    fn delete(&mut self) -> Result<(), StoreError> {
        (**self).delete()
    }

    fn exists(&self) -> bool {
        (**self).exists()
    }
}
