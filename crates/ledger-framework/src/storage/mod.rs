//! # Storage Backends
//!
//! A [`StorageBackend`] is a string-keyed, string-valued store shared by every writer of the
//! same origin. The framework never assumes it is the only writer: updates go through
//! [`StorageBackend::compare_and_swap`], so two actors pointed at the same backend cannot
//! lose each other's writes.
//!
//! Two implementations ship with the crate:
//! - [`MemoryBackend`] keeps everything in a shared map. Clones share state.
//! - [`FileBackend`] keeps one JSON file per key in a directory.

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::StorageError;

/// Key-value storage injected into a [`RecordActor`](crate::RecordActor).
pub trait StorageBackend: Send + Sync + 'static {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// All keys starting with `prefix`, in ascending order.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Write `new` under `key` only if the current value equals `expected`
    /// (`None` meaning "absent"). Returns `false` and leaves the store untouched otherwise.
    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        (**self).keys_with_prefix(prefix)
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StorageError> {
        (**self).compare_and_swap(key, expected, new)
    }
}
