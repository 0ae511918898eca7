use super::StorageBackend;
use crate::error::StorageError;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tempfile::NamedTempFile;
use tracing::debug;

const VALUE_SUFFIX: &str = ".json";

/// Write lock for `dir`, shared by every `FileBackend` in this process that points at it.
fn directory_lock(dir: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    locks.entry(dir.to_path_buf()).or_default().clone()
}

/// Directory-backed storage: one file per key, named `<key>.json`.
///
/// Every value is written to its own hidden temp file first. Replacements rename it over the
/// target; first inserts hard-link it into place, which fails if the key already exists. A
/// reader therefore sees either no value, the old value, or the new one, never a partial file.
///
/// Compare-and-swap is serialised per directory across all backends opened in the process,
/// so several ledgers (tabs) over one directory cannot lose each other's writes.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileBackend {
    /// Opens (and creates if needed) the storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        let io_err = |source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        };
        fs::create_dir_all(&dir).map_err(io_err)?;
        let dir = fs::canonicalize(&dir).map_err(io_err)?;
        debug!(dir = %dir.display(), "File backend opened");
        Ok(Self {
            write_lock: directory_lock(&dir),
            dir,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && !key.contains("..")
            && !key.chars().any(|c| c == '/' || c == '\\' || c.is_control());
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}{VALUE_SUFFIX}")))
    }

    fn read(&self, key: &str, path: &Path) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Writes `value` to a fresh hidden file in the storage directory. The file is removed
    /// when the returned handle drops unless it was persisted.
    fn write_temp(&self, key: &str, value: &str) -> Result<NamedTempFile, StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        let prefix = format!(".{key}.");
        let mut tmp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(io_err)?;
        tmp.write_all(value.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        Ok(tmp)
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        self.read(key, &path)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let io_err = |source| StorageError::Io {
            key: prefix.to_string(),
            source,
        };
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let name = entry.map_err(io_err)?.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with('.') {
                continue;
            }
            if let Some(key) = name.strip_suffix(VALUE_SUFFIX) {
                if key.starts_with(prefix) {
                    keys.push(key.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;

        match expected {
            None => {
                let tmp = self.write_temp(key, new)?;
                match fs::hard_link(tmp.path(), &path) {
                    Ok(()) => Ok(true),
                    Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
                    Err(source) => Err(StorageError::Io {
                        key: key.to_string(),
                        source,
                    }),
                }
            }
            Some(expected) => {
                if self.read(key, &path)?.as_deref() != Some(expected) {
                    return Ok(false);
                }
                self.write_temp(key, new)?
                    .persist(&path)
                    .map_err(|e| StorageError::Io {
                        key: key.to_string(),
                        source: e.error,
                    })?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let backend = FileBackend::open(dir.path()).unwrap();
            assert!(backend.compare_and_swap("receipt-1", None, "{}").unwrap());
        }
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.get("receipt-1").unwrap().as_deref(), Some("{}"));
        assert_eq!(backend.keys_with_prefix("receipt-").unwrap(), vec!["receipt-1"]);
    }

    #[test]
    fn test_compare_and_swap_rejects_stale_value() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        assert!(backend.compare_and_swap("k", None, "a").unwrap());
        assert!(!backend.compare_and_swap("k", None, "b").unwrap());
        assert!(!backend.compare_and_swap("k", Some("stale"), "b").unwrap());
        assert!(backend.compare_and_swap("k", Some("a"), "b").unwrap());
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("b"));
        // No temp files left behind
        assert_eq!(backend.keys_with_prefix("").unwrap(), vec!["k"]);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(backend.get(key), Err(StorageError::InvalidKey(_))));
        }
    }

    #[test]
    fn test_backends_on_one_directory_share_compare_and_swap() {
        let dir = tempdir().unwrap();
        let seed = FileBackend::open(dir.path()).unwrap();
        assert!(seed.compare_and_swap("receipt-R0", None, "open").unwrap());

        for round in 0..50 {
            let current = seed.get("receipt-R0").unwrap().unwrap();
            let barrier = Arc::new(Barrier::new(2));
            let winners: Vec<bool> = (0..2)
                .map(|tab| {
                    // Each tab opens its own backend; one through a non-canonical path
                    let path = if tab == 0 {
                        dir.path().to_path_buf()
                    } else {
                        dir.path().join(".").join("")
                    };
                    let backend = FileBackend::open(path).unwrap();
                    let barrier = barrier.clone();
                    let current = current.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        let next = format!("{round}-{tab}");
                        backend
                            .compare_and_swap("receipt-R0", Some(&current), &next)
                            .unwrap()
                    })
                })
                .collect::<Vec<_>>()
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect();

            assert_eq!(winners.iter().filter(|won| **won).count(), 1);
        }
        assert_eq!(seed.keys_with_prefix("").unwrap(), vec!["receipt-R0"]);
    }

    #[test]
    fn test_inserts_are_never_seen_half_written() {
        let dir = tempdir().unwrap();
        let writer = FileBackend::open(dir.path()).unwrap();
        let reader = FileBackend::open(dir.path()).unwrap();
        let value = "x".repeat(256 * 1024);

        let expected = value.clone();
        let reads = thread::spawn(move || {
            for i in 0..40 {
                let key = format!("receipt-{i}");
                loop {
                    match reader.get(&key).unwrap() {
                        Some(seen) => {
                            assert_eq!(seen.len(), expected.len());
                            break;
                        }
                        None => thread::yield_now(),
                    }
                }
            }
        });
        for i in 0..40 {
            assert!(writer
                .compare_and_swap(&format!("receipt-{i}"), None, &value)
                .unwrap());
        }
        reads.join().unwrap();

        // Only the values themselves are left in the directory
        let names = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(names, 40);
    }
}
