//! Persistent Keyed Store
//!
//! Generic mapping from a storage key to a JSON-serializable value, with:
//! - One file per key: `{data_dir}/{key}.json`
//! - Atomic file writes (temp file + rename)
//! - Advisory file locking to serialize concurrent writers
//! - Load-on-first-access with a caller-supplied default
//!
//! Values are expected to be small (kilobytes); there is no chunking or
//! eviction. A failed write leaves the persisted copy untouched, so callers
//! can keep operating on their in-memory value and retry on the next write.

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::{CoreError, CoreResult};

/// Lock file name (advisory lock to prevent concurrent writers)
const STORE_LOCK_FILE: &str = ".store.lock";

/// File-backed keyed store for small JSON values.
pub struct KeyedStore {
    data_dir: PathBuf,
}

impl KeyedStore {
    /// Creates a store rooted at the given data directory.
    ///
    /// The directory is created lazily on first write.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Creates a store in the platform app-data directory, under `reelmarks/`.
    pub fn in_app_data_dir() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("reelmarks"))
    }

    /// Returns the store's data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the file path backing a key.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn lock_path(&self) -> PathBuf {
        self.data_dir.join(STORE_LOCK_FILE)
    }

    fn with_lock<T>(&self, exclusive: bool, op: impl FnOnce() -> CoreResult<T>) -> CoreResult<T> {
        // Ensure the directory exists so the lock file can be created.
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            CoreError::PersistenceWrite(format!(
                "Failed to create store directory {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;

        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| {
                CoreError::PersistenceWrite(format!("Failed to open store lock file: {}", e))
            })?;

        if exclusive {
            fs2::FileExt::lock_exclusive(&lock_file).map_err(|e| {
                CoreError::PersistenceWrite(format!("Failed to lock store (exclusive): {}", e))
            })?;
        } else {
            fs2::FileExt::lock_shared(&lock_file).map_err(|e| {
                CoreError::PersistenceWrite(format!("Failed to lock store (shared): {}", e))
            })?;
        }

        let result = op();

        if let Err(e) = fs2::FileExt::unlock(&lock_file) {
            warn!("Failed to unlock store lock file: {}", e);
        }

        result
    }

    /// Reads the value for `key`, falling back to `default`.
    ///
    /// On absence or parse failure, `default` is persisted (best effort) and
    /// returned, so the next read sees a well-formed file.
    pub fn read<T>(&self, key: &str, default: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let path = self.entry_path(key);

        let loaded: CoreResult<Option<T>> = self.with_lock(false, || {
            if !path.exists() {
                return Ok(None);
            }
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<T>(&content) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!(key, "Failed to parse store entry, using default: {}", e);
                    Ok(None)
                }
            }
        });

        match loaded {
            Ok(Some(value)) => value,
            Ok(None) => {
                if let Err(e) = self.write(key, &default) {
                    warn!(key, "Failed to persist default store entry: {}", e);
                }
                default
            }
            Err(e) => {
                warn!(key, "Failed to read store entry, using default: {}", e);
                default
            }
        }
    }

    /// Writes the value for `key`, fully replacing any prior value.
    ///
    /// Atomic: serialize, write to a process-unique temp file, rename over
    /// the target. On failure the persisted copy is left unchanged.
    pub fn write<T>(&self, key: &str, value: &T) -> CoreResult<()>
    where
        T: Serialize,
    {
        self.with_lock(true, || {
            let path = self.entry_path(key);
            let temp_path = self
                .data_dir
                .join(format!(".{}.json.tmp.{}", key, std::process::id()));

            let content = serde_json::to_string_pretty(value).map_err(|e| {
                CoreError::PersistenceWrite(format!("Failed to serialize store entry: {}", e))
            })?;

            let mut file = fs::File::create(&temp_path).map_err(|e| {
                CoreError::PersistenceWrite(format!(
                    "Failed to create temp store file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
            file.write_all(content.as_bytes()).map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                CoreError::PersistenceWrite(format!("Failed to write store entry: {}", e))
            })?;
            file.sync_all().map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                CoreError::PersistenceWrite(format!("Failed to sync store entry: {}", e))
            })?;

            fs::rename(&temp_path, &path).map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                CoreError::PersistenceWrite(format!(
                    "Failed to finalize store entry {}: {}",
                    path.display(),
                    e
                ))
            })?;

            info!(key, "Store entry saved to {:?}", path);
            Ok(())
        })
    }

    /// Checks whether a key has a persisted value.
    pub fn exists(&self, key: &str) -> bool {
        self.entry_path(key).exists()
    }
}
