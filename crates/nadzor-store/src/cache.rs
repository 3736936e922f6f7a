//! Process-local key-value cache.
//!
//! One JSON file per key under a data directory. The cache is derived,
//! never authoritative: the in-memory state owned by the store and session
//! types is the source of truth for the running session, and the files only
//! seed the next one. Accordingly, every operation here is best-effort —
//! a missing or corrupt file reads as "nothing cached", and a failed write
//! is logged and swallowed.
//!
//! Writes take an advisory exclusive lock on the target file so two
//! processes cannot interleave partial JSON.

use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use nadzor_core::error::ErrorCode;

/// Cache key for the classification tree.
pub const AREAS_KEY: &str = "verification-areas-v1";

/// Cache key for the per-inspection selection state.
pub const SELECTION_KEY: &str = "verification-areas-selection-v1";

/// Cache key for the inspection form draft.
pub const DRAFT_KEY: &str = "inspection-form-draft-v1";

/// File-backed key-value store for the session's cached state.
#[derive(Debug, Clone)]
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    /// Open a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the cache in the user's data directory (`<data>/nadzor`).
    pub fn open_default() -> Result<Self> {
        let dir = dirs::data_dir()
            .context("no user data directory available")?
            .join("nadzor");
        Ok(Self::new(dir))
    }

    /// Read the value stored under `key`.
    ///
    /// Missing, unreadable, and corrupt entries all read as `None`; a
    /// corrupt entry is reported at `warn` level with its error code.
    #[must_use]
    pub fn read(&self, key: &str) -> Option<Value> {
        let path = self.path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(key, error = %err, "cache entry not readable");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(
                    key,
                    code = %ErrorCode::CacheReadFailed,
                    error = %err,
                    "cache entry corrupt, ignoring"
                );
                None
            }
        }
    }

    /// Store `value` under `key`. Failures are logged and swallowed.
    pub fn write(&self, key: &str, value: &impl Serialize) {
        if let Err(err) = self.try_write(key, value) {
            tracing::warn!(
                key,
                code = %ErrorCode::CacheWriteFailed,
                error = %err,
                "cache write failed, keeping in-memory state only"
            );
        }
    }

    /// Remove the entry stored under `key`, if any.
    pub fn remove(&self, key: &str) {
        let path = self.path(key);
        if let Err(err) = fs::remove_file(&path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(key, error = %err, "cache entry removal failed");
            }
        }
    }

    /// The file backing `key`.
    #[must_use]
    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn try_write(&self, key: &str, value: &impl Serialize) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create cache dir {}", self.dir.display()))?;

        let path = self.path(key);
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("lock {}", path.display()))?;

        let result = write_locked(&mut file, value, &path);
        let _ = FileExt::unlock(&file);
        result
    }
}

fn write_locked(file: &mut fs::File, value: &impl Serialize, path: &Path) -> Result<()> {
    let bytes = serde_json::to_vec(value).context("serialize cache value")?;
    file.set_len(0)
        .with_context(|| format!("truncate {}", path.display()))?;
    file.rewind()
        .with_context(|| format!("rewind {}", path.display()))?;
    file.write_all(&bytes)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{AREAS_KEY, LocalCache};
    use serde_json::json;

    #[test]
    fn missing_entry_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = LocalCache::new(dir.path());
        assert_eq!(cache.read("no-such-key"), None);
    }

    #[test]
    fn write_then_read_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = LocalCache::new(dir.path());
        let value = json!([{"id": "a1", "name": "Охрана труда"}]);
        cache.write(AREAS_KEY, &value);
        assert_eq!(cache.read(AREAS_KEY), Some(value));
    }

    #[test]
    fn corrupt_entry_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = LocalCache::new(dir.path());
        std::fs::write(cache.path(AREAS_KEY), b"{not json").expect("write garbage");
        assert_eq!(cache.read(AREAS_KEY), None);
    }

    #[test]
    fn remove_clears_the_entry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = LocalCache::new(dir.path());
        cache.write(AREAS_KEY, &json!({"a": 1}));
        cache.remove(AREAS_KEY);
        assert_eq!(cache.read(AREAS_KEY), None);
        // Removing twice is fine.
        cache.remove(AREAS_KEY);
    }

    #[test]
    fn overwrite_replaces_longer_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = LocalCache::new(dir.path());
        cache.write(AREAS_KEY, &json!({"name": "очень длинное значение"}));
        cache.write(AREAS_KEY, &json!(1));
        assert_eq!(cache.read(AREAS_KEY), Some(json!(1)));
    }
}
