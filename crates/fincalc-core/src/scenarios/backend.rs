//! Persistence backends for the scenario store.
//!
//! A backend holds opaque string payloads under named keys, the same shape as
//! browser local storage. The store keeps its whole scenario list as one JSON
//! array under a single key.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::FinCalcError;
use crate::FinCalcResult;

pub trait ScenarioBackend: Send + Sync {
    /// Short name for logging.
    fn backend_name(&self) -> &'static str;

    /// Payload stored under `key`, or `None` if nothing was ever written.
    fn read(&self, key: &str) -> FinCalcResult<Option<String>>;

    /// Replace the payload under `key`.
    fn write(&self, key: &str, payload: &str) -> FinCalcResult<()>;
}

impl<B: ScenarioBackend + ?Sized> ScenarioBackend for Arc<B> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn read(&self, key: &str) -> FinCalcResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, payload: &str) -> FinCalcResult<()> {
        (**self).write(key, payload)
    }
}

fn lock_error(e: impl std::fmt::Display) -> FinCalcError {
    FinCalcError::Storage(format!("Lock error: {e}"))
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local backend. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    slots: RwLock<HashMap<String, String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioBackend for InMemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn read(&self, key: &str) -> FinCalcResult<Option<String>> {
        Ok(self.slots.read().map_err(lock_error)?.get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> FinCalcResult<()> {
        self.slots
            .write()
            .map_err(lock_error)?
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON files
// ---------------------------------------------------------------------------

/// One `<key>.json` file per key inside a directory. Writes go to a sibling
/// temp file first and are renamed into place.
#[derive(Debug)]
pub struct JsonFileBackend {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileBackend {
    /// Use `dir` as the storage directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ScenarioBackend for JsonFileBackend {
    fn backend_name(&self) -> &'static str {
        "json-file"
    }

    fn read(&self, key: &str) -> FinCalcResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FinCalcError::Storage(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, key: &str, payload: &str) -> FinCalcResult<()> {
        let _guard = self.write_lock.lock().map_err(lock_error)?;
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, payload)
            .map_err(|e| FinCalcError::Storage(format!("Failed to write '{}': {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| FinCalcError::Storage(format!("Failed to replace '{}': {}", path.display(), e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_overwrites() {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.read("k").unwrap(), None);
        backend.write("k", "[1]").unwrap();
        backend.write("k", "[2]").unwrap();
        assert_eq!(backend.read("k").unwrap().as_deref(), Some("[2]"));
        assert_eq!(backend.read("other").unwrap(), None);
    }

    #[test]
    fn test_file_backend_creates_directory_and_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(tmp.path().join("nested").join("store"));
        assert_eq!(backend.read("slot").unwrap(), None);

        backend.write("slot", "[]").unwrap();
        assert_eq!(backend.read("slot").unwrap().as_deref(), Some("[]"));
        assert!(backend.path_for("slot").is_file());
        assert!(!backend.dir().join("slot.json.tmp").exists());
    }

    #[test]
    fn test_arc_backend_shares_state() {
        let shared = Arc::new(InMemoryBackend::new());
        let a = Arc::clone(&shared);
        a.write("k", "x").unwrap();
        assert_eq!(shared.read("k").unwrap().as_deref(), Some("x"));
    }
}
