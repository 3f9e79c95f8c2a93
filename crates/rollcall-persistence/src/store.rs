//! State stores.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use rollcall_model::AppState;

use crate::error::{PersistenceError, Result};

/// Key under which the session state is stored.
pub const STORAGE_KEY: &str = "teacherRollCallState";

/// Storage for a single serialized session state.
pub trait StateStore {
    fn save(&self, state: &AppState) -> Result<()>;

    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<AppState>>;

    fn clear(&self) -> Result<()>;

    /// Move an unreadable stored state out of the way so later saves
    /// cannot overwrite it. Returns where it went, if anywhere.
    fn set_aside(&self) -> Result<Option<PathBuf>>;
}

fn to_json(state: &AppState) -> Result<Vec<u8>> {
    serde_json::to_vec(state).map_err(|e| PersistenceError::Serialization { source: e })
}

fn from_json(bytes: &[u8], origin: &Path) -> Result<AppState> {
    serde_json::from_slice(bytes).map_err(|e| PersistenceError::Corrupt {
        path: origin.to_path_buf(),
        source: e,
    })
}

/// JSON file store in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the state file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }

    /// Path an unreadable state file is moved to.
    pub fn corrupt_path(&self) -> PathBuf {
        self.path().with_extension("json.corrupt")
    }
}

impl StateStore for FileStore {
    /// Uses atomic write (temp file + rename) so a crash mid-save keeps
    /// the previous state intact.
    fn save(&self, state: &AppState) -> Result<()> {
        let bytes = to_json(state)?;
        let path = self.path();
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source: e,
        })?;

        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(&bytes).map_err(|e| PersistenceError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &path).map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source: e,
        })?;

        tracing::debug!("Saved session state to {}", path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<AppState>> {
        let path = self.path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PersistenceError::Io {
                    operation: "read",
                    path,
                    source: e,
                });
            }
        };
        let state = from_json(&bytes, &path)?;
        tracing::debug!("Loaded session state from {}", path.display());
        Ok(Some(state))
    }

    fn clear(&self) -> Result<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!("Removed session state {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Io {
                operation: "remove",
                path,
                source: e,
            }),
        }
    }

    fn set_aside(&self) -> Result<Option<PathBuf>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let backup = self.corrupt_path();
        fs::rename(&path, &backup).map_err(|e| PersistenceError::Io {
            operation: "move aside",
            path: path.clone(),
            source: e,
        })?;
        tracing::info!("Moved unreadable session state to {}", backup.display());
        Ok(Some(backup))
    }
}

/// In-process store holding the serialized state.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Vec<u8>>>,
    aside: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes as if written by another process.
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Mutex::new(Some(bytes.into())),
            aside: Mutex::default(),
        }
    }

    /// Bytes moved out of the way by [`StateStore::set_aside`].
    pub fn set_aside_bytes(&self) -> Option<Vec<u8>> {
        self.aside.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateStore for MemoryStore {
    fn save(&self, state: &AppState) -> Result<()> {
        let bytes = to_json(state)?;
        *self.slot() = Some(bytes);
        Ok(())
    }

    fn load(&self) -> Result<Option<AppState>> {
        self.slot()
            .as_deref()
            .map(|bytes| from_json(bytes, Path::new(STORAGE_KEY)))
            .transpose()
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }

    fn set_aside(&self) -> Result<Option<PathBuf>> {
        let Some(bytes) = self.slot().take() else {
            return Ok(None);
        };
        *self.aside.lock().unwrap_or_else(PoisonError::into_inner) = Some(bytes);
        Ok(Some(PathBuf::from(format!("{STORAGE_KEY}.corrupt"))))
    }
}
