//! Storage for the single API credential used by every outgoing request.
//!
//! The credential lives in an in-memory cache backed by a pluggable
//! [`KeyValueStore`]. Absence is always represented as an empty string.

use crate::error::AtelierError;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use tempfile::NamedTempFile;

/// The key under which the credential is persisted.
pub const CREDENTIAL_KEY: &str = "gemini_api_key";

/// Environment variable consulted by [`CredentialStore::seed_from_env`].
pub const CREDENTIAL_ENV: &str = "GEMINI_API_KEY";

/// A durable string key/value capability.
///
/// Implementations must make `set` durable before returning.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AtelierError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AtelierError>;
}

/// A process-local store. Useful for tests and for hosts that manage
/// persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AtelierError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AtelierError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store backed by a single JSON object file.
///
/// Every `set` rewrites the whole file through a temporary file in the same
/// directory, so a crash mid-write never leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, AtelierError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AtelierError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AtelierError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut entries = match self.read_all() {
            Err(AtelierError::ResponseParseFailed(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "overwriting unreadable settings file"
                );
                HashMap::new()
            }
            other => other?,
        };
        entries.insert(key.to_string(), value.to_string());

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(serde_json::to_string_pretty(&entries)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Holds the API credential: an in-memory value in front of a durable store.
///
/// A `CredentialStore` is meant to be created once and shared (via `Arc`)
/// between the gateway and the shell.
pub struct CredentialStore {
    cache: RwLock<Option<String>>,
    backend: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            cache: RwLock::new(None),
            backend,
        }
    }

    /// A store with no durable backing beyond the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Stores `value` in memory and in the durable store.
    ///
    /// An empty `value` clears the credential. A failing durable write is
    /// logged; the in-memory value still takes effect, including a clear.
    pub fn set_credential(&self, value: &str) {
        {
            let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
            *cache = Some(value.to_string());
        }

        if let Err(e) = self.backend.set(CREDENTIAL_KEY, value) {
            tracing::warn!(error = %e, "failed to persist credential");
        }
    }

    /// Returns the value last set in this process (possibly `""`), else the
    /// durable one, else `""`.
    pub fn get_credential(&self) -> String {
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(value) = cache.as_ref() {
                return value.clone();
            }
        }

        match self.backend.get(CREDENTIAL_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted credential");
                String::new()
            }
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.get_credential().is_empty()
    }

    /// Fills the in-memory slot from `GEMINI_API_KEY` when nothing is stored.
    ///
    /// The environment value is not written to the durable store.
    pub fn seed_from_env(&self) -> bool {
        if self.has_credential() {
            return false;
        }
        match env::var(CREDENTIAL_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
                *cache = Some(value.trim().to_string());
                true
            }
            _ => false,
        }
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("has_credential", &self.has_credential())
            .finish_non_exhaustive()
    }
}
