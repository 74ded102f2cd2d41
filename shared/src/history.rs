//! Recent-search history on device-local key/value storage.
//!
//! The history lives under one namespaced key as a JSON array of at most
//! [`MAX_HISTORY_ENTRIES`] strings, newest first. A missing or malformed
//! value reads as an empty history; storage failures are logged and never
//! reach the caller.

use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

pub const SEARCH_HISTORY_KEY: &str = "vehicle-search-history";
pub const MAX_HISTORY_ENTRIES: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("storage file {path} is not a JSON object of strings: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value storage scoped to one device profile.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// All keys in one JSON object file, rewritten through a temp file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub const FILE_NAME: &'static str = "storage.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Store file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            },
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })
    }

    /// Like `read_all`, but a corrupt file is replaced rather than blocking
    /// writes forever.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_all() {
            Err(StorageError::Format {
                path,
                source,
            }) => {
                tracing::warn!("discarding unreadable storage file {}: {}", path.display(), source);
                Ok(BTreeMap::new())
            },
            other => other,
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(entries).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_for_update()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Recent free-text searches, newest first.
#[derive(Debug)]
pub struct SearchHistory<S> {
    store: S,
    entries: Vec<String>,
}

impl<S: KeyValueStore> SearchHistory<S> {
    /// Loads the persisted list; anything unreadable reads as empty.
    pub fn load(store: S) -> Self {
        let entries = match store.get(SEARCH_HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(saved) => normalize(saved),
                Err(err) => {
                    tracing::warn!("ignoring malformed search history: {}", err);
                    Vec::new()
                },
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("search history unavailable: {}", err);
                Vec::new()
            },
        };
        Self {
            store,
            entries,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves `query` to the front, dropping an exact duplicate and the
    /// oldest entry past the cap. Blank queries are ignored.
    pub fn push(&mut self, query: &str) {
        if query.trim().is_empty() {
            return;
        }
        self.entries.retain(|existing| existing != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(err) = self.store.remove(SEARCH_HISTORY_KEY) {
            tracing::warn!("failed to clear search history: {}", err);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("failed to encode search history: {}", err);
                return;
            },
        };
        if let Err(err) = self.store.set(SEARCH_HISTORY_KEY, &json) {
            tracing::warn!("failed to save search history: {}", err);
        }
    }
}

/// Re-applies the cap and de-duplication to a loaded list.
fn normalize(saved: Vec<String>) -> Vec<String> {
    let mut entries: Vec<String> = Vec::with_capacity(MAX_HISTORY_ENTRIES);
    for entry in saved {
        if entries.len() == MAX_HISTORY_ENTRIES {
            break;
        }
        if !entry.trim().is_empty() && !entries.contains(&entry) {
            entries.push(entry);
        }
    }
    entries
}
