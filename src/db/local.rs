// SPDX-License-Identifier: MIT

//! Keyed local storage: JSON values per key, namespaced by identity.
//!
//! This plays the role of per-device browser storage. Operations are
//! synchronous and last-write-wins; only the owning device mutates a key.

use crate::error::{Error, Result};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Keyed JSON storage.
pub trait LocalStore: Send + Sync + 'static {
    /// Raw value for a key, or `None` if absent.
    fn get(&self, key: &str) -> Option<Value>;

    /// Set a key, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Typed read with load-or-default semantics: a missing key, or a value
    /// that no longer deserializes, both yield the default. "Missing" and
    /// "present but empty" are indistinguishable by design.
    fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.get(key)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    /// Typed write.
    fn set_typed<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_value(value)
            .map_err(|e| Error::Storage(format!("serialize {key}: {e}")))?;
        self.set(key, raw)
    }
}

/// In-memory store for tests and offline use.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    cells: DashMap<String, Value>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.cells.get(key).map(|v| v.clone())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.cells.insert(key.to_string(), value);
        Ok(())
    }
}

/// File-backed store: one JSON object on disk, rewritten on every set.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cells: Mutex<HashMap<String, Value>>,
}

impl JsonFileStore {
    /// Open (or create) the store at `path`. A missing or unreadable file
    /// starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::Storage(format!("create {}: {e}", dir.display())))?;
        }

        let cells = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            path,
            cells: Mutex::new(cells),
        })
    }

    fn flush(&self, cells: &HashMap<String, Value>) -> Result<()> {
        let raw = serde_json::to_string_pretty(cells)
            .map_err(|e| Error::Storage(format!("serialize store: {e}")))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| Error::Storage(format!("write {}: {e}", self.path.display())))
    }
}

impl LocalStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.cells
            .lock()
            .ok()
            .and_then(|cells| cells.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut cells = self
            .cells
            .lock()
            .map_err(|_| Error::Storage("local store lock poisoned".to_string()))?;
        cells.insert(key.to_string(), value);
        self.flush(&cells)
    }
}
