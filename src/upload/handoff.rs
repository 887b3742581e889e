//! Key-value hand-off to whatever opens the result URL.

use super::error::HandoffError;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const KEY_VIDEO_ID: &str = "video_id";
pub const KEY_VIDEO_LINK: &str = "video_linki";
pub const KEY_VIDEO_TYPE: &str = "video_tipi";
pub const KEY_PRIVACY: &str = "gizlilik";
pub const KEY_ANALYSIS: &str = "video_analiz";

pub trait HandoffStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), HandoffError>;
    fn get_item(&self, key: &str) -> Option<String>;
    fn clear(&self) -> Result<(), HandoffError>;
}

/// Session-scoped store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl HandoffStore for MemoryStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), HandoffError> {
        let mut entries = self.entries.lock().map_err(|_| HandoffError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn clear(&self) -> Result<(), HandoffError> {
        self.entries
            .lock()
            .map_err(|_| HandoffError::Poisoned)?
            .clear();
        Ok(())
    }
}

/// Memory store that rewrites a JSON object file after every change.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            inner: MemoryStore::new(),
        }
    }

    fn flush(&self) -> Result<(), HandoffError> {
        let json = serde_json::to_string_pretty(&self.inner.snapshot())?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl HandoffStore for JsonFileStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), HandoffError> {
        self.inner.set_item(key, value)?;
        self.flush()
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.get_item(key)
    }

    fn clear(&self) -> Result<(), HandoffError> {
        self.inner.clear()?;
        self.flush()
    }
}
