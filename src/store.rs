use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const KEY_GAME_STATE: &str = "gameState";
pub const KEY_LAST_PLAYED: &str = "lastPlayedDate";
pub const KEY_STATISTICS: &str = "gameStatistics";
pub const KEY_LANGUAGE: &str = "selectedLanguage";

const DATA_DIR: &str = "goal_quiz";
const STORE_FILE: &str = "store.json";
const STORE_VERSION: u32 = 1;

/// String key-value storage the quiz persists through.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoreFile {
    version: u32,
    entries: HashMap<String, String>,
}

/// Whole store kept in memory, flushed to one JSON file on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing, unreadable or foreign-version file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_store_file(&path)
            .filter(|file| file.version == STORE_VERSION)
            .map(|file| file.entries)
            .unwrap_or_default();
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create data dir {}", dir.display()))?;
        }
        let file = StoreFile {
            version: STORE_VERSION,
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file).context("serialize store")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).context("write store")?;
        fs::rename(&tmp, &self.path).context("swap store")?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Reads a JSON-encoded string value; a bare unquoted value is accepted as-is.
pub fn load_string<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    let raw = store.load(key)?;
    Some(serde_json::from_str::<String>(&raw).unwrap_or_else(|_| raw.trim().to_string()))
}

fn load_store_file(path: &Path) -> Option<StoreFile> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str::<StoreFile>(&raw).ok()
}

/// `$XDG_DATA_HOME/goal_quiz`, falling back to `~/.local/share/goal_quiz`.
pub fn default_data_dir() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_DATA_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(DATA_DIR));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(DATA_DIR),
    )
}

pub fn store_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STORE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("goal_quiz_store_{}_{name}", std::process::id()))
            .join(STORE_FILE)
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = scratch_path("reopen");
        let mut store = JsonFileStore::open(&path);
        store.save(KEY_LANGUAGE, "\"es\"").unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.load(KEY_LANGUAGE).as_deref(), Some("\"es\""));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn string_values_decode_quoted_or_bare() {
        let mut store = MemoryStore::new();
        store.save(KEY_LAST_PLAYED, "\"2026-10-18\"").unwrap();
        store.save(KEY_LANGUAGE, "en").unwrap();
        assert_eq!(load_string(&store, KEY_LAST_PLAYED).as_deref(), Some("2026-10-18"));
        assert_eq!(load_string(&store, KEY_LANGUAGE).as_deref(), Some("en"));
        assert!(load_string(&store, KEY_STATISTICS).is_none());
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert!(store.load(KEY_GAME_STATE).is_none());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
