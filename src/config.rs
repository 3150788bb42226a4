use crate::color::Rgb;
use crate::figure::Difficulty;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const SESSION_CONFIG_KEY: &str = "sessionConfig";
pub const SESSION_STATS_KEY: &str = "sessionStats";
pub const CUSTOM_FIGURES_KEY: &str = "customFigures";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store i/o failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no session configuration found; run `vistrace setup` first")]
    Missing,
    #[error("stored session configuration is unreadable: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("invalid session configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which figures a session draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigurePool {
    /// Only figures of the configured difficulty
    #[default]
    Difficulty,
    /// Every figure of every difficulty
    All,
}

/// Exercise settings written by `vistrace setup` and read once per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub color1: Rgb,
    pub color2: Rgb,
    pub background_color: Rgb,
    pub difficulty: Difficulty,
    /// Session length in minutes
    pub duration: u32,
    #[serde(default)]
    pub pool: FigurePool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            color1: Rgb::new(0xff, 0x00, 0x00),
            color2: Rgb::new(0x00, 0xff, 0xff),
            background_color: Rgb::WHITE,
            difficulty: Difficulty::Easy,
            duration: 10,
            pool: FigurePool::Difficulty,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration == 0 {
            return Err(ConfigError::Invalid(
                "duration must be at least one minute".into(),
            ));
        }
        if self.color1 == self.color2 {
            return Err(ConfigError::Invalid(
                "the two stroke colors must differ".into(),
            ));
        }
        Ok(())
    }

    pub fn limit_seconds(&self) -> u32 {
        self.duration.saturating_mul(60)
    }
}

/// Flat string-keyed store of JSON values.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

pub fn get_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<Result<T, serde_json::Error>>, StoreError> {
    Ok(store.get(key)?.map(serde_json::from_value))
}

pub fn set_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> Result<(), StoreError> {
    let value = serde_json::to_value(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, value)
}

/// Read and validate the session configuration. An absent entry is
/// `ConfigError::Missing`; callers must send the user to setup rather than
/// fall back to defaults.
pub fn load_session_config(store: &dyn KvStore) -> Result<SessionConfig, ConfigError> {
    let config = match get_json::<SessionConfig>(store, SESSION_CONFIG_KEY)? {
        None => return Err(ConfigError::Missing),
        Some(parsed) => parsed.map_err(ConfigError::Malformed)?,
    };
    config.validate()?;
    Ok(config)
}

pub fn save_session_config(store: &dyn KvStore, config: &SessionConfig) -> Result<(), ConfigError> {
    config.validate()?;
    set_json(store, SESSION_CONFIG_KEY, config)?;
    Ok(())
}

/// Store backed by one JSON object file.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    path: PathBuf,
}

impl FileKvStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "vistrace") {
            pd.config_dir().join("store.json")
        } else {
            PathBuf::from("vistrace_store.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Map<String, Value>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        let io = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io)?;
        }
        let data = serde_json::to_vec_pretty(map).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data).map_err(io)
    }
}

impl Default for FileKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.read()?;
        map.insert(key.to_string(), value);
        self.write(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read()?;
        if map.remove(key).is_some() {
            self.write(&map)?;
        }
        Ok(())
    }
}

/// In-process store, used by tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let store = FileKvStore::with_path(dir.path().join("store.json"));
        let cfg = SessionConfig::default();

        save_session_config(&store, &cfg).unwrap();
        assert_eq!(load_session_config(&store).unwrap(), cfg);
    }

    #[test]
    fn missing_config_is_refused() {
        let dir = tempdir().unwrap();
        let store = FileKvStore::with_path(dir.path().join("nested").join("store.json"));

        assert_matches!(load_session_config(&store), Err(ConfigError::Missing));
    }

    #[test]
    fn config_json_uses_camel_case() {
        let cfg: SessionConfig = serde_json::from_value(json!({
            "color1": "#FF0000",
            "color2": "cyan",
            "backgroundColor": "black",
            "difficulty": "hard",
            "duration": 5
        }))
        .unwrap();

        assert_eq!(cfg.background_color, Rgb::BLACK);
        assert_eq!(cfg.color2, Rgb::new(0, 255, 255));
        assert_eq!(cfg.pool, FigurePool::Difficulty);
        assert_eq!(cfg.limit_seconds(), 300);

        let value = serde_json::to_value(&cfg).unwrap();
        assert_eq!(value["backgroundColor"], json!("#000000"));
        assert_eq!(value["pool"], json!("difficulty"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let store = MemoryKvStore::new();
        let zero = SessionConfig {
            duration: 0,
            ..SessionConfig::default()
        };
        assert_matches!(save_session_config(&store, &zero), Err(ConfigError::Invalid(_)));

        store
            .set(SESSION_CONFIG_KEY, serde_json::to_value(&zero).unwrap())
            .unwrap();
        assert_matches!(load_session_config(&store), Err(ConfigError::Invalid(_)));

        store
            .set(SESSION_CONFIG_KEY, json!({"color1": "nope"}))
            .unwrap();
        assert_matches!(load_session_config(&store), Err(ConfigError::Malformed(_)));
    }

    #[test]
    fn default_store_matches_new() {
        let store = FileKvStore::default();
        assert_eq!(store.path(), FileKvStore::new().path());
        let name = store.path().file_name().and_then(|n| n.to_str());
        assert_matches!(name, Some("store.json" | "vistrace_store.json"));
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileKvStore::with_path(&path);

        store.set("a", json!(1)).unwrap();
        store.set("b", json!({"x": [1, 2]})).unwrap();
        store.remove("a").unwrap();

        let reopened = FileKvStore::with_path(&path);
        assert_eq!(reopened.get("a").unwrap(), None);
        assert_eq!(reopened.get("b").unwrap(), Some(json!({"x": [1, 2]})));
    }

    #[test]
    fn corrupt_store_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, b"[1, 2, 3]").unwrap();

        let store = FileKvStore::with_path(&path);
        assert_matches!(store.get("x"), Err(StoreError::Corrupt { .. }));
    }
}
