//! AI credentials and the key-value stores that keep them

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_KEY: &str = "ai_api_key";
pub const BASE_URL_KEY: &str = "ai_base_url";
pub const MODEL_KEY: &str = "ai_model";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Store that lives as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: IndexMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.shift_remove(key);
        Ok(())
    }
}

/// Store persisted as a RON map, rewritten on every change
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: IndexMap<String, String>,
}

impl FileStore {
    /// Open a store; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            ron::from_str(&content)?
        } else {
            IndexMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = ron::ser::to_string_pretty(&self.entries, ron::ser::PrettyConfig::default())?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.shift_remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Default for AiConfig {
    /// Settings form defaults: no key, stock endpoint and model
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AiConfig {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Saved settings, or `None` unless all three are present
    pub fn load(store: &impl KeyValueStore) -> Option<Self> {
        let config = Self {
            api_key: store.get(API_KEY_KEY)?,
            base_url: store.get(BASE_URL_KEY)?,
            model: store.get(MODEL_KEY)?,
        };
        config.validate().ok().map(|()| config)
    }

    /// Saved settings with defaults for anything missing, for pre-filling a form
    pub fn load_or_default(store: &impl KeyValueStore) -> Self {
        let defaults = Self::default();
        Self {
            api_key: store.get(API_KEY_KEY).unwrap_or(defaults.api_key),
            base_url: store.get(BASE_URL_KEY).unwrap_or(defaults.base_url),
            model: store.get(MODEL_KEY).unwrap_or(defaults.model),
        }
    }

    /// Validate and write all three fields
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        self.validate()?;
        store.set(API_KEY_KEY, self.api_key.trim())?;
        store.set(BASE_URL_KEY, self.base_url.trim())?;
        store.set(MODEL_KEY, self.model.trim())?;
        tracing::info!(base_url = %self.base_url, model = %self.model, "AI settings saved");
        Ok(())
    }

    pub fn clear(store: &mut impl KeyValueStore) -> Result<()> {
        store.remove(API_KEY_KEY)?;
        store.remove(BASE_URL_KEY)?;
        store.remove(MODEL_KEY)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("api_key", &self.api_key),
            ("base_url", &self.base_url),
            ("model", &self.model),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::IncompleteConfig { field });
            }
        }
        Ok(())
    }

    /// Chat-completions endpoint under the base URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("climate-ai-{}-{}.ron", name, nanos))
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        assert!(AiConfig::load(&store).is_none());

        let config = AiConfig::new("sk-test", DEFAULT_BASE_URL, DEFAULT_MODEL);
        config.save(&mut store).unwrap();

        assert_eq!(store.get(API_KEY_KEY).as_deref(), Some("sk-test"));
        assert_eq!(AiConfig::load(&store), Some(config));
    }

    #[test]
    fn test_empty_field_rejected() {
        let mut store = MemoryStore::new();
        let config = AiConfig::new("sk-test", "  ", DEFAULT_MODEL);

        let err = config.save(&mut store).unwrap_err();
        assert!(matches!(err, Error::IncompleteConfig { field: "base_url" }));
        assert_eq!(err.to_string(), "Please fill in all fields!");
        assert!(store.get(API_KEY_KEY).is_none());
    }

    #[test]
    fn test_defaults_fill_form() {
        let mut store = MemoryStore::new();
        store.set(API_KEY_KEY, "sk-partial").unwrap();

        assert!(AiConfig::load(&store).is_none());
        let form = AiConfig::load_or_default(&store);
        assert_eq!(form.api_key, "sk-partial");
        assert_eq!(form.base_url, DEFAULT_BASE_URL);
        assert_eq!(form.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_completions_url() {
        let config = AiConfig::new("k", "http://localhost:8080/v1/", "m");
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("store");
        {
            let mut store = FileStore::open(&path).unwrap();
            AiConfig::new("sk-file", "http://example.test/v1", "small")
                .save(&mut store)
                .unwrap();
        }

        let mut store = FileStore::open(&path).unwrap();
        let config = AiConfig::load(&store).unwrap();
        assert_eq!(config.api_key, "sk-file");
        assert_eq!(config.model, "small");

        AiConfig::clear(&mut store).unwrap();
        assert!(AiConfig::load(&FileStore::open(&path).unwrap()).is_none());
        let _ = fs::remove_file(&path);
    }
}
