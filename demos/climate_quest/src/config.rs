//! RON settings for the terminal demo

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "climate_quest.ron";

fn default_log_file() -> String {
    "climate_quest.log".to_string()
}

fn default_log_filter() -> String {
    "climate=info".to_string()
}

fn default_credentials_file() -> String {
    "climate_credentials.ron".to_string()
}

fn default_site_origin() -> String {
    "https://example.com".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Logs go to a file; the terminal is in raw mode
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Where assistant credentials are stored
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
    /// Fixed RNG seed; the clock is used otherwise
    #[serde(default)]
    pub seed: Option<u64>,
    /// Origin the share links point at
    #[serde(default = "default_site_origin")]
    pub site_origin: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            log_filter: default_log_filter(),
            credentials_file: default_credentials_file(),
            seed: None,
            site_origin: default_site_origin(),
        }
    }
}

impl DemoConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(ron::from_str(&content)?)
    }

    /// Search the usual places, falling back to defaults
    pub fn discover() -> Result<Self, Box<dyn std::error::Error>> {
        let paths = [
            CONFIG_FILE.to_string(),
            format!("demos/climate_quest/{}", CONFIG_FILE),
        ];
        for path in &paths {
            if Path::new(path).exists() {
                return Self::load(path);
            }
        }
        Ok(Self::default())
    }
}
