use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub store_backend: Option<String>,
    pub db_path: Option<String>,
    pub store_url: Option<String>,
    pub store_api_key: Option<String>,
    pub source_url: Option<String>,
    pub expected_catalog_size: Option<usize>,
    pub request_timeout_sec: Option<u64>,

    // Feature configs
    pub default_location: Option<DefaultLocationConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct DefaultLocationConfig {
    pub label: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
