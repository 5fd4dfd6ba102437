mod file_config;

pub use file_config::{DefaultLocationConfig, FileConfig};

use crate::catalog_store::{Coordinates, EncounterLocation};
use crate::creature_source::DEFAULT_SOURCE_URL;
use crate::sync::EXPECTED_CATALOG_SIZE;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// Which store backs the catalog.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum StoreBackend {
    /// Local SQLite file.
    #[default]
    Sqlite,
    /// Hosted PostgREST-compatible store.
    Rest,
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub store_backend: StoreBackend,
    pub db_path: Option<PathBuf>,
    pub store_url: Option<String>,
    pub store_api_key: Option<String>,
    pub source_url: Option<String>,
    pub request_timeout_sec: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreSettings {
    Sqlite { db_path: PathBuf },
    Rest { url: String, api_key: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreSettings,
    pub source_url: String,
    pub expected_catalog_size: usize,
    pub request_timeout_sec: u64,
    pub default_location: EncounterLocation,
}

pub const DEFAULT_DB_FILE: &str = "catalog.db";
pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 30;

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let backend = match file.store_backend.as_deref() {
            Some(s) => match StoreBackend::from_str(s, true) {
                Ok(backend) => backend,
                Err(_) => bail!("Unknown store_backend in config file: {}", s),
            },
            None => cli.store_backend,
        };

        let store = match backend {
            StoreBackend::Sqlite => StoreSettings::Sqlite {
                db_path: file
                    .db_path
                    .map(PathBuf::from)
                    .or_else(|| cli.db_path.clone())
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
            },
            StoreBackend::Rest => {
                let url = file
                    .store_url
                    .or_else(|| cli.store_url.clone())
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "store_url must be specified via --store-url or in config file"
                        )
                    })?;
                let api_key = file
                    .store_api_key
                    .or_else(|| cli.store_api_key.clone())
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "store_api_key must be specified via --store-api-key or in config file"
                        )
                    })?;
                StoreSettings::Rest { url, api_key }
            }
        };

        let source_url = file
            .source_url
            .or_else(|| cli.source_url.clone())
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());

        let expected_catalog_size = file.expected_catalog_size.unwrap_or(EXPECTED_CATALOG_SIZE);
        if expected_catalog_size == 0 {
            bail!("expected_catalog_size must be greater than zero");
        }

        // A zero CLI value means the flag was never set.
        let cli_timeout = if cli.request_timeout_sec > 0 {
            cli.request_timeout_sec
        } else {
            DEFAULT_REQUEST_TIMEOUT_SEC
        };
        let request_timeout_sec = file.request_timeout_sec.unwrap_or(cli_timeout);
        if request_timeout_sec == 0 {
            bail!("request_timeout_sec must be greater than zero");
        }

        let default_location = resolve_location(file.default_location)?;

        Ok(Self {
            store,
            source_url,
            expected_catalog_size,
            request_timeout_sec,
            default_location,
        })
    }
}

/// The location stamped on encounters saved without one.
pub fn builtin_default_location() -> EncounterLocation {
    EncounterLocation {
        label: Some("Mariehamn".to_string()),
        coordinates: Some(Coordinates {
            latitude: 60.1,
            longitude: 19.9333,
        }),
    }
}

fn resolve_location(config: Option<DefaultLocationConfig>) -> Result<EncounterLocation> {
    let Some(config) = config else {
        return Ok(builtin_default_location());
    };

    let coordinates = match (config.latitude, config.longitude) {
        (Some(latitude), Some(longitude)) => {
            if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                bail!(
                    "default_location coordinates out of range: {}, {}",
                    latitude,
                    longitude
                );
            }
            Some(Coordinates {
                latitude,
                longitude,
            })
        }
        (None, None) => None,
        _ => bail!("default_location needs both latitude and longitude"),
    };

    Ok(EncounterLocation {
        label: config.label,
        coordinates,
    })
}
