use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokecounter_catalog::catalog_store::{CatalogEntry, Coordinates, EncounterLocation};
use pokecounter_catalog::config::{
    AppConfig, CliConfig, FileConfig, StoreBackend, DEFAULT_REQUEST_TIMEOUT_SEC,
};
use pokecounter_catalog::encounters::EncounterError;
use pokecounter_catalog::session::EncounterLog;
use pokecounter_catalog::AppContext;

#[derive(Parser, Debug)]
#[clap(name = "pokecounter", about = "Browse the creature catalog and log encounters")]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override flags.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Which store holds the catalog.
    #[clap(long, value_enum, default_value_t = StoreBackend::Sqlite)]
    pub store_backend: StoreBackend,

    /// Path to the SQLite database file (sqlite backend).
    #[clap(long)]
    pub db_path: Option<PathBuf>,

    /// Base URL of the hosted store (rest backend).
    #[clap(long)]
    pub store_url: Option<String>,

    /// API key of the hosted store (rest backend).
    #[clap(long)]
    pub store_api_key: Option<String>,

    /// Base URL of the creature API.
    #[clap(long)]
    pub source_url: Option<String>,

    /// Timeout in seconds for every outbound request.
    #[clap(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SEC)]
    pub request_timeout_sec: u64,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Make sure the catalog is complete and print it.
    Sync,
    /// List catalog entries whose name contains QUERY.
    Search {
        #[clap(default_value = "")]
        query: String,
    },
    /// Show one entry with its encounters.
    Show { id: u32 },
    /// Log an encounter for an entry.
    Encounter {
        id: u32,
        description: String,
        /// Where it happened. Defaults to the configured location.
        #[clap(long)]
        location: Option<String>,
        #[clap(long, requires = "longitude", allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[clap(long, requires = "latitude", allow_negative_numbers = true)]
        longitude: Option<f64>,
    },
}

impl CliArgs {
    fn cli_config(&self) -> CliConfig {
        CliConfig {
            store_backend: self.store_backend,
            db_path: self.db_path.clone(),
            store_url: self.store_url.clone(),
            store_api_key: self.store_api_key.clone(),
            source_url: self.source_url.clone(),
            request_timeout_sec: self.request_timeout_sec,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.cli_config(), file_config)?;
    let app = AppContext::from_config(config)?;

    match cli_args.command {
        Command::Sync => {
            let session = match app.start_session().await {
                Ok(session) => session,
                Err(e) => {
                    error!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            };
            for entry in session.entries() {
                println!("#{:<4} {}", entry.id, entry.name);
            }
        }
        Command::Search { query } => {
            let mut session = match app.start_session().await {
                Ok(session) => session,
                Err(e) => {
                    error!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            };
            session.set_query(query);
            for entry in session.visible().iter() {
                println!("#{:<4} {}", entry.id, entry.name);
            }
        }
        Command::Show { id } => match app.load_entry(id).await? {
            Some((entry, log)) => print_entry(&entry, &log),
            None => {
                eprintln!("No entry with id {}", id);
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Encounter {
            id,
            description,
            location,
            latitude,
            longitude,
        } => {
            let location = if location.is_some() || latitude.is_some() {
                Some(EncounterLocation {
                    label: location,
                    coordinates: latitude.zip(longitude).map(|(latitude, longitude)| {
                        Coordinates {
                            latitude,
                            longitude,
                        }
                    }),
                })
            } else {
                None
            };

            match app.encounters().add_encounter(id, &description, location).await {
                Ok(note) => println!("Saved encounter {} at {}", note.id, note.created_at),
                Err(EncounterError::EmptyDescription) => {
                    eprintln!("{}", EncounterError::EmptyDescription);
                    return Ok(ExitCode::from(2));
                }
                Err(e) => {
                    error!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_entry(entry: &CatalogEntry, log: &EncounterLog) {
    println!("{}", entry.name);
    println!("#{}", entry.id);
    match entry.preferred_sprite() {
        Some(url) => println!("Image: {}", url),
        None => println!("Image: none available"),
    }
    println!("Types: {}", entry.type_names().join(", "));
    println!("Abilities: {}", entry.ability_names().join(", "));
    println!("Stats:");
    for stat in &entry.stats {
        println!("  {}: {}", stat.name(), stat.base_stat);
    }
    match entry.height_meters() {
        Some(m) => println!("Height: {} m", m),
        None => println!("Height: N/A"),
    }
    match entry.weight_kg() {
        Some(kg) => println!("Weight: {} kg", kg),
        None => println!("Weight: N/A"),
    }

    println!("Encounters ({}):", log.notes().len());
    for note in log.notes() {
        let place = note.location.as_deref().unwrap_or("unknown place");
        println!(
            "  {} @ {}: {}",
            note.created_at.format("%Y-%m-%d %H:%M"),
            place,
            note.description
        );
    }
}
