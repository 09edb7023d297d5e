//! spiral-verse: interactive poem service
//!
//! Serves poem records over HTTP together with their linked-data views
//! (Turtle, JSON-LD, anchor listings) and the interactive number editor.

use std::net::SocketAddr;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use spiral_verse::config::{Config, LogFormat};
use spiral_verse::export::Exporter;
use spiral_verse::store::PoemStore;
use spiral_verse::{create_router, AppState};

#[derive(Parser)]
#[command(name = "spiral-verse")]
#[command(about = "Interactive poem service with linked-data export")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "spiral-verse.toml", env = "SPIRAL_VERSE_CONFIG")]
    config: String,

    /// Listen address (overrides config file)
    #[arg(short, long, env = "SPIRAL_VERSE_LISTEN")]
    listen: Option<SocketAddr>,

    /// Base URI for exported resources (overrides config file)
    #[arg(long, env = "SPIRAL_VERSE_BASE_URI")]
    base_uri: Option<String>,

    /// Start with an empty store
    #[arg(long, env = "SPIRAL_VERSE_NO_SEED")]
    no_seed: bool,

    /// Log output format (overrides config file)
    #[arg(long, value_enum, env = "SPIRAL_VERSE_LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("spiral_verse=info".parse()?);
    match format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config_found = std::path::Path::new(&cli.config).exists();
    let mut config = Config::load(&cli.config)?;

    // Apply CLI overrides
    if let Some(listen) = cli.listen {
        config.server.listen = listen;
    }
    if let Some(base_uri) = cli.base_uri {
        config.export.base_uri = base_uri;
    }
    if cli.no_seed {
        config.store.seed_sample = false;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    init_tracing(config.logging.format)?;

    info!("Starting spiral-verse");
    info!("Config file: {}", cli.config);
    if !config_found {
        info!("Config file not found, using defaults");
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("Base URI: {}", config.export.base_uri);
    info!("Range validation: {}", config.validation.enforce_ranges);

    let store = if config.store.seed_sample {
        PoemStore::with_sample(config.validation.enforce_ranges)
    } else {
        PoemStore::new(config.validation.enforce_ranges)
    };

    let state = AppState::new(store.into_shared(), Exporter::new(&config.export.base_uri));
    let app = create_router(state);

    let addr = config.server.listen;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
