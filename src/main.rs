//! hitlog: a minimal hit-logging HTTP service.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from a TOML file (falling back to built-in defaults),
//! installs the Prometheus recorder, ensures the database schema exists,
//! and starts the HTTP server. Schema initialization runs to completion
//! before the listener binds; if the database never becomes reachable the
//! process exits without serving.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hitlog::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use hitlog::routes::create_router;
use hitlog::state::AppState;
use hitlog::{db, metrics};

/// hitlog: a minimal hit-logging HTTP service
#[derive(Parser, Debug)]
#[command(name = "hitlog", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "hitlog=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; a missing file means built-in defaults
    let config = AppConfig::load_or_default(&args.config)?;
    tracing::info!(
        db_host = %config.database.host,
        db_port = config.database.port,
        dbname = %config.database.dbname,
        connect_retries = config.database.connect_retries,
        "Loaded configuration"
    );

    // Install the Prometheus recorder before any request is handled
    let metrics_handle = metrics::install_recorder()?;
    tracing::info!("Installed metrics recorder");

    // Ensure the hits table exists; fatal if the database stays unreachable
    db::init(&config.database).await?;

    // Create application state and router
    let state = AppState::new(config.clone(), metrics_handle);
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port)
        .parse()
        .expect("Invalid http.host or http.port in config");
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
