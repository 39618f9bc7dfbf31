//! songbook-api - music catalog REST service
//!
//! Serves song CRUD and catalog statistics over HTTP, backed by a SQLite
//! database in the resolved root folder.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use songbook_api::api::meta::BUILD;
use songbook_api::{build_router, AppState};
use songbook_common::config::{self, ConfigSource, TomlConfig};
use songbook_common::db;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for songbook-api
#[derive(Parser, Debug)]
#[command(name = "songbook-api")]
#[command(about = "Music catalog REST service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "SONGBOOK_PORT")]
    port: Option<u16>,

    /// Address to bind (overrides config file)
    #[arg(short, long, env = "SONGBOOK_BIND")]
    bind: Option<String>,

    /// Root folder holding the database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Database file (overrides <root-folder>/songbook.db)
    #[arg(short, long, env = "SONGBOOK_DATABASE")]
    database: Option<PathBuf>,

    /// Configuration file (overrides the platform config location)
    #[arg(short, long, env = "SONGBOOK_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (toml_config, config_source) = TomlConfig::discover(args.config.as_deref());

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "songbook_api={level},songbook_common={level},tower_http={level}",
                    level = toml_config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Songbook API {}", BUILD);

    match &config_source {
        ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
        ConfigSource::NotFound => info!("No config file found, using built-in defaults"),
        ConfigSource::Rejected(path, e) => warn!(
            "Ignoring config file {}: {}; using built-in defaults",
            path.display(),
            e
        ),
    }

    let db_path = match args.database {
        Some(path) => path,
        None => {
            let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml_config);
            info!("Root folder: {}", root_folder.display());
            config::database_path(&root_folder)
        }
    };
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let state = AppState::new(pool.clone());
    let app = build_router(state);

    let bind = args.bind.unwrap_or_else(|| toml_config.bind_or_default());
    let port = args.port.unwrap_or_else(|| toml_config.port_or_default());
    let ip: IpAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", bind))?;
    let addr = SocketAddr::new(ip, port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("songbook-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
