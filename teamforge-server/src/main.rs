//! Teamforge Server
//!
//! Forms hackathon teams when registration closes and streams the result
//! to subscribed clients.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, get_database_url};
use server::{build_router, run_server};
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use teamforge_core::events::{BroadcastEventBus, realtime_event_channel};
use teamforge_core::notify::mailer_from_config;
use teamforge_core::processors::{FormationPass, PgFormationStore, TeamFormer};
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Teamforge - automatic hackathon team formation
#[derive(Parser, Debug)]
#[command(name = "teamforge-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./teamforge-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Run database migrations on startup
    #[arg(long, default_value = "false")]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting teamforge-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(&args.config, args.listen);
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = loaded_config.server.listen;
    tracing::info!("Configuration loaded from {:?}", args.config);

    // Get database URL from environment
    let database_url = get_database_url().map_err(|e| {
        tracing::error!("DATABASE_URL environment variable not set");
        e
    })?;

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            e
        })?;
    tracing::info!("Database connection established");

    // Run migrations if requested
    if args.migrate {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to run migrations: {}", e);
                e
            })?;
        tracing::info!("Migrations completed successfully");
    }

    // Collaborators of the formation pass
    let events_tx = realtime_event_channel();
    let mailer = mailer_from_config(&loaded_config.mail).map_err(|e| {
        tracing::error!("Failed to set up mail transport: {}", e);
        e
    })?;
    let pass = FormationPass::new(
        Arc::new(PgFormationStore::new(db_pool.clone())),
        mailer,
        Arc::new(BroadcastEventBus::new(events_tx.clone())),
        loaded_config.scheduler,
    );

    // Spawn the team former
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let former_handle = tokio::spawn(TeamFormer::new(pass, shutdown_rx).run());

    // Build the router
    let state = AppState::new(db_pool.clone(), events_tx);
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Stop the team former; an in-flight pass finishes first
    tracing::info!("Stopping team former...");
    let _ = shutdown_tx.send(true);
    if let Err(e) = former_handle.await {
        tracing::error!("Team former task failed: {}", e);
    }

    // Close database connections gracefully
    tracing::info!("Closing database connections...");
    db_pool.close().await;
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
