// src/main.rs

use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use engram::api::router::api_router;
use engram::config::EngramConfig;
use engram::state::create_app_state;

#[derive(Parser)]
#[command(name = "engram", about = "Memory-augmented conversational assistant backend")]
struct Args {
    /// Bind host (overrides ENGRAM_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides ENGRAM_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = EngramConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    // Initialize tracing
    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting engram backend");
    info!("Model: {}", config.model);
    info!("Memory service: {}", config.memory_url);

    // Create database pool
    let pool = SqlitePoolOptions::new()
        .max_connections(config.sqlite_max_connections as u32)
        .connect(&config.database_url)
        .await?;

    let bind_address = config.bind_address();
    let app_state = Arc::new(create_app_state(config, pool).await?);

    let app = api_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("HTTP server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
