use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use user_order_api::config::AppConfig;
use user_order_api::database::DatabaseManager;
use user_order_api::logging::init_logging;
use user_order_api::{app, AppState};

#[derive(Parser)]
#[command(name = "user-order-api")]
#[command(about = "User and order REST API with JWT authentication")]
#[command(version)]
struct ServerArgs {
    #[arg(long, help = "Bind address (overrides SERVER_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Listen port (overrides SERVER_PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so local runs pick up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let args = ServerArgs::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _log_guard = init_logging(&config.logging)?;
    info!("Starting User Order API in {:?} mode", config.environment);

    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations {
        db.migrate().await.context("failed to run migrations")?;
        info!("Database migrations applied");
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::with_pool(config, db.pool().clone());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
