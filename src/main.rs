use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use football_api::config::{self, AppConfig};
use football_api::database::DatabaseManager;
use football_api::router;
use football_api::state::AppState;

#[derive(Parser)]
#[command(name = "football-api")]
#[command(about = "REST backend for football teams, players, matches and match reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT / FOOTBALL_API_PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Apply database migrations before serving")]
        migrate: bool,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    info!("Starting Football League API in {:?} mode", config.environment);

    if football_api::is_production!() && config.security.jwt_secret.is_empty() {
        warn!("JWT_SECRET is not set; login will fail until it is configured");
    }

    match cli.command.unwrap_or(Commands::Serve { port: None, migrate: false }) {
        Commands::Migrate => {
            let pool = DatabaseManager::connect(&config.database)?;
            DatabaseManager::migrate(&pool).await?;
            Ok(())
        }
        Commands::Serve { port, migrate } => serve(config, port, migrate).await,
    }
}

async fn serve(config: &AppConfig, port: Option<u16>, migrate: bool) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&config.database)?;
    if migrate {
        DatabaseManager::migrate(&pool).await?;
    }

    let state = AppState::new(pool, config.api.clone());
    let app = router::app(state, config);

    let bind_addr = format!("0.0.0.0:{}", port.unwrap_or(config.server.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    info!("Football League API listening on http://{}", bind_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
