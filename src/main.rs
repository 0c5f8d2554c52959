use anyhow::Result;
use roster::config::AppConfig;
use roster::server::ServerBuilder;
use roster::storage::csv_import::seed_if_empty;
use roster::storage::sqlite::{connect, ensure_schema};
use roster::storage::{InMemorySessionStore, SqlitePlayerService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    tracing::info!(database = %config.database.url, "starting fanta-roster");

    let pool = connect(&config.database.url, config.database.max_connections).await?;
    ensure_schema(&pool).await?;

    let players = SqlitePlayerService::new(pool);
    seed_if_empty(&players, config.seed.csv_path.as_deref()).await?;

    ServerBuilder::new()
        .with_player_service(players)
        .with_session_store(InMemorySessionStore::new())
        .with_cookie_name(config.session.cookie_name)
        .serve(&config.server.bind)
        .await
}
