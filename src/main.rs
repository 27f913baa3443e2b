//! Library administration server
//!
//! REST API over the library record store.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_admin::{
    api,
    config::{AppConfig, StoreBackend},
    engine::Clock,
    repository::{HttpStore, MemoryStore, Repository},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_admin={},tower_http=debug", config.logging.level).into());

    if config.is_json_logging() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting library admin server v{}", env!("CARGO_PKG_VERSION"));

    // Create the store behind the repository
    let repository = match config.store.backend {
        StoreBackend::Http => {
            let store = HttpStore::new(&config.store).context("Failed to create store client")?;
            tracing::info!("Using remote store at {}", config.store.base_url);
            Repository::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, records are lost on shutdown");
            Repository::new(MemoryStore::new())
        }
    };

    let clock = Clock::from_offset_minutes(config.lending.utc_offset_minutes);
    tracing::info!(
        "Fine per overdue day: {}, today is {}",
        config.lending.fine_per_day,
        clock.today()
    );

    let services = Services::new(repository, config.lending.clone(), clock);

    // Save server address before moving config
    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState::new(config, services);
    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
