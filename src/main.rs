use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use rx_core::config::database_path_from_env_value;
use rx_core::{CoreConfig, Database};

/// Main entry point for the prescription service
///
/// Opens (and migrates) the SQLite store, then serves the REST API with Swagger UI.
///
/// # Environment Variables
/// - `RX_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `RX_DATABASE_PATH`: SQLite database file, or `:memory:` (default: "prescriptions.db")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the database cannot be opened or migrated,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rx_run=info".parse()?)
                .add_directive("rx_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("RX_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(database_path_from_env_value(
        std::env::var("RX_DATABASE_PATH").ok(),
    ))?;
    if cfg.is_in_memory() {
        tracing::warn!("using an in-memory database; submissions are lost on exit");
    }
    let db = Database::open(&cfg)?;

    let app = router(AppState::new(db));

    tracing::info!("++ Starting prescription REST API on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
