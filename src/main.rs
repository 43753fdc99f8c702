use enrichment_analytics_api::config::Config;
use enrichment_analytics_api::db::Database;
use enrichment_analytics_api::handlers::AppState;
use enrichment_analytics_api::{obs, server};
use std::sync::Arc;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, builds the warehouse pool once and
/// hands it to the router through `AppState`, then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    obs::init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database connection pool
    let db = Database::new(&config).await?;
    tracing::info!(
        "Database connection pool established (max {} connections)",
        config.db_max_connections
    );

    if config.simulated_failure_rate > 0.0 {
        tracing::info!(
            "Source listing will answer 429 on {:.0}% of calls",
            config.simulated_failure_rate * 100.0
        );
    }

    let app_state = Arc::new(AppState {
        db: db.pool,
        config: config.clone(),
    });

    let app = server::build_router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
