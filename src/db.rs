use crate::config::Config;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Schema-qualified name of the pre-aggregated reporting table.
pub const GOLD_TABLE: &str = "dw.gold_enrichments";

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    /// Builds the shared pool. Connections are opened on first use, so an
    /// unreachable warehouse does not stop the service from starting.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect_lazy(&config.database_url)?;

        match sqlx::query("SELECT 1").execute(&pool).await {
            Ok(_) => tracing::info!("Warehouse reachable"),
            Err(e) => tracing::warn!(
                "Warehouse not reachable at startup, analytics will answer degraded: {}",
                e
            ),
        }

        Ok(Self { pool })
    }
}
