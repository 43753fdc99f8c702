//! Utility to print the columns of the gold reporting table.
//!
//! The table belongs to the warehouse pipeline; this shows what the API will
//! find there before the service is pointed at it.

use dotenvy::dotenv;
use enrichment_analytics_api::db::GOLD_TABLE;
use sqlx::postgres::PgPoolOptions;
use std::env;

/// Connects with `DATABASE_URL` and lists the gold table's columns and row count.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("DB_URL"))
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    let (schema, table) = GOLD_TABLE
        .split_once('.')
        .ok_or_else(|| anyhow::anyhow!("gold table name must be schema-qualified"))?;

    let columns: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT column_name::text, data_type::text, is_nullable::text \
         FROM information_schema.columns \
         WHERE table_schema = $1 AND table_name = $2 \
         ORDER BY ordinal_position",
    )
    .bind(schema)
    .bind(table)
    .fetch_all(&pool)
    .await?;

    if columns.is_empty() {
        println!("{} not found", GOLD_TABLE);
        return Ok(());
    }

    println!("{}:", GOLD_TABLE);
    for (column, data_type, nullable) in columns {
        println!("  - {}: {} (nullable: {})", column, data_type, nullable);
    }

    let (rows,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", GOLD_TABLE))
        .fetch_one(&pool)
        .await?;
    println!("{} rows", rows);

    Ok(())
}
