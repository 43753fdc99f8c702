use axum::http::HeaderValue;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub api_key: String,
    pub allowed_origin: HeaderValue,
    /// Probability in [0, 1] that the source listing answers 429. Zero disables it.
    pub simulated_failure_rate: f64,
    pub request_timeout: Duration,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_vars(|key| std::env::var(key).ok())?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            &config.database_url[..20.min(config.database_url.len())]
        );
        tracing::debug!("Allowed origin: {:?}", config.allowed_origin);
        tracing::debug!(
            "Simulated failure rate: {}, request timeout: {:?}",
            config.simulated_failure_rate,
            config.request_timeout
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .or_else(|| lookup("DB_URL"))
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            api_key: lookup("API_KEY")
                .ok_or_else(|| anyhow::anyhow!("API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("API_KEY cannot be empty");
                    }
                    if key.chars().any(char::is_whitespace) {
                        anyhow::bail!("API_KEY cannot contain whitespace");
                    }
                    Ok(key)
                })?,
            allowed_origin: lookup("ALLOWED_ORIGIN")
                .unwrap_or_else(|| "http://localhost:8080".to_string())
                .parse::<HeaderValue>()
                .map_err(|_| anyhow::anyhow!("ALLOWED_ORIGIN must be a valid origin"))?,
            simulated_failure_rate: lookup("SIMULATED_FAILURE_RATE")
                .unwrap_or_else(|| "0.1".to_string())
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("SIMULATED_FAILURE_RATE must be a number"))
                .and_then(|rate| {
                    if !(0.0..=1.0).contains(&rate) {
                        anyhow::bail!("SIMULATED_FAILURE_RATE must be between 0 and 1");
                    }
                    Ok(rate)
                })?,
            request_timeout: Duration::from_secs(positive_int(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                30,
            )?),
            db_max_connections: positive_int(&lookup, "DB_MAX_CONNECTIONS", 10)? as u32,
            db_acquire_timeout: Duration::from_secs(positive_int(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
        })
    }
}

fn positive_int<F>(lookup: &F, key: &str, default: u64) -> anyhow::Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value >= 1 && value <= u32::MAX as u64 => Ok(value),
        _ => anyhow::bail!("{} must be a positive integer", key),
    }
}
