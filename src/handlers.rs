use crate::config::Config;
use crate::errors::AppError;
use crate::gold_filter::GoldFilter;
use crate::gold_repository::GoldRepository;
use crate::models::*;
use crate::simulator;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// Default page size of the source listing.
pub const SOURCE_DEFAULT_LIMIT: u32 = 50;
/// Default page size of the gold listing.
pub const GOLD_DEFAULT_LIMIT: u32 = 10;

/// Shown in place of the KPIs while the gold table cannot be read.
pub const OVERVIEW_PLACEHOLDER: &str = "No processed data available in the gold layer yet.";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Warehouse connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
}

/// Unparseable query values are reported like out-of-range ones.
fn invalid_query(rejection: QueryRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}

/// Health check endpoint. Not authenticated.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /people/v1/enrichments
///
/// Simulated source system. Pages are reproducible per page number; a
/// configurable share of calls is answered with 429 before anything is generated.
#[utoipa::path(
    get,
    path = "/people/v1/enrichments",
    tag = "source",
    params(SourceListQuery),
    responses(
        (status = 200, description = "One page of simulated enrichment jobs", body = SourceEnrichmentPage),
        (status = 401, description = "Missing or malformed Authorization header"),
        (status = 403, description = "Invalid API key"),
        (status = 422, description = "page or limit out of range or not a number"),
        (status = 429, description = "Simulated throttling")
    ),
    security(("bearer" = []))
)]
pub async fn list_source_enrichments(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SourceListQuery>, QueryRejection>,
) -> Result<Json<Page<EnrichmentItem>>, AppError> {
    let Query(params) = query.map_err(invalid_query)?;
    tracing::info!("GET /people/v1/enrichments - params: {:?}", params);

    let request = PageRequest::from_query(params.page, params.limit, SOURCE_DEFAULT_LIMIT)?;

    if simulator::should_throttle(state.config.simulated_failure_rate) {
        tracing::warn!("Simulated rate limit triggered");
        return Err(AppError::RateLimited);
    }

    Ok(Json(simulator::simulated_page(request, chrono::Utc::now())))
}

/// GET /analytics/overview
///
/// KPIs over the whole gold table. A failing query is reported in the body
/// with status 200, never as a transport error.
#[utoipa::path(
    get,
    path = "/analytics/overview",
    tag = "analytics",
    responses(
        (status = 200, description = "KPIs, or a placeholder plus `error` when the gold table cannot be read", body = OverviewResponse),
        (status = 401, description = "Missing or malformed Authorization header"),
        (status = 403, description = "Invalid API key")
    ),
    security(("bearer" = []))
)]
pub async fn analytics_overview(State(state): State<Arc<AppState>>) -> Json<OverviewResponse> {
    tracing::info!("GET /analytics/overview");

    let repository = GoldRepository::new(state.db.clone());

    match repository.overview().await {
        Ok(kpis) => Json(OverviewResponse::Ready { kpis }),
        Err(e) => {
            tracing::warn!("Overview degraded: {}", e);
            Json(OverviewResponse::Degraded {
                kpis: OVERVIEW_PLACEHOLDER.to_string(),
                error: e.to_string(),
            })
        }
    }
}

/// GET /analytics/enrichments
///
/// Filtered, paginated gold records, newest first. Query failures and
/// malformed date filters produce status 200 with empty `data`, zero totals and
/// an `error` message.
#[utoipa::path(
    get,
    path = "/analytics/enrichments",
    tag = "analytics",
    params(GoldListQuery),
    responses(
        (status = 200, description = "One page of gold records, or an empty page plus `error`", body = GoldEnrichmentPage),
        (status = 401, description = "Missing or malformed Authorization header"),
        (status = 403, description = "Invalid API key"),
        (status = 422, description = "page or limit out of range or not a number")
    ),
    security(("bearer" = []))
)]
pub async fn list_gold_enrichments(
    State(state): State<Arc<AppState>>,
    query: Result<Query<GoldListQuery>, QueryRejection>,
) -> Result<Json<Page<GoldEnrichmentRecord>>, AppError> {
    let Query(params) = query.map_err(invalid_query)?;
    tracing::info!("GET /analytics/enrichments - params: {:?}", params);

    let request = PageRequest::from_query(params.page, params.limit, GOLD_DEFAULT_LIMIT)?;

    let result = match GoldFilter::from_params(
        params.id_workspace.as_deref(),
        params.status.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    ) {
        Ok(filter) => {
            GoldRepository::new(state.db.clone())
                .list_enrichments(&filter, request)
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(page) => Ok(Json(page)),
        Err(e) => {
            tracing::warn!("Gold listing degraded: {}", e);
            Ok(Json(Page::degraded(request, e.to_string())))
        }
    }
}
