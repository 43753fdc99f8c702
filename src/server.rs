//! Router assembly: open routes, bearer-protected routes and the middleware stack.

use crate::auth;
use crate::docs;
use crate::handlers::{self, AppState};
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

/// Largest request body accepted. Every route is a GET.
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.allowed_origin.clone())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let protected_routes = Router::new()
        .route(
            "/people/v1/enrichments",
            get(handlers::list_source_enrichments),
        )
        .route("/analytics/overview", get(handlers::analytics_overview))
        .route("/analytics/enrichments", get(handlers::list_gold_enrichments))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/", get(handlers::health))
        .route("/docs", get(docs::serve_swagger_ui))
        .route("/openapi.json", get(docs::serve_openapi_spec))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                // Per-request deadline, answered with 408
                .layer(TimeoutLayer::new(state.config.request_timeout)),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
