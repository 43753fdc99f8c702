//! Static bearer-token gate for the protected routes.

use crate::errors::AppError;
use crate::handlers::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;

const BEARER_PREFIX: &str = "Bearer ";

/// Checks an `Authorization` header value against the configured key.
///
/// Absent header or missing `Bearer ` prefix is `Unauthenticated`; a token that
/// does not match is `Forbidden`.
pub fn verify_bearer(header: Option<&str>, api_key: &str) -> Result<(), AppError> {
    let header = header
        .ok_or_else(|| AppError::Unauthenticated("Missing Authorization header".to_string()))?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AppError::Unauthenticated("Invalid auth header format".to_string()))?
        .split(' ')
        .next()
        .unwrap_or_default();

    if !constant_time_compare(token, api_key) {
        return Err(AppError::Forbidden("Invalid API Key".to_string()));
    }

    Ok(())
}

/// Middleware rejecting any request whose bearer token is not the API key.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // A header that is not visible ASCII cannot carry a valid token
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| {
            AppError::Unauthenticated("Invalid auth header format".to_string())
        })?),
        None => None,
    };

    verify_bearer(header, &state.config.api_key)?;

    Ok(next.run(request).await)
}

/// Compares digests so the running time depends on neither input's length nor content.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a = Sha256::digest(a.as_bytes());
    let b = Sha256::digest(b.as_bytes());

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    const KEY: &str = "test_key_abc123";

    fn status_of(result: Result<(), AppError>) -> Option<StatusCode> {
        result.err().map(|e| e.status_code())
    }

    #[test]
    fn accepts_matching_token() {
        assert!(verify_bearer(Some("Bearer test_key_abc123"), KEY).is_ok());
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        assert_eq!(
            status_of(verify_bearer(None, KEY)),
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn missing_prefix_is_unauthenticated() {
        assert_eq!(
            status_of(verify_bearer(Some(KEY), KEY)),
            Some(StatusCode::UNAUTHORIZED)
        );
        assert_eq!(
            status_of(verify_bearer(Some("Token test_key_abc123"), KEY)),
            Some(StatusCode::UNAUTHORIZED)
        );
        // Scheme is case-sensitive
        assert_eq!(
            status_of(verify_bearer(Some("bearer test_key_abc123"), KEY)),
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn wrong_token_is_forbidden() {
        assert_eq!(
            status_of(verify_bearer(Some("Bearer nope"), KEY)),
            Some(StatusCode::FORBIDDEN)
        );
        assert_eq!(
            status_of(verify_bearer(Some("Bearer test_key_abc12"), KEY)),
            Some(StatusCode::FORBIDDEN)
        );
        assert_eq!(
            status_of(verify_bearer(Some("Bearer "), KEY)),
            Some(StatusCode::FORBIDDEN)
        );
    }

    #[test]
    fn token_ends_at_first_space() {
        assert!(verify_bearer(Some("Bearer test_key_abc123 trailing"), KEY).is_ok());
    }
}
