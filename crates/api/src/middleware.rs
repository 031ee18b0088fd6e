use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use yams_auth::JwtValidator;
use yams_core::DomainError;

use crate::app::errors::domain_error_to_response;
use crate::context::PlayerContext;

/// Header carrying the session token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_access_token(req.headers()).ok_or_else(unauthorized)?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "rejected access token");
        unauthorized()
    })?;

    req.extensions_mut().insert(PlayerContext::new(claims.sub));

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    domain_error_to_response(DomainError::Unauthorized)
}

fn extract_access_token(headers: &HeaderMap) -> Option<&str> {
    let token = headers.get(ACCESS_TOKEN_HEADER)?.to_str().ok()?.trim();
    // Tolerate clients that send the token Bearer-style.
    let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_raw_and_bearer_tokens() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_access_token(&headers), None);

        headers.insert(ACCESS_TOKEN_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(extract_access_token(&headers), Some("abc"));

        headers.insert(ACCESS_TOKEN_HEADER, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_access_token(&headers), Some("abc"));

        headers.insert(ACCESS_TOKEN_HEADER, HeaderValue::from_static("  "));
        assert_eq!(extract_access_token(&headers), None);
    }
}
