//! Authorization middleware for protected routes.
//!
//! Extracts the Bearer token from the Authorization header, verifies it
//! against the issuer's key set, enforces the route's required permission,
//! and injects the verified claims into request extensions. Any failure
//! short-circuits into the error-response path without running the handler.

use crate::auth::{check_permission, Claims, TokenVerifier};
use crate::errors::ApiError;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::instrument;

/// State for the authorization middleware.
#[derive(Clone)]
pub struct AuthState {
    /// Token verifier with its JWKS client.
    pub verifier: Arc<TokenVerifier>,
}

/// Run the full authorization pipeline for a request.
///
/// Header extraction, token verification, then the permission check. An
/// empty `required` string skips the permission check.
pub async fn authorize(
    headers: &HeaderMap,
    required: &str,
    verifier: &TokenVerifier,
) -> Result<Claims, ApiError> {
    let token = bearer_token(headers)?;
    let claims = verifier.verify(token).await?;
    check_permission(required, &claims)?;
    Ok(claims)
}

/// Extract the raw bearer token from the Authorization header.
///
/// The header must split on whitespace into exactly two parts with the
/// first equal to "Bearer" (case-insensitive).
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(ApiError::MissingAuthHeader)?;

    // The header is present; anything unreadable from here on is malformed
    let header = header.to_str().map_err(|_| {
        ApiError::MalformedAuthHeader(
            "Authorization header must have the format 'Bearer {token}'.".to_string(),
        )
    })?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (Some(_), Some(_), None) => Err(ApiError::MalformedAuthHeader(
            "The prefix has to be 'Bearer'.".to_string(),
        )),
        _ => Err(ApiError::MalformedAuthHeader(
            "Authorization header must have the format 'Bearer {token}'.".to_string(),
        )),
    }
}

/// Per-route authorization middleware.
///
/// Installed with `axum::middleware::from_fn_with_state((auth, permission), ..)`
/// so each protected route names the permission it requires. On success the
/// verified claims are stored in request extensions for the handler.
#[instrument(skip(state, req, next), name = "menu.middleware.auth", fields(permission = %state.1))]
pub async fn require_permission(
    State(state): State<(AuthState, &'static str)>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (auth, required) = state;

    let claims = match authorize(req.headers(), required, &auth.verifier).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(
                target: "menu.middleware.auth",
                code = err.code(),
                status = err.status_code().as_u16(),
                "Request rejected by authorization pipeline"
            );
            return Err(err);
        }
    };

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_valid() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_case_insensitive_scheme() {
        assert_eq!(
            bearer_token(&headers_with_auth("bearer token123")).unwrap(),
            "token123"
        );
        assert_eq!(
            bearer_token(&headers_with_auth("BEARER token123")).unwrap(),
            "token123"
        );
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let headers = HeaderMap::new();
        let err = bearer_token(&headers).expect_err("Expected error");
        assert!(matches!(err, ApiError::MissingAuthHeader));
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let err = bearer_token(&headers_with_auth("Basic abc")).expect_err("Expected error");

        assert_eq!(err.status_code(), 401);
        assert_eq!(err.code(), "invalid_header");
        assert!(
            err.to_string().contains("Bearer"),
            "Message should mention the expected Bearer prefix, got: {}",
            err
        );
    }

    #[test]
    fn test_bearer_token_scheme_only() {
        let err = bearer_token(&headers_with_auth("Bearer")).expect_err("Expected error");

        assert!(matches!(err, ApiError::MalformedAuthHeader(_)));
        assert!(err.to_string().contains("Bearer {token}"));
    }

    #[test]
    fn test_bearer_token_too_many_parts() {
        let err =
            bearer_token(&headers_with_auth("Bearer abc extra")).expect_err("Expected error");

        assert!(matches!(err, ApiError::MalformedAuthHeader(_)));
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_bearer_token_non_utf8_value_is_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer t\xC3ken").unwrap(),
        );

        let err = bearer_token(&headers).expect_err("Expected error");
        assert!(matches!(err, ApiError::MalformedAuthHeader(_)));
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_bearer_token_empty_value() {
        let err = bearer_token(&headers_with_auth("")).expect_err("Expected error");
        assert!(matches!(err, ApiError::MalformedAuthHeader(_)));
    }

    #[test]
    fn test_auth_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AuthState>();
        assert_clone::<(AuthState, &'static str)>();
    }
}
