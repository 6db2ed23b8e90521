//! Service error types.
//!
//! All errors map to an HTTP status code and the JSON error body
//! `{"success": false, "error": <status>, "message": <description>}` via the
//! `IntoResponse` impl. Authorization failures carry their description
//! verbatim; storage failures return fixed generic messages and the actual
//! error is logged server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error type covering the authorization pipeline and the drink store.
///
/// Maps to HTTP status codes:
/// - MissingAuthHeader, MalformedAuthHeader, MalformedToken, InvalidClaims,
///   TokenExpired, MissingPermissionsClaim: 401 Unauthorized
/// - Forbidden: 403 Forbidden
/// - KeyNotFound, TokenParse: 400 Bad Request
/// - KeySetUnavailable: 503 Service Unavailable
/// - NotFound: 404 Not Found
/// - Unprocessable: 422 Unprocessable Entity
/// - Database: 500 Internal Server Error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authorization header is expected.")]
    MissingAuthHeader,

    #[error("{0}")]
    MalformedAuthHeader(String),

    #[error("Authorization malformed.")]
    MalformedToken,

    #[error("Unable to find a signing key for the token.")]
    KeyNotFound,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Unable to parse authentication token.")]
    TokenParse,

    #[error("Permissions list not included in the token.")]
    MissingPermissionsClaim,

    #[error("Permission not found")]
    Forbidden,

    #[error("Key set unavailable: {0}")]
    KeySetUnavailable(String),

    #[error("not found")]
    NotFound,

    #[error("unprocessable")]
    Unprocessable,

    #[error("Database error: {0}")]
    Database(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingAuthHeader
            | ApiError::MalformedAuthHeader(_)
            | ApiError::MalformedToken
            | ApiError::InvalidClaims
            | ApiError::TokenExpired
            | ApiError::MissingPermissionsClaim => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::KeyNotFound | ApiError::TokenParse => StatusCode::BAD_REQUEST,
            ApiError::KeySetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine code for this error, used in logs and assertions.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingAuthHeader => "auth_header_missing",
            ApiError::MalformedAuthHeader(_)
            | ApiError::MalformedToken
            | ApiError::KeyNotFound
            | ApiError::TokenParse => "invalid_header",
            ApiError::InvalidClaims => "invalid_claims",
            ApiError::TokenExpired => "token_expired",
            ApiError::MissingPermissionsClaim => "empty_claims",
            ApiError::Forbidden => "unauthorized",
            ApiError::KeySetUnavailable(_) => "service_unavailable",
            ApiError::NotFound => "not_found",
            ApiError::Unprocessable => "unprocessable",
            ApiError::Database(_) => "server_error",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            ApiError::Database(err) => {
                // Log actual error server-side, return generic message to client
                tracing::error!(target: "menu.database", error = %err, "Database operation failed");
                "server side error".to_string()
            }
            ApiError::KeySetUnavailable(reason) => {
                tracing::warn!(target: "menu.auth.jwks", reason = %reason, "Key set unavailable");
                "Authentication service unavailable".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message,
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            if let Ok(header_value) = "Bearer realm=\"menu-api\", error=\"invalid_token\"".parse() {
                response
                    .headers_mut()
                    .insert("WWW-Authenticate", header_value);
            }
        }

        response
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}
