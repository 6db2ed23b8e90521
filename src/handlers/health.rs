//! Health check handler.

use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service health status ("healthy" or "unhealthy").
    pub status: String,

    /// Database connectivity status.
    pub database: String,
}

/// Handler for GET /health
///
/// Pings the database and reports service health. Always returns 200 so
/// orchestrators can read the body.
#[instrument(skip_all, name = "menu.handlers.health")]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let db_healthy = sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok();

    let status = if db_healthy { "healthy" } else { "unhealthy" };

    Json(HealthResponse {
        status: status.to_string(),
        database: status.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            database: "healthy".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap_or_default();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"database\":\"healthy\""));
    }
}
