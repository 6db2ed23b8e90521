//! HTTP routes.
//!
//! Defines the axum router and shared application state. Each protected
//! route names the permission it requires; the authorization middleware
//! enforces it before the handler runs.

use crate::config::Config;
use crate::handlers;
use crate::middleware::auth::{require_permission, AuthState};
use axum::{
    handler::Handler,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: SqlitePool,

    /// Service configuration.
    pub config: Config,
}

/// Build the application routes.
///
/// Public: `GET /drinks`, `GET /health`. Everything else is wrapped in the
/// authorization middleware with its static permission string. Global
/// layers: request tracing and a 30 second timeout.
pub fn build_routes(state: Arc<AppState>, auth: AuthState) -> Router {
    let require = |permission: &'static str| {
        from_fn_with_state((auth.clone(), permission), require_permission)
    };

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/drinks", get(handlers::list_drinks))
        .route(
            "/drinks",
            post(handlers::create_drink.layer(require("post:drinks"))),
        )
        .route(
            "/drinks-detail",
            get(handlers::list_drinks_detail.layer(require("get:drinks-detail"))),
        )
        .route(
            "/drinks/:id",
            patch(handlers::update_drink.layer(require("patch:drinks"))),
        )
        .route(
            "/drinks/:id",
            delete(handlers::delete_drink.layer(require("delete:drinks"))),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Required for axum's State extractor
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_config_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Config>();
    }
}
