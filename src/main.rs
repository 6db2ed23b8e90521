//! Drinks Menu Service
//!
//! Entry point: loads configuration, connects to the database, wires the
//! authorization middleware and serves the API with graceful shutdown.

use menu_service::auth::{JwksClient, TokenVerifier};
use menu_service::config::Config;
use menu_service::middleware::auth::AuthState;
use menu_service::routes::{self, AppState};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "menu_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting drinks menu service");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        bind_address = %config.bind_address,
        issuer_domain = %config.issuer_domain,
        api_audience = %config.api_audience,
        "Configuration loaded successfully"
    );

    // Initialize database connection pool
    info!("Connecting to database...");
    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            e
        })?;

    sqlx::migrate!().run(&pool).await?;

    info!("Database connection established");

    // Wire the authorization pipeline
    let jwks_client = Arc::new(JwksClient::with_ttl(
        config.jwks_url.clone(),
        Duration::from_secs(config.jwks_cache_ttl_seconds),
    ));
    let verifier = Arc::new(TokenVerifier::new(
        jwks_client,
        config.api_audience.clone(),
        config.issuer(),
    ));
    let auth = AuthState { verifier };

    let bind_address = config.bind_address.clone();

    let state = Arc::new(AppState { pool, config });

    let app = routes::build_routes(state, auth);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Drinks menu service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Drinks menu service shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
