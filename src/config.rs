//! Service configuration.
//!
//! Configuration is loaded from environment variables. The database URL is
//! redacted in Debug output.

use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default audience expected in verified tokens.
pub const DEFAULT_API_AUDIENCE: &str = "coffee";

/// Default JWKS cache TTL in seconds (5 minutes).
pub const DEFAULT_JWKS_CACHE_TTL_SECONDS: u64 = 300;

/// Upper bound on the JWKS cache TTL (24 hours).
pub const MAX_JWKS_CACHE_TTL_SECONDS: u64 = 86_400;

/// Service configuration.
///
/// Loaded from environment variables with sensible defaults.
/// The issuer domain and audience are process-wide constants: every
/// verified token must carry `iss == https://{issuer_domain}/` and the
/// configured audience.
#[derive(Clone)]
pub struct Config {
    /// SQLite connection URL.
    pub database_url: String,

    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Domain of the token issuer (e.g. "tenant.us.auth0.com").
    pub issuer_domain: String,

    /// Audience expected in verified tokens.
    pub api_audience: String,

    /// URL of the issuer's JWKS endpoint.
    /// Defaults to `https://{issuer_domain}/.well-known/jwks.json`.
    pub jwks_url: String,

    /// How long fetched signing keys are cached, in seconds.
    pub jwks_cache_ttl_seconds: u64,
}

/// Custom Debug implementation that redacts the database URL.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("bind_address", &self.bind_address)
            .field("issuer_domain", &self.issuer_domain)
            .field("api_audience", &self.api_audience)
            .field("jwks_url", &self.jwks_url)
            .field("jwks_cache_ttl_seconds", &self.jwks_cache_ttl_seconds)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid JWKS cache TTL configuration: {0}")]
    InvalidJwksCacheTtl(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?
            .clone();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let issuer_domain = vars
            .get("AUTH_ISSUER_DOMAIN")
            .ok_or_else(|| ConfigError::MissingEnvVar("AUTH_ISSUER_DOMAIN".to_string()))?
            .clone();

        let api_audience = vars
            .get("API_AUDIENCE")
            .cloned()
            .unwrap_or_else(|| DEFAULT_API_AUDIENCE.to_string());

        let jwks_url = vars
            .get("AUTH_JWKS_URL")
            .cloned()
            .unwrap_or_else(|| format!("https://{}/.well-known/jwks.json", issuer_domain));

        let jwks_cache_ttl_seconds = if let Some(value_str) = vars.get("JWKS_CACHE_TTL_SECONDS") {
            let value: u64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidJwksCacheTtl(format!(
                    "JWKS_CACHE_TTL_SECONDS must be a valid positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value == 0 {
                return Err(ConfigError::InvalidJwksCacheTtl(
                    "JWKS_CACHE_TTL_SECONDS must be greater than 0".to_string(),
                ));
            }

            if value > MAX_JWKS_CACHE_TTL_SECONDS {
                return Err(ConfigError::InvalidJwksCacheTtl(format!(
                    "JWKS_CACHE_TTL_SECONDS must not exceed {} seconds, got {}",
                    MAX_JWKS_CACHE_TTL_SECONDS, value
                )));
            }

            value
        } else {
            DEFAULT_JWKS_CACHE_TTL_SECONDS
        };

        Ok(Config {
            database_url,
            bind_address,
            issuer_domain,
            api_audience,
            jwks_url,
            jwks_cache_ttl_seconds,
        })
    }

    /// The issuer string expected in verified tokens.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.issuer_domain)
    }
}
