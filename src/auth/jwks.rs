//! JWKS client for fetching and caching the issuer's public signing keys.
//!
//! Fetches the key set from the issuer's `/.well-known/jwks.json` endpoint
//! and caches it with a configurable TTL. The cache is swapped atomically
//! on refresh so concurrent readers never observe partially-updated key
//! material.

use crate::errors::ApiError;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::instrument;

/// Default cache TTL in seconds (5 minutes).
const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Timeout for the outbound JWKS fetch.
const FETCH_TIMEOUT_SECONDS: u64 = 5;

/// JSON Web Key from the JWKS endpoint.
///
/// Only RSA keys are meaningful to this service; the public components
/// (`n`, `e`) feed signature verification.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    /// Key type ("RSA" for the keys this service accepts).
    pub kty: String,

    /// Key ID - used to select the correct key for verification.
    pub kid: String,

    /// RSA modulus (base64url encoded).
    #[serde(default)]
    pub n: Option<String>,

    /// RSA public exponent (base64url encoded).
    #[serde(default)]
    pub e: Option<String>,

    /// Algorithm (should be "RS256").
    #[serde(default)]
    pub alg: Option<String>,

    /// Key use (should be "sig" for signing).
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,
}

/// JWKS response from the issuer.
#[derive(Debug, Clone, Deserialize)]
pub struct JwksResponse {
    /// List of JSON Web Keys.
    pub keys: Vec<Jwk>,
}

/// Cached key set with expiry time.
struct CachedJwks {
    /// Map of key ID to JWK.
    keys: HashMap<String, Jwk>,

    /// When this cache entry expires.
    expires_at: Instant,
}

/// JWKS client for fetching and caching public keys.
///
/// Thread-safe: the cache lives behind an `RwLock` and is replaced
/// wholesale when refreshed.
pub struct JwksClient {
    /// URL to the JWKS endpoint.
    jwks_url: String,

    /// HTTP client for fetching JWKS.
    http_client: reqwest::Client,

    /// Cached key set.
    cache: Arc<RwLock<Option<CachedJwks>>>,

    /// Cache TTL duration.
    cache_ttl: Duration,
}

impl JwksClient {
    /// Create a new JWKS client with the default cache TTL.
    pub fn new(jwks_url: String) -> Self {
        Self::with_ttl(jwks_url, Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS))
    }

    /// Create a new JWKS client with a custom cache TTL.
    pub fn with_ttl(jwks_url: String, cache_ttl: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECONDS))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(target: "menu.auth.jwks", error = %e, "Failed to build HTTP client with custom config, using defaults");
                reqwest::Client::new()
            });

        Self {
            jwks_url,
            http_client,
            cache: Arc::new(RwLock::new(None)),
            cache_ttl,
        }
    }

    /// Get a JWK by key ID.
    ///
    /// Serves from the cache when fresh, otherwise refetches the key set
    /// from the issuer first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::KeySetUnavailable` if the key set cannot be
    /// fetched or parsed, and `ApiError::KeyNotFound` if no key with the
    /// requested id exists in the (fresh) key set.
    #[instrument(skip(self), fields(kid = %kid))]
    pub async fn get_key(&self, kid: &str) -> Result<Jwk, ApiError> {
        // Check cache first
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.expires_at > Instant::now() {
                    if let Some(key) = cached.keys.get(kid) {
                        tracing::debug!(target: "menu.auth.jwks", kid = %kid, "JWKS cache hit");
                        return Ok(key.clone());
                    }
                    tracing::debug!(target: "menu.auth.jwks", kid = %kid, "Key not found in JWKS cache");
                    return Err(ApiError::KeyNotFound);
                }
            }
        }

        // Cache miss or expired - fetch fresh JWKS
        self.refresh_cache().await?;

        let cache = self.cache.read().await;
        if let Some(cached) = cache.as_ref() {
            if let Some(key) = cached.keys.get(kid) {
                return Ok(key.clone());
            }
        }

        tracing::warn!(target: "menu.auth.jwks", kid = %kid, "Key not found in JWKS after refresh");
        Err(ApiError::KeyNotFound)
    }

    /// Refresh the cached key set from the issuer.
    #[instrument(skip(self))]
    async fn refresh_cache(&self) -> Result<(), ApiError> {
        tracing::debug!(target: "menu.auth.jwks", url = %self.jwks_url, "Fetching JWKS from issuer");

        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(target: "menu.auth.jwks", error = %e, "Failed to fetch JWKS");
                ApiError::KeySetUnavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(
                target: "menu.auth.jwks",
                status = %status,
                "JWKS endpoint returned error"
            );
            return Err(ApiError::KeySetUnavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        let jwks: JwksResponse = response.json().await.map_err(|e| {
            tracing::error!(target: "menu.auth.jwks", error = %e, "Failed to parse JWKS response");
            ApiError::KeySetUnavailable(e.to_string())
        })?;

        let keys: HashMap<String, Jwk> = jwks
            .keys
            .into_iter()
            .map(|key| (key.kid.clone(), key))
            .collect();

        tracing::info!(
            target: "menu.auth.jwks",
            key_count = keys.len(),
            "JWKS cache refreshed"
        );

        // Swap the whole cache entry so readers see either the old or the
        // new key set, never a mix
        let mut cache = self.cache.write().await;
        *cache = Some(CachedJwks {
            keys,
            expires_at: Instant::now() + self.cache_ttl,
        });

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_jwk_deserialization() {
        let json = r#"{
            "kty": "RSA",
            "kid": "test-key-01",
            "n": "0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc",
            "e": "AQAB",
            "alg": "RS256",
            "use": "sig"
        }"#;

        let jwk: Jwk = serde_json::from_str(json).unwrap();

        assert_eq!(jwk.kty, "RSA");
        assert_eq!(jwk.kid, "test-key-01");
        assert!(jwk.n.is_some());
        assert_eq!(jwk.e, Some("AQAB".to_string()));
        assert_eq!(jwk.alg, Some("RS256".to_string()));
        assert_eq!(jwk.key_use, Some("sig".to_string()));
    }

    #[test]
    fn test_jwk_deserialization_minimal() {
        // Only required fields
        let json = r#"{
            "kty": "RSA",
            "kid": "test-key-02"
        }"#;

        let jwk: Jwk = serde_json::from_str(json).unwrap();

        assert_eq!(jwk.kty, "RSA");
        assert_eq!(jwk.kid, "test-key-02");
        assert!(jwk.n.is_none());
        assert!(jwk.e.is_none());
        assert!(jwk.alg.is_none());
        assert!(jwk.key_use.is_none());
    }

    #[test]
    fn test_jwks_response_deserialization() {
        let json = r#"{
            "keys": [
                {"kty": "RSA", "kid": "key-1"},
                {"kty": "RSA", "kid": "key-2"}
            ]
        }"#;

        let jwks: JwksResponse = serde_json::from_str(json).unwrap();

        assert_eq!(jwks.keys.len(), 2);
        assert_eq!(jwks.keys.first().unwrap().kid, "key-1");
        assert_eq!(jwks.keys.get(1).unwrap().kid, "key-2");
    }

    #[test]
    fn test_jwks_client_creation() {
        let client = JwksClient::new("http://localhost:9999/.well-known/jwks.json".to_string());
        assert_eq!(
            client.jwks_url,
            "http://localhost:9999/.well-known/jwks.json"
        );
    }

    #[test]
    fn test_jwks_client_custom_ttl() {
        let client = JwksClient::with_ttl(
            "http://localhost:9999/.well-known/jwks.json".to_string(),
            Duration::from_secs(60),
        );
        assert_eq!(client.cache_ttl, Duration::from_secs(60));
    }
}
