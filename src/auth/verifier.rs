//! Bearer token verification.
//!
//! Verifies incoming tokens against the issuer's published signing keys:
//! parse the header without verifying, look up the signing key by `kid`,
//! verify the RS256 signature, then validate audience, issuer and expiry.
//! RS256 is the only accepted algorithm; tokens signed with anything else
//! (including "none") are rejected.

use crate::auth::claims::Claims;
use crate::auth::jwks::{Jwk, JwksClient};
use crate::errors::ApiError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tracing::instrument;

/// Token verifier backed by the issuer's key set.
pub struct TokenVerifier {
    /// JWKS client for fetching public keys.
    jwks_client: Arc<JwksClient>,

    /// Audience every verified token must carry.
    audience: String,

    /// Issuer every verified token must carry (`https://{domain}/`).
    issuer: String,
}

impl TokenVerifier {
    /// Create a new verifier for the configured audience and issuer.
    pub fn new(jwks_client: Arc<JwksClient>, audience: String, issuer: String) -> Self {
        Self {
            jwks_client,
            audience,
            issuer,
        }
    }

    /// Verify a bearer token and return its claims.
    ///
    /// # Errors
    ///
    /// - `ApiError::TokenParse` - undecodable header, wrong algorithm, bad
    ///   signature, or any other structural failure (400)
    /// - `ApiError::MalformedToken` - header carries no key id (401)
    /// - `ApiError::KeyNotFound` - no signing key matches the key id (400)
    /// - `ApiError::KeySetUnavailable` - key set could not be fetched (503)
    /// - `ApiError::InvalidClaims` - audience or issuer mismatch (401)
    /// - `ApiError::TokenExpired` - expiry is in the past (401)
    #[instrument(skip_all)]
    pub async fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        // 1. Parse the header without verifying the signature
        let header = decode_header(token).map_err(|e| {
            tracing::debug!(target: "menu.auth.verifier", error = %e, "Token header undecodable");
            ApiError::TokenParse
        })?;

        if header.alg != Algorithm::RS256 {
            tracing::warn!(target: "menu.auth.verifier", alg = ?header.alg, "Rejected token with unexpected algorithm");
            return Err(ApiError::TokenParse);
        }

        let kid = match header.kid {
            Some(kid) if !kid.is_empty() => kid,
            _ => {
                tracing::debug!(target: "menu.auth.verifier", "Token header has no key id");
                return Err(ApiError::MalformedToken);
            }
        };

        // 2. Look up the signing key
        let jwk = self.jwks_client.get_key(&kid).await?;

        // 3-4. Verify signature and validate standard claims
        let claims = verify_token(token, &jwk, &self.audience, &self.issuer)?;

        tracing::debug!(target: "menu.auth.verifier", "Token verified successfully");
        Ok(claims)
    }
}

/// Verify a token's signature against a specific RSA key and validate its
/// audience, issuer and expiry.
fn verify_token(token: &str, jwk: &Jwk, audience: &str, issuer: &str) -> Result<Claims, ApiError> {
    if jwk.kty != "RSA" {
        tracing::warn!(target: "menu.auth.verifier", kty = %jwk.kty, "Unexpected JWK key type");
        return Err(ApiError::KeyNotFound);
    }

    let (n, e) = match (&jwk.n, &jwk.e) {
        (Some(n), Some(e)) => (n, e),
        _ => {
            tracing::error!(target: "menu.auth.verifier", kid = %jwk.kid, "JWK missing RSA components");
            return Err(ApiError::KeyNotFound);
        }
    };

    let decoding_key = DecodingKey::from_rsa_components(n, e).map_err(|e| {
        tracing::error!(target: "menu.auth.verifier", error = %e, "Invalid RSA key encoding");
        ApiError::TokenParse
    })?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[audience]);
    validation.set_issuer(&[issuer]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(target: "menu.auth.verifier", error = %e, "Token verification failed");
        match e.kind() {
            ErrorKind::ExpiredSignature => ApiError::TokenExpired,
            ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => ApiError::InvalidClaims,
            _ => ApiError::TokenParse,
        }
    })?;

    Ok(token_data.claims)
}
