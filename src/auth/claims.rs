//! Decoded token claims and the permission check.
//!
//! `Claims` is produced fresh per request by the verifier and discarded
//! once the request completes. The `sub` field is redacted in Debug output
//! to keep subject identifiers out of logs.

use crate::errors::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verified claims of a bearer token.
#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Token issuer.
    pub iss: String,

    /// Token audience.
    pub aud: String,

    /// Subject (user or client identifier) - optional, redacted in Debug
    /// output when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Permission strings granted to the subject (e.g. "post:drinks").
    /// `None` when the claim is absent from the token entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("iss", &self.iss)
            .field("aud", &self.aud)
            .field("sub", &self.sub.as_ref().map(|_| "[REDACTED]"))
            .field("exp", &self.exp)
            .field("permissions", &self.permissions)
            .finish()
    }
}

impl Claims {
    /// Check whether the claims carry a specific permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|perms| perms.iter().any(|p| p == permission))
    }
}

/// Enforce that `required` is present in the claims' permission list.
///
/// An empty `required` string means no permission is needed and always
/// passes.
///
/// # Errors
///
/// Returns `ApiError::MissingPermissionsClaim` when the token carries no
/// permissions claim at all, and `ApiError::Forbidden` when the claim
/// exists but does not contain `required`.
pub fn check_permission(required: &str, claims: &Claims) -> Result<(), ApiError> {
    if required.is_empty() {
        return Ok(());
    }

    let permissions = claims
        .permissions
        .as_ref()
        .ok_or(ApiError::MissingPermissionsClaim)?;

    if permissions.iter().any(|p| p == required) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
