//! Token authorization pipeline.
//!
//! # Components
//!
//! - `jwks` - key set client fetching the issuer's public signing keys
//! - `verifier` - signature and standard-claim verification (RS256 only)
//! - `claims` - decoded claims and the permission check

pub mod claims;
pub mod jwks;
pub mod verifier;

pub use claims::{check_permission, Claims};
pub use jwks::JwksClient;
pub use verifier::TokenVerifier;
