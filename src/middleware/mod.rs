//! HTTP middleware layers.
//!
//! # Components
//!
//! - `auth` - bearer token authorization for protected routes

pub mod auth;

pub use auth::{authorize, require_permission, AuthState};
