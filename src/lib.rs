//! Drinks Menu Service Library
//!
//! A small CRUD backend for a drinks menu, gated by role-based permissions
//! carried in bearer tokens. Tokens are verified against the issuer's
//! published key set; each protected route names the permission it
//! requires.
//!
//! # Architecture
//!
//! ```text
//! routes/mod.rs -> middleware/auth.rs -> handlers/*.rs -> repositories/*.rs
//! ```
//!
//! # Modules
//!
//! - `config` - service configuration from environment
//! - `errors` - error types with HTTP status code mapping
//! - `auth` - key set cache, token verifier and permission check
//! - `middleware` - per-route authorization layer
//! - `models` - drink entity, projections and request bodies
//! - `repositories` - drink persistence
//! - `handlers` - HTTP request handlers
//! - `routes` - axum router setup

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
