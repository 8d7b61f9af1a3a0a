//! HTTP middleware.
//!
//! - CORS restricted to the configured origins
//! - Security headers on every response

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::security_headers;
