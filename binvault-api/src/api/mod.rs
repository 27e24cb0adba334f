//! HTTP API handlers for binvault-api

pub mod auth;
pub mod error;
pub mod handlers;
pub mod health;

pub use auth::require_session;
pub use error::ApiError;
pub use health::health_routes;
