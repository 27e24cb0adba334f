//! binvault-api library - authenticated site→bins lookup service
//!
//! Maps normalized website identifiers to sets of bin codes, exposes a
//! token-protected admin API for mutating the mapping, and keeps a bounded
//! rolling log of lookup events for daily statistics.

use axum::routing::{get, post};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use binvault_common::auth::AdminCredentials;

pub mod api;
pub mod config;
pub mod events;
pub mod service;
pub mod session;
pub mod store;

use service::QueryService;
use session::SessionStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Lookup/mutation orchestration over the record store and event log
    pub service: Arc<QueryService>,
    /// Active admin session tokens
    pub sessions: Arc<SessionStore>,
    /// Configured administrator credential pair
    pub credentials: AdminCredentials,
}

impl AppState {
    pub fn new(
        service: Arc<QueryService>,
        sessions: Arc<SessionStore>,
        credentials: AdminCredentials,
    ) -> Self {
        Self {
            service,
            sessions,
            credentials,
        }
    }
}

/// Build the application router.
///
/// Lookup and admin store operations require a valid session token; login,
/// logout, and health do not. Logout accepts any state so a stale client
/// can always clear its token.
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require a session token)
    let protected = Router::new()
        .route("/lookup", get(api::handlers::lookup))
        .route("/admin/add", post(api::handlers::add))
        .route("/admin/remove", post(api::handlers::remove))
        .route("/admin/stats", get(api::handlers::stats))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth::require_session,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/admin/login", post(api::handlers::login))
        .route(
            "/admin/logout",
            get(api::handlers::logout).post(api::handlers::logout),
        )
        .merge(api::health::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
