//! HTTP request handlers
//!
//! Thin adapters between the wire types and the query service. Auth gating
//! for the protected routes happens in the middleware layer
//! (`api::auth::require_session`), not here.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::auth::bearer_token;
use crate::api::error::ApiError;
use crate::service::LookupOutcome;
use crate::AppState;
use binvault_common::api::{
    AddRequest, LoginRequest, LoginResponse, LookupResponse, MutationResponse, RemoveRequest,
    StatsResponse,
};
use binvault_common::auth::verify_login;

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    search: Option<String>,
}

/// GET /lookup?search= - Look up the bins for a site
pub async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<LookupResponse>, ApiError> {
    let raw = params.search.unwrap_or_default();

    let response = match state.service.public_lookup(&raw, Utc::now()).await? {
        LookupOutcome::Found { site, bins } => LookupResponse::found(site, bins),
        LookupOutcome::NotFound => LookupResponse::not_found(),
        LookupOutcome::EmptyQuery => LookupResponse::empty_query(),
    };
    Ok(Json(response))
}

/// POST /admin/login - Authenticate the administrator
///
/// Any token presented with the login request is revoked before the
/// credential check (session fixation defense). Success issues a fresh
/// 30-minute token; failure is 401 with no session state created.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<LoginResponse>) {
    if let Some(stale) = bearer_token(&headers) {
        state.sessions.revoke(stale).await;
    }

    if verify_login(&state.credentials, &req.username, &req.password) {
        let token = state.sessions.issue(Utc::now()).await;
        info!("Admin login succeeded");
        (
            StatusCode::OK,
            Json(LoginResponse {
                success: true,
                token: Some(token),
            }),
        )
    } else {
        warn!("Admin login failed for username {:?}", req.username);
        (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                token: None,
            }),
        )
    }
}

/// GET/POST /admin/logout - Clear the presented session
///
/// Unconditional: succeeds whether or not the token was live.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<MutationResponse> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.revoke(token).await;
        info!("Admin logged out");
    }
    Json(MutationResponse { success: true })
}

/// POST /admin/add - Add a bin to a site's record
pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<AddRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    state.service.add_record(&req.site, req.bin.as_str()).await?;
    Ok(Json(MutationResponse { success: true }))
}

/// POST /admin/remove - Remove a site's entire record
pub async fn remove(
    State(state): State<AppState>,
    Json(req): Json<RemoveRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let existed = state.service.remove_record(&req.site).await?;
    Ok(Json(MutationResponse { success: existed }))
}

/// GET /admin/stats - Record count, today's requests, store size
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.service.stats(Utc::now()).await?;
    Ok(Json(StatsResponse {
        count: stats.count,
        reqs: stats.reqs,
        db_size: stats.db_size,
    }))
}
