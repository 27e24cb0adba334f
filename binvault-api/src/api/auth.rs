//! Session-token authentication middleware
//!
//! Protected routes sit behind [`require_session`], which validates the
//! bearer token presented in the `Authorization` header against the session
//! store and renews it on success. Denials are structured 401 JSON errors;
//! no handler behind the guard runs without a live session, so a denied
//! request can never touch the record store or event log.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::AppState;
use binvault_common::api::ErrorResponse;

/// Extract the session token from an `Authorization: Bearer <uuid>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}

/// Authentication middleware for protected routes.
///
/// Validates (and renews) the presented session token. Missing, malformed,
/// unknown, and expired tokens are all denied with 401; an expired session
/// is treated exactly like no session.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let token = bearer_token(request.headers()).ok_or(AuthRejection::MissingToken)?;

    if !state.sessions.validate(token, Utc::now()).await {
        warn!("Rejected request with unknown or expired session token");
        return Err(AuthRejection::InvalidSession);
    }

    Ok(next.run(request).await)
}

/// Denial reasons reported by the auth guard
#[derive(Debug)]
pub enum AuthRejection {
    MissingToken,
    InvalidSession,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            AuthRejection::MissingToken => "Unauthorized Access",
            AuthRejection::InvalidSession => "Session expired or invalid",
        };
        (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(message))).into_response()
    }
}
