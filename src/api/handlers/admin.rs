//! Hardcoded-admin login and the admin-gated stats endpoint.
//!
//! The admin credential is a single fixed username plus a password supplied
//! through configuration; admin sessions are a narrower trust boundary than
//! regular user sessions and are the only principal allowed to read stats.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::Utc;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::warn;

use super::auth::{authenticate, respond_with_session, ADMIN_USERNAME};
use super::types::{AdminLoginRequest, StatsResponse};
use crate::auth::{session::Principal, AuthError, AuthState};
use crate::stats;
use crate::storage::UserStore;

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin login successful", body = super::types::AckResponse),
        (status = 401, description = "Invalid admin credentials")
    ),
    tag = "admin"
)]
pub async fn login(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<AdminLoginRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return AuthError::InvalidInput.into_response();
    };

    let expected = auth_state.config().admin_password().expose_secret();
    if request.username != ADMIN_USERNAME || !password_matches(&request.password, expected) {
        warn!("Rejected admin login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Invalid admin credentials" })),
        )
            .into_response();
    }

    respond_with_session(&auth_state, Principal::Admin, "Admin login successful").await
}

/// Compare digests instead of the raw strings so a mismatch does not
/// short-circuit on the first differing byte.
fn password_matches(candidate: &str, expected: &str) -> bool {
    Sha256::digest(candidate.as_bytes()) == Sha256::digest(expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_comparison_goes_through_digests() {
        assert!(password_matches("hunter2", "hunter2"));
        assert!(!password_matches("hunter2", "hunter3"));
        // Prefix of the expected value is still a mismatch.
        assert!(!password_matches("hunt", "hunter2"));
        assert!(!password_matches("", "hunter2"));
    }
}

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "User statistics", body = StatsResponse),
        (status = 401, description = "Missing or non-admin session")
    ),
    tag = "admin"
)]
pub async fn stats(
    headers: HeaderMap,
    store: Extension<UserStore>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    match authenticate(&headers, &auth_state).await {
        Some(Principal::Admin) => {}
        // User sessions do not grant the admin view.
        Some(Principal::User(_)) | None => return AuthError::Unauthorized.into_response(),
    }

    let users = match store.list_users().await {
        Ok(users) => users,
        Err(err) => return AuthError::Internal(err.into()).into_response(),
    };
    let total_users = match store.count_users().await {
        Ok(count) => count,
        Err(err) => return AuthError::Internal(err.into()).into_response(),
    };

    let summary = stats::summarize(&users, Utc::now());

    // Dashboard lists the most recently active accounts first.
    let mut views: Vec<_> = users.iter().map(|user| user.public()).collect();
    views.sort_by(|a, b| b.last_login.cmp(&a.last_login));

    (
        StatusCode::OK,
        Json(StatsResponse {
            total_users,
            recent_logins: summary.recent_logins,
            new_users: summary.new_users,
            users: views,
        }),
    )
        .into_response()
}
