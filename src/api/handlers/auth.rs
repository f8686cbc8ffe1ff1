//! Signup, login, logout, and session introspection endpoints.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tracing::error;

use super::types::{AckResponse, CredentialsRequest, SessionResponse};
use crate::auth::{self, session::Principal, AuthError, AuthState};
use crate::storage::UserStore;

pub(crate) const SESSION_COOKIE_NAME: &str = "anteroom_session";
pub(crate) const ADMIN_USERNAME: &str = "admin";

#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Account created, session issued", body = AckResponse),
        (status = 400, description = "Empty fields or duplicate name")
    ),
    tag = "auth"
)]
pub async fn signup(
    store: Extension<UserStore>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<CredentialsRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return AuthError::InvalidInput.into_response();
    };

    let user = match auth::signup(&store, &request.name, &request.password).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    respond_with_session(
        &auth_state,
        Principal::User(user.id),
        "Account created successfully",
    )
    .await
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login successful, session issued", body = AckResponse),
        (status = 400, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    store: Extension<UserStore>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<CredentialsRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return AuthError::InvalidInput.into_response();
    };

    let user = match auth::login(&store, &request.name, &request.password).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    respond_with_session(&auth_state, Principal::User(user.id), "Login successful").await
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session destroyed, cookie cleared", body = AckResponse)
    ),
    tag = "auth"
)]
pub async fn logout(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        auth_state.sessions().destroy(&token).await;
    }

    // Always clear the cookie, even when no session record existed.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(&auth_state) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (
        StatusCode::OK,
        response_headers,
        Json(AckResponse::ok("Logged out successfully")),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    ),
    tag = "auth"
)]
pub async fn session(
    headers: HeaderMap,
    store: Extension<UserStore>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    // Missing cookies are treated as "no session" to avoid leaking auth state.
    let Some(principal) = authenticate(&headers, &auth_state).await else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match principal {
        Principal::Admin => (
            StatusCode::OK,
            Json(SessionResponse {
                name: ADMIN_USERNAME.to_string(),
                admin: true,
            }),
        )
            .into_response(),
        Principal::User(id) => match store.find_by_id(id).await {
            Ok(Some(user)) => (
                StatusCode::OK,
                Json(SessionResponse {
                    name: user.name,
                    admin: false,
                }),
            )
                .into_response(),
            Ok(None) => StatusCode::NO_CONTENT.into_response(),
            Err(err) => {
                error!("Failed to resolve session user: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
    }
}

/// Resolve the request's session token to a principal, if any.
pub(crate) async fn authenticate(
    headers: &HeaderMap,
    auth_state: &AuthState,
) -> Option<Principal> {
    let token = extract_session_token(headers)?;
    auth_state.sessions().validate(&token).await
}

/// Issue a session for the principal and answer 200 with the cookie set.
pub(crate) async fn respond_with_session(
    auth_state: &AuthState,
    principal: Principal,
    message: &str,
) -> axum::response::Response {
    let token = match auth_state.sessions().issue(principal).await {
        Ok(token) => token,
        Err(err) => return AuthError::Internal(err).into_response(),
    };

    let mut response_headers = HeaderMap::new();
    match session_cookie(auth_state, &token) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            return AuthError::Internal(anyhow::Error::new(err).context("invalid session cookie"))
                .into_response()
        }
    }

    (
        StatusCode::OK,
        response_headers,
        Json(AckResponse::ok(message)),
    )
        .into_response()
}

/// Build a secure `HttpOnly` cookie for the session token.
fn session_cookie(auth_state: &AuthState, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = auth_state.config().session_ttl_seconds();
    let secure = auth_state.config().session_cookie_secure();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(auth_state: &AuthState) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = auth_state.config().session_cookie_secure();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        // Segments without '=' (flags, stray semicolons) are skipped, not fatal.
        let Some((key, val)) = pair.split_once('=') else {
            continue;
        };
        if key.trim() == SESSION_COOKIE_NAME {
            return Some(val.trim().to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("other=1; anteroom_session=tok123; theme=dark"),
        );
        assert_eq!(extract_session_token(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn extract_token_skips_malformed_cookie_segments() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark;; anteroom_session=tok123"),
        );
        assert_eq!(extract_session_token(&headers), Some("tok123".to_string()));

        // Flag-style segments before the session pair must not end the scan.
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("flag; anteroom_session=tok123"),
        );
        assert_eq!(extract_session_token(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn extract_token_prefers_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer tok-a"));
        headers.insert(
            COOKIE,
            HeaderValue::from_static("anteroom_session=tok-b"),
        );
        assert_eq!(extract_session_token(&headers), Some("tok-a".to_string()));
    }

    #[test]
    fn missing_or_empty_tokens_are_none() {
        assert_eq!(extract_session_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_session_token(&headers), None);
    }
}
