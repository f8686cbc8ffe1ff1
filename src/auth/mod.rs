//! Signup/login orchestration, password hashing, and sessions.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

pub mod password;
pub mod service;
pub mod session;
pub mod state;

pub use service::{login, signup};
pub use state::{AuthConfig, AuthState};

/// The one error kind every transport adapter consumes.
///
/// `InvalidCredentials` intentionally covers both unknown-name and
/// wrong-password so callers cannot tell which branch was taken.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Name and password are required")]
    InvalidInput,
    #[error("User already exists")]
    UserExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput | Self::UserExists | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    /// Map domain errors to status codes at the routing boundary. Internal
    /// causes are logged server-side; clients get the generic message.
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            error!("Internal error: {err:?}");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(AuthError::InvalidInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::UserExists.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidCredentials.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_message_stays_generic() {
        let err = AuthError::Internal(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
