//! Request/response types for the HTTP endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::PublicUser;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CredentialsRequest {
    pub name: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Body for successful signup/login/logout answers.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

impl AckResponse {
    #[must_use]
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub name: String,
    pub admin: bool,
}

#[derive(ToSchema, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: i64,
    pub recent_logins: usize,
    pub new_users: usize,
    pub users: Vec<PublicUser>,
}
