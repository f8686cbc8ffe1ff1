use axum::response::IntoResponse;

use crate::APP_USER_AGENT;

/// Service banner for `/`. Undocumented on purpose.
pub async fn root() -> impl IntoResponse {
    APP_USER_AGENT
}
