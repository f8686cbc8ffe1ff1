//! `OpenAPI` document for the HTTP API, served at `/openapi.json`.

use axum::response::Json;
use utoipa::OpenApi;

use super::handlers::{admin, auth, health, types};
use crate::storage::PublicUser;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::signup,
        auth::login,
        auth::logout,
        auth::session,
        admin::login,
        admin::stats,
    ),
    components(schemas(
        types::CredentialsRequest,
        types::AdminLoginRequest,
        types::AckResponse,
        types::SessionResponse,
        types::StatsResponse,
        health::Health,
        PublicUser,
    )),
    tags(
        (name = "auth", description = "Signup, login, and sessions"),
        (name = "admin", description = "Admin login and user statistics"),
        (name = "health", description = "Liveness and store ping")
    )
)]
pub struct ApiDoc;

/// axum handler returning the generated document.
pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for route in [
            "/health",
            "/api/signup",
            "/api/login",
            "/api/logout",
            "/api/session",
            "/api/admin/login",
            "/api/stats",
        ] {
            assert!(paths.contains_key(route), "missing route: {route}");
        }
    }
}
