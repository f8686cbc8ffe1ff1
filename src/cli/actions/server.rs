use crate::{
    api,
    auth::{AuthConfig, AuthState},
    cli::actions::Action,
    storage::UserStore,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Execute the server action.
/// # Errors
/// Returns an error if the store cannot be opened or the server fails to start.
pub async fn handle(action: Action) -> Result<()> {
    let Action::Server {
        port,
        dsn,
        admin_password,
        session_ttl_seconds,
        frontend_url,
    } = action;

    let store = UserStore::connect(&dsn)
        .await
        .with_context(|| format!("Failed to open store for DSN {dsn:?}"))?;

    info!(store = ?store, "Store ready");

    let config = AuthConfig::new(frontend_url, admin_password)
        .with_session_ttl_seconds(session_ttl_seconds);
    let auth_state = Arc::new(AuthState::new(config));

    api::new(port, store, auth_state).await?;

    Ok(())
}
