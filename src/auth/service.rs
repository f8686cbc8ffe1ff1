//! Signup and login orchestration over the credential store.

use anyhow::Context;
use std::sync::OnceLock;
use tracing::debug;

use super::{password, AuthError};
use crate::storage::{StoreError, UserRecord, UserStore};

/// Create a new account.
///
/// The store's uniqueness constraint is the sole arbiter between concurrent
/// signups for the same name; there is deliberately no existence pre-check.
///
/// # Errors
/// `InvalidInput` for empty name/password, `UserExists` when the store
/// reports a duplicate.
pub async fn signup(store: &UserStore, name: &str, password: &str) -> Result<UserRecord, AuthError> {
    let name = name.trim();
    if name.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidInput);
    }

    let password_hash = password::hash(password)
        .context("failed to hash password")
        .map_err(AuthError::Internal)?;

    match store.create_user(name, &password_hash).await {
        Ok(user) => {
            debug!(user = name, "account created");
            Ok(user)
        }
        Err(StoreError::Duplicate(_)) => Err(AuthError::UserExists),
        Err(StoreError::Other(err)) => Err(AuthError::Internal(err)),
    }
}

/// Authenticate an existing account and stamp its last login.
///
/// Unknown-name and wrong-password both yield `InvalidCredentials`; the
/// unknown-name branch still verifies against a fallback hash so the two
/// paths do comparable work.
///
/// # Errors
/// `InvalidInput` for empty fields, `InvalidCredentials` on any mismatch.
pub async fn login(store: &UserStore, name: &str, password: &str) -> Result<UserRecord, AuthError> {
    let name = name.trim();
    if name.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidInput);
    }

    let user = store
        .find_by_name(name)
        .await
        .map_err(|err| AuthError::Internal(err.into()))?;

    let Some(mut user) = user else {
        let _ = password::verify(password, fallback_hash());
        return Err(AuthError::InvalidCredentials);
    };

    let verified = password::verify(password, &user.password_hash)
        .context("stored password hash is malformed")
        .map_err(AuthError::Internal)?;
    if !verified {
        return Err(AuthError::InvalidCredentials);
    }

    let stamped = store
        .touch_last_login(user.id)
        .await
        .map_err(|err| AuthError::Internal(err.into()))?;
    user.last_login = Some(stamped);

    debug!(user = name, "login successful");
    Ok(user)
}

/// Hash verified against when the name does not exist, so the unknown-name
/// path is not observably cheaper than a wrong password.
fn fallback_hash() -> &'static str {
    static FALLBACK: OnceLock<String> = OnceLock::new();
    FALLBACK.get_or_init(|| {
        password::hash("fallback-password").unwrap_or_else(|_| String::new())
    })
}
