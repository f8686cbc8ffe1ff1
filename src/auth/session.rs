//! Server-side session records keyed by hashed opaque tokens.
//!
//! The raw token only ever travels in the cookie; the map stores a SHA-256
//! hash. Expiry is checked lazily when a token is presented, and destroy is
//! idempotent. State machine per session: Active until the TTL elapses
//! (Expired) or the token is destroyed (terminal).

use anyhow::{Context, Result};
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Who a session belongs to. Admin sessions come from the hardcoded admin
/// credential and form a separate trust boundary from user sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    User(Uuid),
    Admin,
}

struct SessionEntry {
    principal: Principal,
    expires_at: Instant,
}

/// In-process session store with a fixed TTL.
pub struct SessionManager {
    ttl: Duration,
    sessions: Mutex<HashMap<Vec<u8>, SessionEntry>>,
}

impl SessionManager {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a new session and return the raw token for the cookie.
    ///
    /// # Errors
    /// Returns an error if the system RNG fails.
    pub async fn issue(&self, principal: Principal) -> Result<String> {
        let token = generate_session_token()?;
        let entry = SessionEntry {
            principal,
            expires_at: Instant::now() + self.ttl,
        };
        self.sessions
            .lock()
            .await
            .insert(hash_session_token(&token), entry);
        Ok(token)
    }

    /// Resolve a raw token to its principal.
    ///
    /// Expired entries are treated as absent and pruned on the spot; there
    /// is no background sweep.
    pub async fn validate(&self, token: &str) -> Option<Principal> {
        let token_hash = hash_session_token(token);
        let mut sessions = self.sessions.lock().await;
        match sessions.get(&token_hash) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.principal),
            Some(_) => {
                sessions.remove(&token_hash);
                None
            }
            None => None,
        }
    }

    /// Destroy a session. Destroying an unknown or already-destroyed token
    /// is a no-op.
    pub async fn destroy(&self, token: &str) {
        self.sessions.lock().await.remove(&hash_session_token(token));
    }
}

/// 32 random bytes, URL-safe base64. The raw value is only returned to set
/// the cookie; the map keys on its hash.
fn generate_session_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate session token")?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

/// Hash a session token so raw values never sit in server-side state.
fn hash_session_token(token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}
