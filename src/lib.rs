//! # Anteroom
//!
//! `anteroom` is a small chat-room entry service: account signup, login,
//! session cookies, and an admin-gated statistics endpoint.
//!
//! ## Authentication
//!
//! Passwords are hashed with Argon2id before they are persisted; the stored
//! hash never leaves the auth service. Login deliberately conflates
//! unknown-name and wrong-password failures into a single
//! `Invalid credentials` answer so callers cannot enumerate accounts.
//!
//! ## Sessions
//!
//! Successful signup/login issues an opaque random token carried in an
//! `HttpOnly` cookie. Only a SHA-256 hash of the token is kept server-side.
//! Sessions expire after a fixed TTL, checked lazily on validation; logout
//! is idempotent.
//!
//! ## Storage
//!
//! User records live behind one narrow store interface with two
//! interchangeable backends selected by DSN: SQLite (`sqlite://...`) and a
//! transient in-memory map (`memory://`). Name uniqueness is enforced by the
//! store itself, which is the sole arbiter for concurrent signups.

pub mod api;
pub mod auth;
pub mod cli;
pub mod stats;
pub mod storage;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
