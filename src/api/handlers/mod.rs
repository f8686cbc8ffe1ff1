//! Route handlers for the anteroom API.
//!
//! Handlers parse and validate input, call into the auth service or stats
//! aggregation, and shape `(StatusCode, Json)` responses. All domain errors
//! reach clients through the `AuthError` mapping; stores and sessions are
//! injected via `Extension`s.

pub mod admin;
pub mod auth;
pub mod health;
pub mod root;
pub mod types;
