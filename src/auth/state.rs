//! Auth configuration and shared handler state.

use secrecy::SecretString;
use std::time::Duration;

use super::session::SessionManager;

const DEFAULT_SESSION_TTL_SECONDS: u64 = 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    frontend_base_url: String,
    session_ttl_seconds: u64,
    admin_password: SecretString,
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_base_url: String, admin_password: SecretString) -> Self {
        Self {
            frontend_base_url,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            admin_password,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_seconds)
    }

    pub(crate) fn admin_password(&self) -> &SecretString {
        &self.admin_password
    }

    /// Only mark cookies secure when the frontend is served over HTTPS.
    #[must_use]
    pub fn session_cookie_secure(&self) -> bool {
        self.frontend_base_url.starts_with("https://")
    }
}

/// Everything the handlers share: config plus the session manager.
pub struct AuthState {
    config: AuthConfig,
    sessions: SessionManager,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        let sessions = SessionManager::new(config.session_ttl());
        Self { config, sessions }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(frontend: &str) -> AuthConfig {
        AuthConfig::new(frontend.to_string(), SecretString::from("hunter2"))
    }

    #[test]
    fn default_ttl_is_24_hours() {
        assert_eq!(
            config("http://localhost:3000").session_ttl(),
            Duration::from_secs(86_400)
        );
    }

    #[test]
    fn ttl_builder_overrides_default() {
        let config = config("http://localhost:3000").with_session_ttl_seconds(60);
        assert_eq!(config.session_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn cookie_secure_follows_frontend_scheme() {
        assert!(config("https://chat.example.com").session_cookie_secure());
        assert!(!config("http://localhost:3000").session_cookie_secure());
    }
}
