pub mod server;

use secrecy::SecretString;

/// Actions the CLI can dispatch to.
#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        admin_password: SecretString,
        session_ttl_seconds: u64,
        frontend_url: String,
    },
}
