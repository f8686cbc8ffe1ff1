use crate::cli::{actions::Action, commands};
use anyhow::{Context, Result};
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches
            .get_one::<u16>(commands::ARG_PORT)
            .copied()
            .unwrap_or(8080),
        dsn: matches
            .get_one::<String>(commands::ARG_DSN)
            .cloned()
            .context("missing required argument: --dsn")?,
        admin_password: matches
            .get_one::<String>(commands::ARG_ADMIN_PASSWORD)
            .map(|password| SecretString::from(password.clone()))
            .context("missing required argument: --admin-password")?,
        session_ttl_seconds: matches
            .get_one::<u64>(commands::ARG_SESSION_TTL)
            .copied()
            .unwrap_or(86_400),
        frontend_url: matches
            .get_one::<String>(commands::ARG_FRONTEND_URL)
            .cloned()
            .context("missing required argument: --frontend-url")?,
    })
}
