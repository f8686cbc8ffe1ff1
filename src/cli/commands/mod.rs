pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_DSN: &str = "dsn";
pub const ARG_ADMIN_PASSWORD: &str = "admin-password";
pub const ARG_SESSION_TTL: &str = "session-ttl";
pub const ARG_FRONTEND_URL: &str = "frontend-url";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("anteroom")
        .about("Chat room signup, login, and session service")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("ANTEROOM_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long("dsn")
                .help("Store connection string")
                .long_help(
                    "Store connection string. Use sqlite://<path> (or sqlite::memory:) for the \
                     SQLite backend, or memory:// for a transient in-memory store.",
                )
                .default_value("sqlite://anteroom.db")
                .env("ANTEROOM_DSN"),
        )
        .arg(
            Arg::new(ARG_ADMIN_PASSWORD)
                .long("admin-password")
                .help("Password for the built-in admin account")
                .env("ANTEROOM_ADMIN_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL)
                .long("session-ttl")
                .help("Session time-to-live in seconds")
                .default_value("86400")
                .env("ANTEROOM_SESSION_TTL")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_FRONTEND_URL)
                .long("frontend-url")
                .help("Frontend base URL, used for the CORS origin and cookie security")
                .default_value("http://localhost:3000")
                .env("ANTEROOM_FRONTEND_URL"),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "anteroom");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Chat room signup, login, and session service".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    /// Clear every env var the command reads so parallel tests cannot leak
    /// values into each other; `temp_env` also serializes env mutation.
    fn with_clean_env(test: impl Fn()) {
        temp_env::with_vars(
            [
                ("ANTEROOM_PORT", None::<&str>),
                ("ANTEROOM_DSN", None),
                ("ANTEROOM_ADMIN_PASSWORD", None),
                ("ANTEROOM_SESSION_TTL", None),
                ("ANTEROOM_FRONTEND_URL", None),
                ("ANTEROOM_LOG_LEVEL", None),
            ],
            test,
        );
    }

    #[test]
    fn test_defaults_with_required_password() {
        with_clean_env(|| {
            let matches = new()
                .try_get_matches_from(["anteroom", "--admin-password", "hunter2"])
                .unwrap();

            assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
            assert_eq!(
                matches.get_one::<String>(ARG_DSN).map(String::as_str),
                Some("sqlite://anteroom.db")
            );
            assert_eq!(
                matches.get_one::<u64>(ARG_SESSION_TTL).copied(),
                Some(86_400)
            );
            assert_eq!(
                matches
                    .get_one::<String>(ARG_FRONTEND_URL)
                    .map(String::as_str),
                Some("http://localhost:3000")
            );
        });
    }

    #[test]
    fn test_admin_password_is_required() {
        with_clean_env(|| {
            assert!(new().try_get_matches_from(["anteroom"]).is_err());
        });
    }

    #[test]
    fn test_admin_password_from_env() {
        temp_env::with_vars(
            [
                ("ANTEROOM_ADMIN_PASSWORD", Some("from-env")),
                ("ANTEROOM_LOG_LEVEL", None),
            ],
            || {
                let matches = new().try_get_matches_from(["anteroom"]).unwrap();
                assert_eq!(
                    matches
                        .get_one::<String>(ARG_ADMIN_PASSWORD)
                        .map(String::as_str),
                    Some("from-env")
                );
            },
        );
    }

    #[test]
    fn test_memory_dsn_accepted() {
        with_clean_env(|| {
            let matches = new()
                .try_get_matches_from([
                    "anteroom",
                    "--admin-password",
                    "hunter2",
                    "--dsn",
                    "memory://",
                ])
                .unwrap();
            assert_eq!(
                matches.get_one::<String>(ARG_DSN).map(String::as_str),
                Some("memory://")
            );
        });
    }
}
