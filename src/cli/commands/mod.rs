pub mod auth;
pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const DEFAULT_DSN: &str = "sqlite://reckon.db";

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

    let command = Command::new("reckon")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("RECKON_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("dsn")
                .short('d')
                .long("dsn")
                .help("Database connection string")
                .long_help(
                    "SQLite connection string. File databases are created if missing; use sqlite::memory: for a throwaway store.",
                )
                .env("RECKON_DSN")
                .default_value(DEFAULT_DSN),
        );

    let command = auth::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "reckon");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some(env!("CARGO_PKG_DESCRIPTION").to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_args() {
        temp_env::with_vars_unset(["RECKON_PORT", "RECKON_DSN", "RECKON_LOG_LEVEL"], || {
            let matches = new().get_matches_from(vec![
                "reckon",
                "--port",
                "9090",
                "--dsn",
                "sqlite::memory:",
                "--token-secret",
                SECRET,
                "--token-ttl-seconds",
                "60",
                "-vv",
            ]);

            assert_eq!(matches.get_one::<u16>("port").copied(), Some(9090));
            assert_eq!(
                matches.get_one::<String>("dsn").cloned(),
                Some("sqlite::memory:".to_string())
            );
            assert_eq!(
                matches
                    .get_one::<i64>(auth::ARG_TOKEN_TTL_SECONDS)
                    .copied(),
                Some(60)
            );
            assert_eq!(
                matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                Some(2)
            );
        });
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("RECKON_PORT", None::<&str>),
                ("RECKON_DSN", None),
                ("RECKON_TOKEN_ISSUER", None),
                ("RECKON_TOKEN_TTL_SECONDS", None),
                ("RECKON_TOKEN_SECRET", Some(SECRET)),
            ],
            || {
                let matches = new().get_matches_from(vec!["reckon"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(8080));
                assert_eq!(
                    matches.get_one::<String>("dsn").map(String::as_str),
                    Some(DEFAULT_DSN)
                );
                assert_eq!(
                    matches
                        .get_one::<String>(auth::ARG_TOKEN_ISSUER)
                        .map(String::as_str),
                    Some("reckon")
                );
                assert_eq!(
                    matches
                        .get_one::<i64>(auth::ARG_TOKEN_TTL_SECONDS)
                        .copied(),
                    Some(3600)
                );
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("RECKON_PORT", Some("443")),
                ("RECKON_DSN", Some("sqlite:///var/lib/reckon/reckon.db")),
                ("RECKON_TOKEN_SECRET", Some(SECRET)),
                ("RECKON_TOKEN_ISSUER", Some("reckon-test")),
                ("RECKON_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["reckon"]);
                assert_eq!(matches.get_one::<u16>("port").copied(), Some(443));
                assert_eq!(
                    matches.get_one::<String>("dsn").cloned(),
                    Some("sqlite:///var/lib/reckon/reckon.db".to_string())
                );
                assert_eq!(
                    matches
                        .get_one::<String>(auth::ARG_TOKEN_ISSUER)
                        .cloned(),
                    Some("reckon-test".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("RECKON_LOG_LEVEL", Some(level)),
                    ("RECKON_TOKEN_SECRET", Some(SECRET)),
                ],
                || {
                    let matches = new().get_matches_from(vec!["reckon"]);
                    assert_eq!(
                        matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                        u8::try_from(index).ok()
                    );
                },
            );
        }
    }

    #[test]
    fn test_token_secret_required() {
        temp_env::with_vars_unset(["RECKON_TOKEN_SECRET"], || {
            let result = new().try_get_matches_from(vec!["reckon"]);
            assert!(result.is_err());
        });
    }
}
