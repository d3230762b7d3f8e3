use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_TOKEN_SECRET: &str = "token-secret";
pub const ARG_TOKEN_ISSUER: &str = "token-issuer";
pub const ARG_TOKEN_TTL_SECONDS: &str = "token-ttl-seconds";

/// Session token settings read from the command line or environment.
#[derive(Debug)]
pub struct Options {
    pub token_secret: SecretString,
    pub token_issuer: String,
    pub token_ttl_seconds: i64,
}

impl Options {
    /// # Errors
    /// Returns an error if the token secret is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let token_secret = matches
            .get_one::<String>(ARG_TOKEN_SECRET)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --token-secret")?;
        let token_issuer = matches
            .get_one::<String>(ARG_TOKEN_ISSUER)
            .cloned()
            .unwrap_or_else(|| "reckon".to_string());
        let token_ttl_seconds = matches
            .get_one::<i64>(ARG_TOKEN_TTL_SECONDS)
            .copied()
            .unwrap_or(3600);

        Ok(Self {
            token_secret,
            token_issuer,
            token_ttl_seconds,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_TOKEN_SECRET)
                .long(ARG_TOKEN_SECRET)
                .help("HMAC secret used to sign session tokens (at least 32 bytes)")
                .env("RECKON_TOKEN_SECRET")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_ISSUER)
                .long(ARG_TOKEN_ISSUER)
                .help("Issuer claim written to and required on session tokens")
                .env("RECKON_TOKEN_ISSUER")
                .default_value("reckon"),
        )
        .arg(
            Arg::new(ARG_TOKEN_TTL_SECONDS)
                .long(ARG_TOKEN_TTL_SECONDS)
                .help("Session token lifetime in seconds")
                .env("RECKON_TOKEN_TTL_SECONDS")
                .default_value("3600")
                .value_parser(clap::value_parser!(i64)),
        )
}
