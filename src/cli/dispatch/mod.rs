//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to an [`Action`], rejecting configurations that
//! would start a server with unusable session tokens.

use crate::api::handlers::auth::MIN_TOKEN_SECRET_BYTES;
use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{DEFAULT_DSN, auth};
use anyhow::{Result, bail};
use secrecy::ExposeSecret;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or out of range.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .unwrap_or_else(|| DEFAULT_DSN.to_string());

    let auth_opts = auth::Options::parse(matches)?;

    if auth_opts.token_secret.expose_secret().len() < MIN_TOKEN_SECRET_BYTES {
        bail!("--token-secret must be at least {MIN_TOKEN_SECRET_BYTES} bytes");
    }

    if auth_opts.token_ttl_seconds <= 0 {
        bail!("--token-ttl-seconds must be greater than zero");
    }

    if auth_opts.token_issuer.trim().is_empty() {
        bail!("--token-issuer must not be empty");
    }

    Ok(Action::Server(Args {
        port,
        dsn,
        token_secret: auth_opts.token_secret,
        token_issuer: auth_opts.token_issuer,
        token_ttl_seconds: auth_opts.token_ttl_seconds,
    }))
}
