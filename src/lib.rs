//! # Reckon (Authenticated Calculation Ledger)
//!
//! `reckon` stores arithmetic calculations on behalf of registered accounts.
//! Accounts log in with a username or email and receive a signed, expiring
//! bearer token; every `/calculations` request presents that token.
//!
//! ## Accounts
//!
//! Usernames and emails are unique. Passwords are stored as salted Argon2id
//! hashes in PHC format and never leave the registry.
//!
//! ## Sessions
//!
//! Sessions are stateless HS256 JWTs bound to the account id. Nothing is
//! persisted server-side; expiry and signature are checked on every request.
//!
//! ## Ownership
//!
//! A calculation is visible only to the account that created it. Requests for
//! records owned by someone else return `404 Not Found`, exactly like records
//! that do not exist, so ids cannot be probed across accounts.

pub mod api;
pub mod cli;
pub mod db;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
