//! Account registry and session issuer.
//!
//! - `POST /register` validates input, rejects taken usernames/emails and
//!   stores an Argon2id hash of the password.
//! - `POST /login` accepts a username or an email plus password and returns a
//!   signed bearer token.
//!
//! Tokens are verified statelessly by [`principal::require_auth`], which every
//! protected handler calls first.

pub(crate) mod login;
mod password;
pub(crate) mod principal;
pub(crate) mod register;
mod state;
mod storage;
pub mod token;
pub mod types;
mod utils;

pub use state::{AuthConfig, AuthState, MIN_TOKEN_SECRET_BYTES};
