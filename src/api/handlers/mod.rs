//! API handlers for reckon.
//!
//! `auth` owns accounts and sessions, `calculations` owns the per-account
//! ledger. `error` is the shared failure type every handler returns.

pub mod auth;
pub mod calculations;
pub mod error;
pub mod health;
pub mod me;
pub mod root;

#[cfg(test)]
pub(crate) mod test_support;
