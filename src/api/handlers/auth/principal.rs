//! Authenticated principal extraction.
//!
//! Flow Overview: read the bearer token, verify it statelessly, and confirm
//! the account still exists. Handlers call [`require_auth`] before touching
//! any owned resource.

use axum::http::HeaderMap;
use sqlx::SqlitePool;
use tracing::{Instrument, info_span};
use uuid::Uuid;

use super::{
    state::AuthState, storage::find_account, token, types::AccountResponse,
    utils::extract_bearer_token,
};
use crate::api::handlers::error::ApiError;

/// Account context derived from a valid bearer token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub account_id: Uuid,
    pub account: AccountResponse,
}

/// Resolve the bearer token into a principal, or fail with `401`.
pub async fn require_auth(
    headers: &HeaderMap,
    pool: &SqlitePool,
    auth_state: &AuthState,
) -> Result<Principal, ApiError> {
    let token = extract_bearer_token(headers).ok_or(ApiError::Auth("Missing bearer token"))?;
    let account_id = token::verify(auth_state, &token)?;

    let span = info_span!("auth.resolve", account_id = %account_id);
    match find_account(pool, account_id).instrument(span).await? {
        Some(account) => Ok(Principal {
            account_id,
            account,
        }),
        None => Err(ApiError::Auth("Unknown account")),
    }
}
