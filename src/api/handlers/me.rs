//! Authenticated self-service endpoint.

use axum::{Json, extract::Extension, http::HeaderMap};
use sqlx::SqlitePool;
use std::sync::Arc;

use super::{
    auth::{AuthState, principal::require_auth, types::AccountResponse},
    error::{ApiError, ErrorBody},
};

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Return the authenticated account.", body = AccountResponse),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn get_me(
    headers: HeaderMap,
    pool: Extension<SqlitePool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<Json<AccountResponse>, ApiError> {
    let principal = require_auth(&headers, &pool, &auth_state).await?;
    Ok(Json(principal.account))
}
