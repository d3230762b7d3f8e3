use axum::{Json, extract::Extension};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    password::verify_password,
    state::AuthState,
    storage::find_login,
    token,
    types::{LoginRequest, LoginResponse},
    utils::{normalize_email, normalize_username},
};
use crate::api::handlers::error::{ApiError, ErrorBody};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted, bearer token issued", body = LoginResponse),
        (status = 400, description = "Missing or malformed payload", body = ErrorBody),
        (status = 401, description = "Unknown account or wrong password", body = ErrorBody),
    ),
    tag = "auth"
)]
#[instrument(skip(pool, auth_state, payload))]
pub async fn login(
    pool: Extension<SqlitePool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::payload("Missing or malformed payload"));
    };

    let username = normalize_username(&request.username_or_email);
    let email = normalize_email(&request.username_or_email);

    // Unknown accounts and wrong passwords share one response.
    let Some(record) = find_login(&pool, &username, &email).await? else {
        debug!("login rejected: no matching account");
        return Err(ApiError::Auth(INVALID_CREDENTIALS));
    };

    if !verify_password(request.password, record.password_hash).await? {
        debug!(account_id = %record.id, "login rejected: password mismatch");
        return Err(ApiError::Auth(INVALID_CREDENTIALS));
    }

    let issued = token::issue(&auth_state, record.id)?;
    debug!(account_id = %record.id, "session token issued");

    Ok(Json(LoginResponse {
        access_token: issued.token,
        token_type: "bearer".to_string(),
        expires_in: issued.expires_in,
    }))
}
