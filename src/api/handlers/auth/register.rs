use axum::{Json, extract::Extension, http::StatusCode};
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{
    password::hash_password,
    storage::{insert_account, taken_field, unique_violation_field},
    types::{AccountResponse, RegisterRequest},
    utils::{normalize_email, normalize_username, valid_email, valid_password, valid_username},
};
use crate::api::handlers::error::{ApiError, ErrorBody};

/// Check registration input; returns the normalized username and email.
fn validate(request: &RegisterRequest) -> Result<(String, String), ApiError> {
    let username = normalize_username(&request.username);
    if !valid_username(&username) {
        return Err(ApiError::validation(
            "username",
            "Username must be 3-50 characters of letters, digits, '.', '_' or '-'",
        ));
    }

    let email = normalize_email(&request.email);
    if !valid_email(&email) {
        return Err(ApiError::validation("email", "Invalid email"));
    }

    if !valid_password(&request.password) {
        return Err(ApiError::validation(
            "password",
            "Password must be 8-128 characters",
        ));
    }

    if request.password != request.confirm_password {
        return Err(ApiError::validation(
            "confirm_password",
            "Passwords do not match",
        ));
    }

    Ok((username, email))
}

fn taken_message(field: &str) -> String {
    format!("An account with this {field} already exists")
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid registration input", body = ErrorBody),
        (status = 409, description = "Username or email already registered", body = ErrorBody),
    ),
    tag = "auth"
)]
#[instrument(skip(pool, payload))]
pub async fn register(
    pool: Extension<SqlitePool>,
    payload: Option<Json<RegisterRequest>>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::payload("Missing or malformed payload"));
    };

    let (username, email) = validate(&request)?;
    debug!(username = %username, "registering account");

    if let Some(field) = taken_field(&pool, &username, &email).await? {
        warn!(field, "registration rejected: identifier already taken");
        return Err(ApiError::conflict(field, taken_message(field)));
    }

    let password_hash = hash_password(request.password).await?;

    match insert_account(&pool, Uuid::new_v4(), &username, &email, &password_hash).await {
        Ok(account) => Ok((StatusCode::OK, Json(account))),
        Err(err) => match unique_violation_field(&err) {
            // Lost a race with a concurrent registration for the same identifier.
            Some(field) => Err(ApiError::conflict(field, taken_message(field))),
            None => Err(ApiError::Database(err)),
        },
    }
}
