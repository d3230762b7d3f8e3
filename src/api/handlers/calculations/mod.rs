//! Owner-scoped calculation records.
//!
//! Every handler resolves the caller with `require_auth` before touching the
//! store, and every store query is filtered by the caller's account id. A
//! record owned by someone else answers `404`, exactly like a missing one.

pub mod operation;
mod storage;
pub mod types;


use axum::{
    Json,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{
    auth::{AuthState, principal::require_auth},
    error::{ApiError, ErrorBody},
};
use operation::Operation;
use storage::{
    Computed, fetch_calculation, fetch_calculations, insert_calculation, remove_calculation,
    replace_calculation,
};
use types::{CalculationRequest, CalculationResponse};

const NOT_FOUND: &str = "Calculation not found";

/// Parse the operation and compute the result before anything is stored.
fn compute(request: &CalculationRequest) -> Result<Computed, ApiError> {
    let operation: Operation = request.operation.parse()?;
    let result = operation.apply(request.a, request.b)?;
    Ok(Computed {
        a: request.a,
        b: request.b,
        operation,
        result,
    })
}

/// Ids that are not UUIDs can never match a stored record.
fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound(NOT_FOUND))
}

fn read_payload(payload: Option<Json<CalculationRequest>>) -> Result<CalculationRequest, ApiError> {
    payload
        .map(|Json(request)| request)
        .ok_or_else(|| ApiError::payload("Missing or malformed payload"))
}

#[utoipa::path(
    post,
    path = "/calculations",
    request_body = CalculationRequest,
    responses(
        (status = 201, description = "Calculation computed and stored.", body = CalculationResponse),
        (status = 400, description = "Malformed payload, unknown type or invalid operands.", body = ErrorBody),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "calculations"
)]
#[instrument(skip(headers, pool, auth_state, payload))]
pub async fn create_calculation(
    headers: HeaderMap,
    pool: Extension<SqlitePool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<CalculationRequest>>,
) -> Result<(StatusCode, Json<CalculationResponse>), ApiError> {
    let principal = require_auth(&headers, &pool, &auth_state).await?;
    let request = read_payload(payload)?;
    let computed = compute(&request)?;

    let record = insert_calculation(&pool, principal.account_id, computed).await?;
    debug!(account_id = %principal.account_id, calculation_id = %record.id, "calculation stored");

    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/calculations",
    responses(
        (status = 200, description = "Calculations owned by the caller, oldest first.", body = [CalculationResponse]),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "calculations"
)]
#[instrument(skip(headers, pool, auth_state))]
pub async fn list_calculations(
    headers: HeaderMap,
    pool: Extension<SqlitePool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<Json<Vec<CalculationResponse>>, ApiError> {
    let principal = require_auth(&headers, &pool, &auth_state).await?;
    let records = fetch_calculations(&pool, principal.account_id).await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/calculations/{id}",
    params(("id" = String, Path, description = "Calculation id")),
    responses(
        (status = 200, description = "The calculation.", body = CalculationResponse),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorBody),
        (status = 404, description = "No calculation with this id belongs to the caller.", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "calculations"
)]
#[instrument(skip(headers, pool, auth_state))]
pub async fn get_calculation(
    Path(id): Path<String>,
    headers: HeaderMap,
    pool: Extension<SqlitePool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let principal = require_auth(&headers, &pool, &auth_state).await?;
    let id = parse_id(&id)?;

    fetch_calculation(&pool, principal.account_id, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

#[utoipa::path(
    put,
    path = "/calculations/{id}",
    request_body = CalculationRequest,
    params(("id" = String, Path, description = "Calculation id")),
    responses(
        (status = 200, description = "Calculation recomputed and replaced.", body = CalculationResponse),
        (status = 400, description = "Malformed payload, unknown type or invalid operands.", body = ErrorBody),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorBody),
        (status = 404, description = "No calculation with this id belongs to the caller.", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "calculations"
)]
#[instrument(skip(headers, pool, auth_state, payload))]
pub async fn update_calculation(
    Path(id): Path<String>,
    headers: HeaderMap,
    pool: Extension<SqlitePool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<CalculationRequest>>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let principal = require_auth(&headers, &pool, &auth_state).await?;
    let id = parse_id(&id)?;
    let request = read_payload(payload)?;
    let computed = compute(&request)?;

    let Some(record) = replace_calculation(&pool, principal.account_id, id, computed).await? else {
        return Err(ApiError::NotFound(NOT_FOUND));
    };
    debug!(account_id = %principal.account_id, calculation_id = %record.id, "calculation updated");

    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/calculations/{id}",
    params(("id" = String, Path, description = "Calculation id")),
    responses(
        (status = 204, description = "Calculation deleted."),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorBody),
        (status = 404, description = "No calculation with this id belongs to the caller.", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "calculations"
)]
#[instrument(skip(headers, pool, auth_state))]
pub async fn delete_calculation(
    Path(id): Path<String>,
    headers: HeaderMap,
    pool: Extension<SqlitePool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<StatusCode, ApiError> {
    let principal = require_auth(&headers, &pool, &auth_state).await?;
    let id = parse_id(&id)?;

    if remove_calculation(&pool, principal.account_id, id).await? {
        debug!(account_id = %principal.account_id, calculation_id = %id, "calculation deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(NOT_FOUND))
    }
}
